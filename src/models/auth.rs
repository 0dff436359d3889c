use super::{Id, error::AppError};
use serde::{Deserialize, Serialize};

/// Account details as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Two-letter avatar initials for the top-bar chip.
    pub fn initials(&self) -> String {
        self.username.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Token bundle issued by login and registration. Login responses may omit
/// the user block; registration always includes it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// The signed-in state the shell persists between visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    pub fn from_tokens(tokens: AuthTokens) -> Self {
        Self {
            access: tokens.access,
            refresh: tokens.refresh,
            user: tokens.user,
        }
    }

    /// Username for the top bar, empty when login did not return a user.
    pub fn username(&self) -> &str {
        self.user.as_ref().map_or("", |u| u.username.as_str())
    }
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Shared credential checks for both auth forms.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    Ok(())
}
