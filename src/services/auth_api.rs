use crate::models::{
    auth::{AuthTokens, LoginRequest, RegisterRequest},
    error::AppError,
};
use serde::{Serialize, de::DeserializeOwned};

const AUTH_BASE: &str = "/api/auth";

/// Client for the token-issuing endpoints. Kept separate from `ApiClient`
/// because these routes accept no bearer token.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Creates a new client with default configuration
    pub fn new() -> Result<Self, AppError> {
        Self::with_base_url(AUTH_BASE)
    }

    /// Creates a client against a custom base URL (primarily for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Exchanges credentials for an access/refresh token pair
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthTokens, AppError> {
        let url = format!("{}/login/", self.base_url);
        self.post(&url, credentials).await
    }

    /// Creates an account and signs it in within one call
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthTokens, AppError> {
        let url = format!("{}/register/", self.base_url);
        self.post(&url, request).await
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            return Err(self.error_for_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse response: {e}")))
    }

    /// Converts a reqwest error into an appropriate `AppError`
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::ApiError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::ApiError(format!("Request error: {error}"))
        } else {
            AppError::ApiError(format!("Network error: {error}"))
        }
    }

    /// Creates an error based on HTTP status code
    fn error_for_status(&self, status: reqwest::StatusCode, body: &str) -> AppError {
        let detail = super::api::extract_detail(body);
        match status.as_u16() {
            429 => AppError::RateLimited,
            400 | 401 | 403 => AppError::AuthError(
                detail.unwrap_or_else(|| "Check your username and password".to_string()),
            ),
            400..=499 => AppError::ApiError(format!("Client error {status}: {body}")),
            500..=599 => AppError::ApiError(format!("Server error {status}: {body}")),
            _ => AppError::ApiError(format!("Unexpected status {status}: {body}")),
        }
    }
}

/// Convenience function to sign in with username and password
pub async fn sign_in(credentials: &LoginRequest) -> Result<AuthTokens, AppError> {
    AuthClient::new()?.login(credentials).await
}

/// Convenience function to register a new account
pub async fn sign_up(request: &RegisterRequest) -> Result<AuthTokens, AppError> {
    AuthClient::new()?.register(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AuthClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{
            "access": "eyJhbGciOiJIUzI1NiJ9.access",
            "refresh": "eyJhbGciOiJIUzI1NiJ9.refresh",
            "user": {
                "id": 12,
                "username": "anna",
                "email": "anna@example.com"
            }
        }"#;

        let tokens: AuthTokens = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access, "eyJhbGciOiJIUzI1NiJ9.access");
        assert_eq!(tokens.refresh.as_deref(), Some("eyJhbGciOiJIUzI1NiJ9.refresh"));
        assert_eq!(tokens.user.as_ref().map(|u| u.username.as_str()), Some("anna"));
    }

    #[test]
    fn test_token_response_without_user() {
        // The login route returns only the token pair
        let json = r#"{
            "access": "a.b.c",
            "refresh": "d.e.f"
        }"#;

        let tokens: AuthTokens = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access, "a.b.c");
        assert!(tokens.user.is_none());
    }

    #[test]
    fn test_register_request_omits_empty_email() {
        let request = RegisterRequest {
            username: "anna".to_string(),
            password: "s3cret".to_string(),
            email: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("email"));
    }
}
