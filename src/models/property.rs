use super::{Id, error::AppError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A managed real-estate unit owned by the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Id,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Decorative catalog tags, assigned round-robin by id.
const TAGS: &[&str] = &["Home", "Office", "Warehouse", "Cottage"];

impl Property {
    pub fn tag(&self) -> &'static str {
        TAGS[(self.id % TAGS.len() as u64) as usize]
    }
}

/// Payload for creating a property. Both fields are required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProperty {
    pub name: String,
    pub address: String,
}

impl NewProperty {
    pub fn new(name: &str, address: &str) -> Result<Self, AppError> {
        let name = name.trim();
        let address = address.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Property name is required".to_string()));
        }
        if address.is_empty() {
            return Err(AppError::Validation("Property address is required".to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            address: address.to_string(),
        })
    }
}
