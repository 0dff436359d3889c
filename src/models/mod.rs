pub mod analytics;
pub mod auth;
pub mod error;
pub mod favorites;
pub mod insights;
pub mod meter;
pub mod property;
pub mod reading;

/// Backend primary keys are plain integers.
pub type Id = u64;
