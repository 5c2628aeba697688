//! Error handling for VolleyBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the VolleyBuddy application
#[derive(Error, Debug)]
pub enum VolleyBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Game not found: {label}")]
    GameNotFound { label: String },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for VolleyBuddy operations
pub type Result<T> = std::result::Result<T, VolleyBuddyError>;

impl VolleyBuddyError {
    /// Expected domain outcomes are surfaced to the user in character and
    /// are not worth an error-level log entry.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            VolleyBuddyError::UserNotFound { .. }
                | VolleyBuddyError::GameNotFound { .. }
                | VolleyBuddyError::GroupNotFound { .. }
                | VolleyBuddyError::PermissionDenied(_)
                | VolleyBuddyError::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_conditions_are_expected() {
        assert!(VolleyBuddyError::GameNotFound { label: "среда".into() }.is_expected());
        assert!(VolleyBuddyError::InvalidInput("bad".into()).is_expected());
        assert!(!VolleyBuddyError::Config("missing token".into()).is_expected());
    }
}
