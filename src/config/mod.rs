//! Configuration module
//!
//! Handles application settings loading and validation

pub mod settings;
pub mod validation;

pub use settings::{Settings, BotConfig, DatabaseConfig, RedisConfig, LoggingConfig};
