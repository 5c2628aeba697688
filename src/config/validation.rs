//! Configuration validation

use crate::utils::errors::VolleyBuddyError;
use super::settings::Settings;

/// Validate the loaded settings before the bot starts
pub fn validate_settings(settings: &Settings) -> Result<(), VolleyBuddyError> {
    if settings.bot.token.is_empty() {
        return Err(VolleyBuddyError::Config("bot.token must not be empty".to_string()));
    }

    if settings.bot.bot_name.is_empty() {
        return Err(VolleyBuddyError::Config("bot.bot_name must not be empty".to_string()));
    }

    if !settings.database.url.starts_with("postgres") {
        return Err(VolleyBuddyError::Config(
            "database.url must be a postgresql:// connection string".to_string(),
        ));
    }

    if settings.database.max_connections == 0 {
        return Err(VolleyBuddyError::Config(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if settings.database.min_connections > settings.database.max_connections {
        return Err(VolleyBuddyError::Config(
            "database.min_connections must not exceed max_connections".to_string(),
        ));
    }

    if !settings.redis.url.starts_with("redis://") && !settings.redis.url.starts_with("rediss://") {
        return Err(VolleyBuddyError::Config(
            "redis.url must be a redis:// connection string".to_string(),
        ));
    }

    if settings.redis.ttl_seconds == 0 {
        return Err(VolleyBuddyError::Config(
            "redis.ttl_seconds must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_fail_on_empty_token() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn filled_settings_pass() {
        let mut settings = Settings::default();
        settings.bot.token = "123456:TEST".to_string();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn rejects_zero_ttl() {
        let mut settings = Settings::default();
        settings.bot.token = "123456:TEST".to_string();
        settings.redis.ttl_seconds = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
