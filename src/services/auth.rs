//! Authentication service implementation
//!
//! Two independent permission tiers: chat administrators, determined by a
//! live chat-membership query so role changes apply on the next message,
//! and creators, a statically configured allow-list of account ids.

use teloxide::prelude::*;
use teloxide::types::UserId;
use tracing::debug;
use crate::config::settings::Settings;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct AuthService {
    bot: Bot,
    settings: Settings,
}

impl AuthService {
    pub fn new(bot: Bot, settings: Settings) -> Self {
        Self { bot, settings }
    }

    /// Membership in the configured creator allow-list
    pub fn is_creator(&self, user_id: i64) -> bool {
        self.settings.bot.creator_ids.contains(&user_id)
    }

    /// Whether the user currently holds administrator or owner role in the
    /// chat. Never cached.
    pub async fn is_chat_admin(&self, chat_id: ChatId, user_id: UserId) -> Result<bool> {
        let member = self.bot.get_chat_member(chat_id, user_id).await?;
        let is_admin = member.is_administrator() || member.is_owner();
        debug!(chat_id = chat_id.0, user_id = user_id.0, is_admin, "Resolved chat member role");
        Ok(is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_check_uses_the_allow_list() {
        let mut settings = Settings::default();
        settings.bot.creator_ids = vec![42, 77];
        let auth = AuthService::new(Bot::new("123456:TEST"), settings);

        assert!(auth.is_creator(42));
        assert!(auth.is_creator(77));
        assert!(!auth.is_creator(43));
    }
}
