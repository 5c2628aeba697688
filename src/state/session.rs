//! Short-lived cross-step session state
//!
//! Two flows span more than one update: an admin chat selecting a target
//! group before issuing `/startgame`, and a pending one-shot private
//! message keyed by the recipient's handle. Both live in Redis with a TTL
//! and are consumed exactly once by their `take_*` operation.

use redis::AsyncCommands;
use tracing::debug;
use crate::config::RedisConfig;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct SessionStore {
    client: redis::Client,
    config: RedisConfig,
}

impl SessionStore {
    pub fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        Ok(Self { client, config })
    }

    async fn connection(&self) -> Result<redis::aio::ConnectionManager> {
        Ok(self.client.get_connection_manager().await?)
    }

    /// Remember which managed chat an admin chat is about to act on
    pub async fn select_chat(&self, admin_chat_id: i64, target_chat_id: i64) -> Result<()> {
        let key = Self::selected_chat_key(&self.config.prefix, admin_chat_id);
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(&key, target_chat_id, self.config.ttl_seconds).await?;
        debug!(admin_chat_id, target_chat_id, "Stored selected target chat");
        Ok(())
    }

    /// Consume the selected target chat, if any. The entry is removed so a
    /// second command cannot reuse it.
    pub async fn take_selected_chat(&self, admin_chat_id: i64) -> Result<Option<i64>> {
        let key = Self::selected_chat_key(&self.config.prefix, admin_chat_id);
        let mut conn = self.connection().await?;
        let value: Option<i64> = conn.get(&key).await?;
        if value.is_some() {
            let _: u32 = conn.del(&key).await?;
        }
        Ok(value)
    }

    /// Stash a pending private message for a handle
    pub async fn stash_private_message(&self, username: &str, message: &str) -> Result<()> {
        let key = Self::private_message_key(&self.config.prefix, username);
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(&key, message, self.config.ttl_seconds).await?;
        debug!(username, "Stored pending private message");
        Ok(())
    }

    /// Consume the pending private message for a handle; it cannot be
    /// delivered twice.
    pub async fn take_private_message(&self, username: &str) -> Result<Option<String>> {
        let key = Self::private_message_key(&self.config.prefix, username);
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(&key).await?;
        if value.is_some() {
            let _: u32 = conn.del(&key).await?;
        }
        Ok(value)
    }

    fn selected_chat_key(prefix: &str, admin_chat_id: i64) -> String {
        format!("{prefix}selected_chat:{admin_chat_id}")
    }

    fn private_message_key(prefix: &str, username: &str) -> String {
        format!("{prefix}private_msg:{username}")
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed_and_scoped() {
        assert_eq!(
            SessionStore::selected_chat_key("volleybuddy:", -100500),
            "volleybuddy:selected_chat:-100500"
        );
        assert_eq!(
            SessionStore::private_message_key("volleybuddy:", "anna"),
            "volleybuddy:private_msg:anna"
        );
    }

    #[test]
    fn store_builds_without_a_live_server() {
        let config = RedisConfig {
            url: "redis://localhost:6379".to_string(),
            prefix: "test:".to_string(),
            ttl_seconds: 60,
        };
        assert!(SessionStore::new(config).is_ok());
    }
}
