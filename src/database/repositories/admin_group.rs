//! Admin group repository implementation

use sqlx::PgPool;
use crate::models::admin_group::AdminGroup;
use crate::utils::errors::VolleyBuddyError;

#[derive(Debug, Clone)]
pub struct AdminGroupRepository {
    pool: PgPool,
}

impl AdminGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Link a managed chat to an admin chat. Idempotent: re-linking the
    /// same pair is a no-op.
    pub async fn add_admin_group(&self, chat_id: i64, admin_chat_id: i64, group_name: &str) -> Result<(), VolleyBuddyError> {
        sqlx::query(
            r#"
            INSERT INTO admin_groups (chat_id, admin_chat_id, group_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (chat_id, admin_chat_id) DO NOTHING
            "#
        )
        .bind(chat_id)
        .bind(admin_chat_id)
        .bind(group_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All chats managed from an admin chat
    pub async fn get_groups(&self, admin_chat_id: i64) -> Result<Vec<AdminGroup>, VolleyBuddyError> {
        let groups = sqlx::query_as::<_, AdminGroup>(
            "SELECT id, chat_id, admin_chat_id, group_name FROM admin_groups WHERE admin_chat_id = $1 ORDER BY id"
        )
        .bind(admin_chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Whether the admin chat is linked to the target chat
    pub async fn is_linked(&self, admin_chat_id: i64, chat_id: i64) -> Result<bool, VolleyBuddyError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM admin_groups WHERE admin_chat_id = $1 AND chat_id = $2"
        )
        .bind(admin_chat_id)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Look up one link row by its id within an admin chat
    pub async fn find_by_id(&self, admin_chat_id: i64, id: i64) -> Result<Option<AdminGroup>, VolleyBuddyError> {
        let group = sqlx::query_as::<_, AdminGroup>(
            "SELECT id, chat_id, admin_chat_id, group_name FROM admin_groups WHERE admin_chat_id = $1 AND id = $2"
        )
        .bind(admin_chat_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }
}
