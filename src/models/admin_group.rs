//! Admin group link model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Associates an admin chat with one managed chat. The pair
/// `(chat_id, admin_chat_id)` is unique; inserts are idempotent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminGroup {
    pub id: i64,
    pub chat_id: i64,
    pub admin_chat_id: i64,
    pub group_name: String,
}
