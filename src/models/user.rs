//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A chat-scoped player row. Real accounts carry the Telegram id in
/// `user_id`; guest rows carry a synthetic negative id and live only as
/// long as the one game they were added to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub is_guest: bool,
    pub chat_id: i64,
    pub fullname_az: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub chat_id: i64,
    pub is_guest: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub fullname_az: Option<String>,
}

/// A member with attendance statistics over a recent window
#[derive(Debug, Clone, FromRow)]
pub struct UserWithGameStats {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub game_count: i64,
}
