//! Game and attendance models

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One scheduled session. `label` is the weekday name used both as display
/// text and as the lookup key among the chat's active games.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: i64,
    pub chat_id: i64,
    pub game_date: NaiveDate,
    pub game_starts: NaiveTime,
    pub game_ends: NaiveTime,
    pub place: String,
    pub users_limit: i32,
    pub status: bool,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub users_limit: i32,
    pub place: String,
    pub label: String,
}

/// Attendance row joined with user and game columns, as the roster views
/// consume it. `confirmed_attendance = false` is the "maybe" state;
/// declining deletes the row outright.
#[derive(Debug, Clone, FromRow)]
pub struct GamePlayerDetails {
    pub game_id: i64,
    pub user_db_id: i64,
    pub telegram_user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub confirmed_attendance: bool,
    pub is_guest: bool,
    pub game_date: NaiveDate,
    pub game_starts: NaiveTime,
    pub game_ends: NaiveTime,
    pub place: String,
    pub label: String,
    pub users_limit: i32,
}
