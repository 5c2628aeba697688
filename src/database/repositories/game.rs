//! Game repository implementation

use chrono::NaiveTime;
use sqlx::PgPool;
use crate::models::game::{Game, CreateGameRequest};
use crate::utils::errors::VolleyBuddyError;

#[derive(Debug, Clone)]
pub struct GameRepository {
    pool: PgPool,
}

impl GameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All active games of a chat
    pub async fn get_games(&self, chat_id: i64) -> Result<Vec<Game>, VolleyBuddyError> {
        let games = sqlx::query_as::<_, Game>(
            "SELECT id, chat_id, game_date, game_starts, game_ends, place, users_limit, status, label FROM games WHERE chat_id = $1 AND status = TRUE ORDER BY game_date, id"
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    /// Start times and labels of the chat's active games
    pub async fn get_game_times(&self, chat_id: i64) -> Result<Vec<(NaiveTime, String)>, VolleyBuddyError> {
        let times: Vec<(NaiveTime, String)> = sqlx::query_as(
            "SELECT game_starts, label FROM games WHERE chat_id = $1 AND status = TRUE ORDER BY game_date, id"
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(times)
    }

    /// Create a game, or refresh an existing one announced with identical
    /// parameters: re-announcing the natural key updates limit/label and
    /// reactivates instead of duplicating.
    pub async fn add_game(&self, chat_id: i64, request: &CreateGameRequest) -> Result<i64, VolleyBuddyError> {
        let inserted: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO games (game_date, game_starts, game_ends, users_limit, place, chat_id, status, label)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
            ON CONFLICT (chat_id, game_date, game_starts, game_ends, place) DO UPDATE SET
                users_limit = EXCLUDED.users_limit,
                status = TRUE,
                label = EXCLUDED.label
            RETURNING id
            "#
        )
        .bind(request.date)
        .bind(request.start)
        .bind(request.end)
        .bind(request.users_limit)
        .bind(&request.place)
        .bind(chat_id)
        .bind(&request.label)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted.0)
    }

    /// Soft-close a game, returning its label if it existed
    pub async fn deactivate_game(&self, game_id: i64) -> Result<Option<String>, VolleyBuddyError> {
        let label: Option<(String,)> = sqlx::query_as(
            "UPDATE games SET status = FALSE WHERE id = $1 RETURNING label"
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(label.map(|l| l.0))
    }

    /// Reactivate the most recently closed game of a chat
    pub async fn activate_last_closed(&self, chat_id: i64) -> Result<Option<String>, VolleyBuddyError> {
        let label: Option<(String,)> = sqlx::query_as(
            r#"
            UPDATE games SET status = TRUE
            WHERE id = (
                SELECT id FROM games
                WHERE chat_id = $1 AND status = FALSE
                ORDER BY id DESC LIMIT 1
            )
            RETURNING label
            "#
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(label.map(|l| l.0))
    }

    /// Change the capacity of the active game matching a label
    pub async fn change_limit(&self, chat_id: i64, label: &str, limit: i32) -> Result<Option<String>, VolleyBuddyError> {
        let updated: Option<(String,)> = sqlx::query_as(
            r#"
            UPDATE games SET users_limit = $1
            WHERE id = (
                SELECT id FROM games
                WHERE chat_id = $2 AND LOWER(label) = LOWER($3) AND status = TRUE
                ORDER BY id DESC LIMIT 1
            )
            RETURNING label
            "#
        )
        .bind(limit)
        .bind(chat_id)
        .bind(label)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated.map(|l| l.0))
    }

    /// Whether a game is open for sign-ups. Missing games read as closed.
    pub async fn check_game_status(&self, game_id: i64) -> Result<bool, VolleyBuddyError> {
        let status: Option<(bool,)> = sqlx::query_as(
            "SELECT status FROM games WHERE id = $1"
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.map(|s| s.0).unwrap_or(false))
    }

    /// Case-insensitive label lookup among the chat's active games; when
    /// several share a label the most recently created one wins.
    pub async fn find_active_by_label(&self, chat_id: i64, label: &str) -> Result<Option<Game>, VolleyBuddyError> {
        let game = sqlx::query_as::<_, Game>(
            r#"
            SELECT id, chat_id, game_date, game_starts, game_ends, place, users_limit, status, label
            FROM games
            WHERE chat_id = $1 AND LOWER(label) = LOWER($2) AND status = TRUE
            ORDER BY id DESC LIMIT 1
            "#
        )
        .bind(chat_id)
        .bind(label)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }
}
