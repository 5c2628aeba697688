//! Game player repository: the attendance rows behind the roster state
//! machine. At most one row exists per (game, user) pair; repeated sign-ups
//! update `confirmed_attendance` in place and declining deletes the row.

use sqlx::PgPool;
use crate::models::game::GamePlayerDetails;
use crate::utils::errors::VolleyBuddyError;

const DETAILS_COLUMNS: &str = r#"
    gu.game_id, u.id AS user_db_id, u.user_id AS telegram_user_id,
    u.first_name, u.last_name, u.username, gu.confirmed_attendance, u.is_guest,
    g.game_date, g.game_starts, g.game_ends, g.place, g.label, g.users_limit
"#;

#[derive(Debug, Clone)]
pub struct GamePlayerRepository {
    pool: PgPool,
}

impl GamePlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All players of the chat's active games, in participation order
    pub async fn get_game_players(&self, chat_id: i64) -> Result<Vec<GamePlayerDetails>, VolleyBuddyError> {
        let query = format!(
            r#"
            SELECT {DETAILS_COLUMNS}
            FROM game_users gu
            LEFT JOIN users u ON gu.user_id = u.id
            LEFT JOIN games g ON gu.game_id = g.id
            WHERE g.chat_id = $1 AND g.status = TRUE
            ORDER BY g.game_date, gu.participate_time
            "#
        );
        let players = sqlx::query_as::<_, GamePlayerDetails>(&query)
            .bind(chat_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(players)
    }

    /// Undecided players across all of the chat's active games
    pub async fn get_undecided_players(&self, chat_id: i64) -> Result<Vec<GamePlayerDetails>, VolleyBuddyError> {
        let query = format!(
            r#"
            SELECT {DETAILS_COLUMNS}
            FROM game_users gu
            LEFT JOIN users u ON gu.user_id = u.id
            LEFT JOIN games g ON gu.game_id = g.id
            WHERE g.chat_id = $1 AND g.status = TRUE AND gu.confirmed_attendance = FALSE
            ORDER BY g.game_date, gu.participate_time
            "#
        );
        let players = sqlx::query_as::<_, GamePlayerDetails>(&query)
            .bind(chat_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(players)
    }

    /// Undecided players of one game, located by label
    pub async fn get_undecided_by_label(&self, chat_id: i64, label: &str) -> Result<Vec<GamePlayerDetails>, VolleyBuddyError> {
        self.players_by_label(chat_id, label, Some(false), false).await
    }

    /// Confirmed players of one game, located by label
    pub async fn get_confirmed_by_label(&self, chat_id: i64, label: &str) -> Result<Vec<GamePlayerDetails>, VolleyBuddyError> {
        self.players_by_label(chat_id, label, Some(true), false).await
    }

    /// Guests of one game, located by label, regardless of attendance state
    pub async fn get_guests_by_label(&self, chat_id: i64, label: &str) -> Result<Vec<GamePlayerDetails>, VolleyBuddyError> {
        self.players_by_label(chat_id, label, None, true).await
    }

    async fn players_by_label(
        &self,
        chat_id: i64,
        label: &str,
        confirmed: Option<bool>,
        guests_only: bool,
    ) -> Result<Vec<GamePlayerDetails>, VolleyBuddyError> {
        let mut filter = String::new();
        if confirmed.is_some() {
            filter.push_str(" AND gu.confirmed_attendance = $3");
        }
        if guests_only {
            filter.push_str(" AND u.is_guest = TRUE");
        }
        let query = format!(
            r#"
            SELECT {DETAILS_COLUMNS}
            FROM game_users gu
            LEFT JOIN users u ON gu.user_id = u.id
            LEFT JOIN games g ON gu.game_id = g.id
            WHERE g.chat_id = $1 AND g.status = TRUE AND LOWER(g.label) = LOWER($2){filter}
            ORDER BY gu.participate_time
            "#
        );

        let mut q = sqlx::query_as::<_, GamePlayerDetails>(&query)
            .bind(chat_id)
            .bind(label);
        if let Some(confirmed) = confirmed {
            q = q.bind(confirmed);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Upsert the attendance row for a button press, creating a placeholder
    /// user row when the presser has never been seen in this chat. Returns
    /// the game label for the confirmation text, or None for a missing game.
    pub async fn upsert_attendance(
        &self,
        game_id: i64,
        chat_id: i64,
        telegram_user_id: i64,
        confirmed: bool,
    ) -> Result<Option<String>, VolleyBuddyError> {
        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM users WHERE user_id = $1 AND chat_id = $2"
        )
        .bind(telegram_user_id)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        let user_db_id = match existing {
            Some((id,)) => id,
            None => {
                // Real profile names arrive with the user's next message
                let inserted: (i64,) = sqlx::query_as(
                    r#"
                    INSERT INTO users (user_id, first_name, last_name, username, chat_id, active)
                    VALUES ($1, 'Unknown', '', '', $2, TRUE)
                    RETURNING id
                    "#
                )
                .bind(telegram_user_id)
                .bind(chat_id)
                .fetch_one(&self.pool)
                .await?;
                inserted.0
            }
        };

        sqlx::query(
            r#"
            INSERT INTO game_users (user_id, game_id, participate_time, confirmed_attendance)
            VALUES ($1, $2, NOW(), $3)
            ON CONFLICT (user_id, game_id) DO UPDATE SET confirmed_attendance = EXCLUDED.confirmed_attendance
            "#
        )
        .bind(user_db_id)
        .bind(game_id)
        .bind(confirmed)
        .execute(&self.pool)
        .await?;

        let label: Option<(String,)> = sqlx::query_as("SELECT label FROM games WHERE id = $1")
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(label.map(|l| l.0))
    }

    /// Attach an already-created user row (a guest) to a game
    pub async fn insert_attendance(&self, user_db_id: i64, game_id: i64, confirmed: bool) -> Result<(), VolleyBuddyError> {
        sqlx::query(
            r#"
            INSERT INTO game_users (user_id, game_id, participate_time, confirmed_attendance)
            VALUES ($1, $2, NOW(), $3)
            ON CONFLICT (user_id, game_id) DO UPDATE SET confirmed_attendance = EXCLUDED.confirmed_attendance
            "#
        )
        .bind(user_db_id)
        .bind(game_id)
        .bind(confirmed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a player from a game. Returns the game label when a row was
    /// actually deleted; None means the player never was in the game.
    pub async fn remove_player(
        &self,
        game_id: i64,
        telegram_user_id: i64,
        chat_id: i64,
    ) -> Result<Option<String>, VolleyBuddyError> {
        let user: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM users WHERE user_id = $1 AND chat_id = $2"
        )
        .bind(telegram_user_id)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((user_db_id,)) = user else {
            return Ok(None);
        };

        let deleted = sqlx::query("DELETE FROM game_users WHERE user_id = $1 AND game_id = $2")
            .bind(user_db_id)
            .bind(game_id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Ok(None);
        }

        let label: Option<(String,)> = sqlx::query_as("SELECT label FROM games WHERE id = $1")
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(label.map(|l| l.0))
    }

    /// Flip one attendance row. Returns false when the pair has no row.
    pub async fn set_attendance(&self, game_id: i64, user_db_id: i64, confirmed: bool) -> Result<bool, VolleyBuddyError> {
        let result = sqlx::query(
            "UPDATE game_users SET confirmed_attendance = $1 WHERE game_id = $2 AND user_id = $3"
        )
        .bind(confirmed)
        .bind(game_id)
        .bind(user_db_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a guest from its game together with the guest's user row.
    /// Rows not flagged `is_guest` are left untouched and report not-found.
    pub async fn delete_guest(&self, game_id: i64, user_db_id: i64) -> Result<bool, VolleyBuddyError> {
        let guest: Option<(bool,)> = sqlx::query_as("SELECT is_guest FROM users WHERE id = $1")
            .bind(user_db_id)
            .fetch_optional(&self.pool)
            .await?;

        if !matches!(guest, Some((true,))) {
            return Ok(false);
        }

        let deleted = sqlx::query("DELETE FROM game_users WHERE game_id = $1 AND user_id = $2")
            .bind(game_id)
            .bind(user_db_id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM users WHERE id = $1 AND is_guest = TRUE")
            .bind(user_db_id)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }
}
