//! User repository implementation

use sqlx::PgPool;
use crate::models::user::{User, CreateUserRequest, UpdateUserRequest, UserWithGameStats};
use crate::utils::errors::VolleyBuddyError;

/// Outcome of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A brand new user row was created
    Registered,
    /// The account already existed and was linked to this chat
    AddedToGroup,
    /// The account is already a member of this chat
    AlreadyInGroup,
}

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a user, linking an existing account to the chat if needed
    pub async fn add_user(&self, request: CreateUserRequest) -> Result<RegistrationOutcome, VolleyBuddyError> {
        let existing = sqlx::query_as::<_, User>(
            "SELECT id, user_id, first_name, last_name, username, is_guest, chat_id, fullname_az, active FROM users WHERE user_id = $1"
        )
        .bind(request.user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user) = existing {
            let in_group: Option<(i64,)> = sqlx::query_as(
                "SELECT user_id FROM group_users WHERE user_id = $1 AND chat_id = $2"
            )
            .bind(user.id)
            .bind(request.chat_id)
            .fetch_optional(&self.pool)
            .await?;

            if in_group.is_some() {
                return Ok(RegistrationOutcome::AlreadyInGroup);
            }

            sqlx::query("INSERT INTO group_users (user_id, chat_id, chat_role) VALUES ($1, $2, 'game')")
                .bind(user.id)
                .bind(request.chat_id)
                .execute(&self.pool)
                .await?;

            return Ok(RegistrationOutcome::AddedToGroup);
        }

        let inserted: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (user_id, first_name, last_name, username, chat_id, is_guest, active)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE)
            RETURNING id
            "#
        )
        .bind(request.user_id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.username)
        .bind(request.chat_id)
        .bind(request.is_guest)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query("INSERT INTO group_users (user_id, chat_id, chat_role) VALUES ($1, $2, 'game')")
            .bind(inserted.0)
            .bind(request.chat_id)
            .execute(&self.pool)
            .await?;

        Ok(RegistrationOutcome::Registered)
    }

    /// All active non-guest members of a chat, in registration order
    pub async fn get_users(&self, chat_id: i64) -> Result<Vec<User>, VolleyBuddyError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.user_id, u.first_name, u.last_name, u.username, u.is_guest, u.chat_id, u.fullname_az, u.active
            FROM group_users gu
            LEFT JOIN users u ON gu.user_id = u.id
            WHERE gu.chat_id = $1 AND u.is_guest = FALSE AND u.active = TRUE
            ORDER BY gu.user_id
            "#
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Members of a chat sorted by first name, for the admin listings
    pub async fn get_users_by_chat_id(&self, chat_id: i64) -> Result<Vec<User>, VolleyBuddyError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.user_id, u.first_name, u.last_name, u.username, u.is_guest, u.chat_id, u.fullname_az, u.active
            FROM group_users gu
            LEFT JOIN users u ON gu.user_id = u.id
            WHERE gu.chat_id = $1 AND u.is_guest = FALSE AND u.active = TRUE
            ORDER BY u.first_name
            "#
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Find a user by Telegram account id across all chats (first row)
    pub async fn find_by_telegram_id(&self, user_id: i64) -> Result<Option<User>, VolleyBuddyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, user_id, first_name, last_name, username, is_guest, chat_id, fullname_az, active FROM users WHERE user_id = $1 ORDER BY id LIMIT 1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user names by internal id
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<Option<User>, VolleyBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                fullname_az = COALESCE($4, fullname_az)
            WHERE id = $1
            RETURNING id, user_id, first_name, last_name, username, is_guest, chat_id, fullname_az, active
            "#
        )
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.fullname_az)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Fill in the real profile names on a row that was created as a
    /// placeholder by a button press. No-op for rows with a real name.
    pub async fn backfill_placeholder(
        &self,
        user_id: i64,
        chat_id: i64,
        first_name: &str,
        last_name: Option<&str>,
        username: Option<&str>,
    ) -> Result<bool, VolleyBuddyError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $3, last_name = $4, username = $5
            WHERE user_id = $1 AND chat_id = $2 AND first_name = 'Unknown'
            "#
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(first_name)
        .bind(last_name)
        .bind(username)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Create a disposable guest row. The synthetic account id is negative
    /// so it can never collide with a real Telegram id.
    pub async fn add_guest(&self, chat_id: i64, first_name: &str, last_name: &str) -> Result<i64, VolleyBuddyError> {
        let inserted: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (user_id, chat_id, is_guest, first_name, last_name, active)
            VALUES (-((SELECT COALESCE(MAX(id), 0) FROM users) + 1), $1, TRUE, $2, $3, TRUE)
            RETURNING id
            "#
        )
        .bind(chat_id)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted.0)
    }

    /// Uniformly random active member of a chat
    pub async fn get_random_user(&self, chat_id: i64) -> Result<Option<User>, VolleyBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_id, first_name, last_name, username, is_guest, chat_id, fullname_az, active
            FROM users
            WHERE chat_id = $1 AND is_guest = FALSE AND active = TRUE
            ORDER BY RANDOM() LIMIT 1
            "#
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Members who joined fewer than two games within the last two months
    pub async fn get_inactive_users(&self, chat_id: i64) -> Result<Vec<UserWithGameStats>, VolleyBuddyError> {
        let users = sqlx::query_as::<_, UserWithGameStats>(
            r#"
            SELECT u.user_id, u.first_name, u.last_name, u.username, COUNT(gu.game_id) AS game_count
            FROM users u
            LEFT JOIN game_users gu ON gu.user_id = u.id
              AND gu.participate_time >= NOW() - INTERVAL '2 months'
            WHERE u.chat_id = $1 AND u.is_guest = FALSE AND u.active = TRUE
            GROUP BY u.user_id, u.first_name, u.last_name, u.username
            HAVING COUNT(gu.game_id) < 2
            ORDER BY game_count ASC
            "#
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
