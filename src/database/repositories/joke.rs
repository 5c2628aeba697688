//! Joke repository implementation

use sqlx::PgPool;
use crate::models::joke::{Joke, JokeType};
use crate::utils::errors::VolleyBuddyError;

#[derive(Debug, Clone)]
pub struct JokeRepository {
    pool: PgPool,
}

impl JokeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Pick one joke of a category uniformly at random
    pub async fn random_joke(&self, joke_type: JokeType) -> Result<Option<String>, VolleyBuddyError> {
        let joke: Option<(String,)> = sqlx::query_as(
            "SELECT joke FROM jokes WHERE type = $1 ORDER BY RANDOM() LIMIT 1"
        )
        .bind(joke_type.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        Ok(joke.map(|j| j.0))
    }

    /// All jokes of one category
    pub async fn get_jokes(&self, joke_type: JokeType) -> Result<Vec<Joke>, VolleyBuddyError> {
        let jokes = sqlx::query_as::<_, Joke>(
            "SELECT id, joke, type FROM jokes WHERE type = $1 ORDER BY id"
        )
        .bind(joke_type.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(jokes)
    }

    pub async fn add_joke(&self, joke: &str, joke_type: JokeType) -> Result<(), VolleyBuddyError> {
        sqlx::query("INSERT INTO jokes (joke, type) VALUES ($1, $2)")
            .bind(joke)
            .bind(joke_type.as_i32())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_joke(&self, id: i64, joke: &str, joke_type: JokeType) -> Result<bool, VolleyBuddyError> {
        let result = sqlx::query("UPDATE jokes SET joke = $1, type = $2 WHERE id = $3")
            .bind(joke)
            .bind(joke_type.as_i32())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_joke(&self, id: i64) -> Result<bool, VolleyBuddyError> {
        let result = sqlx::query("DELETE FROM jokes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
