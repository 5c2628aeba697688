//! Database service bundling all repositories

use sqlx::PgPool;
use super::repositories::{
    UserRepository, GameRepository, GamePlayerRepository, JokeRepository, AdminGroupRepository,
};

/// One façade over the repository set, handed to the service layer.
/// Repositories are the sole mutators of persistent state.
#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub games: GameRepository,
    pub game_players: GamePlayerRepository,
    pub jokes: JokeRepository,
    pub admin_groups: AdminGroupRepository,
}

impl DatabaseService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            games: GameRepository::new(pool.clone()),
            game_players: GamePlayerRepository::new(pool.clone()),
            jokes: JokeRepository::new(pool.clone()),
            admin_groups: AdminGroupRepository::new(pool),
        }
    }
}
