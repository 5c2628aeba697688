//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod game;
pub mod game_player;
pub mod joke;
pub mod admin_group;

// Re-export repositories
pub use user::{UserRepository, RegistrationOutcome};
pub use game::GameRepository;
pub use game_player::GamePlayerRepository;
pub use joke::JokeRepository;
pub use admin_group::AdminGroupRepository;
