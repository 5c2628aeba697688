//! Data models module

pub mod user;
pub mod game;
pub mod joke;
pub mod admin_group;

pub use user::{User, CreateUserRequest, UpdateUserRequest, UserWithGameStats};
pub use game::{Game, CreateGameRequest, GamePlayerDetails};
pub use joke::{Joke, JokeType};
pub use admin_group::AdminGroup;
