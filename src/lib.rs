//! VolleyBuddy Telegram Bot
//!
//! A Telegram bot that coordinates recurring volleyball games inside group
//! chats: players register, games are announced with inline attend/maybe/
//! decline buttons, admins manage rosters and guest players, and linked
//! admin chats can remote-control games in the chats they manage.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{VolleyBuddyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::SessionStore;
