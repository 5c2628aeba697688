//! Services module
//!
//! This module contains business logic services

pub mod admin_group;
pub mod auth;
pub mod game;
pub mod messenger;
pub mod notifier;
pub mod user;

// Re-export commonly used services
pub use admin_group::AdminGroupService;
pub use auth::AuthService;
pub use game::{GameService, AttendOutcome, DeclineOutcome};
pub use messenger::BotMessenger;
pub use notifier::ErrorNotifier;
pub use user::{UserService, ListFormat};

use teloxide::Bot;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::state::SessionStore;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub game_service: GameService,
    pub admin_group_service: AdminGroupService,
    pub auth_service: AuthService,
    pub messenger: BotMessenger,
    pub notifier: ErrorNotifier,
    pub sessions: SessionStore,
    pub db: DatabaseService,
    pub settings: Settings,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized. Must run
    /// inside a Tokio runtime (the notifier spawns its draining task).
    pub fn new(bot: Bot, settings: Settings, db: DatabaseService, sessions: SessionStore) -> Self {
        let messenger = BotMessenger::new(bot.clone());
        let notifier = ErrorNotifier::spawn(bot.clone(), &settings.bot.creator_ids);

        let user_service = UserService::new(db.users.clone(), db.jokes.clone());
        let game_service = GameService::new(
            db.games.clone(),
            db.game_players.clone(),
            db.users.clone(),
            db.jokes.clone(),
            messenger.clone(),
        );
        let admin_group_service = AdminGroupService::new(db.admin_groups.clone(), messenger.clone());
        let auth_service = AuthService::new(bot, settings.clone());

        Self {
            user_service,
            game_service,
            admin_group_service,
            auth_service,
            messenger,
            notifier,
            sessions,
            db,
            settings,
        }
    }
}
