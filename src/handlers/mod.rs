//! Bot handlers module
//!
//! Telegram update handlers organized by type:
//! - Command objects and the registry resolving text messages
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for text dispatch and membership events

pub mod commands;
pub mod callbacks;
pub mod messages;

pub use callbacks::handle_callback_query;
pub use commands::{build_registry, Command, CommandContext, CommandRegistry};
pub use messages::{handle_left_chat_member, handle_message, handle_new_chat_members};
