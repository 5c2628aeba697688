//! Message handlers module
//!
//! Text messages are normalized and handed to the command registry;
//! membership changes get a static bilingual greeting or farewell. A
//! residual error from a command produces exactly one apology message,
//! one log entry and one creator notification.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::Message;
use tracing::{debug, error, warn};

use crate::handlers::commands::{CommandContext, CommandRegistry};
use crate::i18n::messages;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Lowercase the message and strip the `@botname` suffix from slash
/// commands so `/list@volleybuddybot` matches `/list`.
pub fn normalize_text(text: &str, bot_name: &str) -> String {
    let lowered = text.to_lowercase();
    if lowered.starts_with('/') {
        lowered.replace(&format!("@{}", bot_name.to_lowercase()), "")
    } else {
        lowered
    }
}

/// Handle an incoming text message
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    registry: Arc<CommandRegistry>,
) -> Result<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = msg.chat.id;
    let user_id = user.id.0 as i64;
    let normalized = normalize_text(text, &services.settings.bot.bot_name);
    debug!(user_id, chat_id = chat_id.0, "Processing message");

    // A row created by a button press carries the name "Unknown" until the
    // presser's first normal message fills it in.
    if let Err(e) = services
        .user_service
        .backfill_placeholder(
            user_id,
            chat_id.0,
            &user.first_name,
            user.last_name.as_deref(),
            user.username.as_deref(),
        )
        .await
    {
        warn!(user_id, chat_id = chat_id.0, error = %e, "Placeholder backfill failed");
    }

    if let Err(e) = dispatch(&bot, &msg, &user, &normalized, &services, &registry).await {
        error!(
            chat_id = chat_id.0,
            user_id,
            text = %normalized,
            error = %e,
            "Message handling failed"
        );
        services
            .notifier
            .notify(format!("Command: {normalized} | Chat: {}", chat_id.0), &e);
        if let Err(e) = services
            .messenger
            .send_text(chat_id, messages::ERROR_OCCURRED, msg.thread_id)
            .await
        {
            error!(chat_id = chat_id.0, error = %e, "Failed to send apology");
        }
    }

    Ok(())
}

async fn dispatch(
    bot: &Bot,
    msg: &Message,
    user: &teloxide::types::User,
    normalized: &str,
    services: &ServiceFactory,
    registry: &CommandRegistry,
) -> Result<bool> {
    let chat_id = msg.chat.id;
    let user_id = user.id.0 as i64;

    // Role is resolved live so a promotion applies on the very next message
    let is_admin = services.auth_service.is_chat_admin(chat_id, user.id).await?;
    let is_creator = services.auth_service.is_creator(user_id);

    let ctx = CommandContext {
        bot: bot.clone(),
        chat_id,
        user: user.clone(),
        user_id,
        text: normalized.to_string(),
        thread_id: msg.thread_id,
        is_admin,
        is_creator,
        services: services.clone(),
    };

    registry.execute(&ctx).await
}

/// Greet every human joining the chat
pub async fn handle_new_chat_members(msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(members) = msg.new_chat_members() else {
        return Ok(());
    };

    for member in members {
        if member.is_bot {
            continue;
        }
        debug!(user_id = member.id.0, chat_id = msg.chat.id.0, "New member joined chat");
        services
            .messenger
            .send_text(
                msg.chat.id,
                format!(
                    "Добро пожаловать, {name}! 👋\nXoş gəlmisiniz! 🏐\n\n\
                     Используйте /register для регистрации\n\
                     Qeydiyyatdan keçmək üçün /register istifadə edin",
                    name = member.first_name
                ),
                msg.thread_id,
            )
            .await?;
    }

    Ok(())
}

/// See a departing human off
pub async fn handle_left_chat_member(msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(member) = msg.left_chat_member() else {
        return Ok(());
    };
    if member.is_bot {
        return Ok(());
    }

    debug!(user_id = member.id.0, chat_id = msg.chat.id.0, "Member left chat");
    services
        .messenger
        .send_text(
            msg.chat.id,
            format!(
                "{name} покинул(а) чат. Прощай! 👋\n{name} çatı tərk etdi. Sağ olun! 👋",
                name = member.first_name
            ),
            msg.thread_id,
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_commands_lose_the_botname_suffix() {
        assert_eq!(normalize_text("/List@VolleyBuddyBot", "volleybuddybot"), "/list");
        assert_eq!(
            normalize_text("/startgame@volleybuddybot 01.01.2025/18:00/20:00/2/Зал/среда", "volleybuddybot"),
            "/startgame 01.01.2025/18:00/20:00/2/зал/среда"
        );
    }

    #[test]
    fn plain_text_is_only_lowercased() {
        assert_eq!(normalize_text("Всем Привет", "volleybuddybot"), "всем привет");
        // the botname stays in ordinary chatter
        assert_eq!(
            normalize_text("пингую @volleybuddybot", "volleybuddybot"),
            "пингую @volleybuddybot"
        );
    }
}
