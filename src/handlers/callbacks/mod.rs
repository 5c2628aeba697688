//! Callback query handlers
//!
//! Inline-button payloads are matched by prefix against the fixed payload
//! grammar. Numeric fields that fail to parse are coerced to 0 and the
//! handler proceeds; ids start at 1, so a zero id never matches a row.
//! Handler errors are logged at the top level and never crash dispatch.

use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, User as TelegramUser};
use tracing::{debug, error, info};

use crate::i18n::declension::{decline_ru, RuCase};
use crate::i18n::messages;
use crate::models::user::CreateUserRequest;
use crate::services::{AttendOutcome, DeclineOutcome, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::format::tag_users_by_commas;

/// Numeric suffix after a prefix; malformed input reads as game id 0
pub fn parse_id_suffix(data: &str, prefix: &str) -> i64 {
    data.strip_prefix(prefix)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// The two underscore-delimited numeric fields of `<action>_<a>_<b>`
/// payloads; malformed fields read as 0
pub fn parse_two_ids(data: &str) -> (i64, i64) {
    let parts: Vec<&str> = data.split('_').collect();
    let first = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
    let second = parts.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);
    (first, second)
}

/// How a presser is addressed in group confirmations
fn display_handle(user: &TelegramUser) -> String {
    match &user.username {
        Some(handle) if !handle.is_empty() => format!("@{handle}"),
        _ => user.first_name.clone(),
    }
}

/// Main callback query dispatcher
pub async fn handle_callback_query(query: CallbackQuery, services: ServiceFactory) -> Result<()> {
    let user = query.from.clone();
    let user_id = user.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    let Some(data) = query.data.clone() else {
        return Ok(());
    };
    debug!(user_id, chat_id = chat_id.0, callback_data = %data, "Processing callback query");

    // Clear the button's loading state up front; the private-message
    // reveal answers for itself with a toast.
    if !data.starts_with("showPrivate_") {
        services.messenger.answer_callback(&query.id, None).await;
    }

    if let Err(e) = route(&query, &data, chat_id, &user, &services).await {
        error!(user_id, callback_data = %data, error = %e, "Callback handling failed");
    }

    Ok(())
}

async fn route(
    query: &CallbackQuery,
    data: &str,
    chat_id: ChatId,
    user: &TelegramUser,
    services: &ServiceFactory,
) -> Result<()> {
    let user_id = user.id.0 as i64;

    if data.starts_with("appointment_") {
        let game_id = parse_id_suffix(data, "appointment_");
        handle_attend(services, chat_id, game_id, user).await
    } else if data.starts_with("notconfirmed_") {
        let game_id = parse_id_suffix(data, "notconfirmed_");
        handle_maybe(services, chat_id, game_id, user).await
    } else if data.starts_with("decline_") {
        let game_id = parse_id_suffix(data, "decline_");
        handle_decline(services, chat_id, game_id, user).await
    } else if data.starts_with("privateAppointment_") {
        let (target_chat, game_id) = parse_two_ids(data);
        handle_attend(services, ChatId(target_chat), game_id, user).await
    } else if data.starts_with("privateNotconfirmed_") {
        let (target_chat, game_id) = parse_two_ids(data);
        handle_maybe(services, ChatId(target_chat), game_id, user).await
    } else if data.starts_with("privateDecline_") {
        let (target_chat, game_id) = parse_two_ids(data);
        handle_decline(services, ChatId(target_chat), game_id, user).await
    } else if data.starts_with("deactivegame_") {
        let game_id = parse_id_suffix(data, "deactivegame_");
        if let Some(label) = services.game_service.deactivate_by_id(game_id).await? {
            info!(game_id, %label, "Game deactivated via button");
            services
                .messenger
                .send_text(
                    chat_id,
                    format!("Игра на {} закрыта!", decline_ru(&label, RuCase::Accusative)),
                    None,
                )
                .await?;
        }
        Ok(())
    } else if data.starts_with("confirmplayer_") {
        let (game_id, user_db_id) = parse_two_ids(data);
        let text = if services.game_service.confirm_player(game_id, user_db_id).await? {
            "Игрок подтверждён ✅".to_string()
        } else {
            "Не нашлось кого подтверждать".to_string()
        };
        services.messenger.send_text(chat_id, text, None).await?;
        Ok(())
    } else if data.starts_with("unconfirmplayer_") {
        let (game_id, user_db_id) = parse_two_ids(data);
        let text = if services.game_service.unconfirm_player(game_id, user_db_id).await? {
            "Игрок снова под вопросом ❓".to_string()
        } else {
            "Не нашлось кого разжаловать".to_string()
        };
        services.messenger.send_text(chat_id, text, None).await?;
        Ok(())
    } else if data.starts_with("deleteguest_") {
        let (game_id, user_db_id) = parse_two_ids(data);
        let text = match services.game_service.delete_guest(game_id, user_db_id).await? {
            Some(joke) => format!("Гость удалён с игры. {joke}").trim_end().to_string(),
            None => "Гость не найден".to_string(),
        };
        services.messenger.send_text(chat_id, text, None).await?;
        Ok(())
    } else if data.starts_with("selectedGroupForStartGame_") {
        let target = parse_id_suffix(data, "selectedGroupForStartGame_");
        handle_selected_start_game(services, chat_id, target, user).await
    } else if data.starts_with("selectedGroupForDeactiveGame_") {
        let target = parse_id_suffix(data, "selectedGroupForDeactiveGame_");
        handle_selected_deactivate(services, chat_id, target, user).await
    } else if data.starts_with("selectedGroupForShowUsers_") {
        let target = parse_id_suffix(data, "selectedGroupForShowUsers_");
        handle_selected_show_users(services, chat_id, target, user).await
    } else if data.starts_with("selectedGroupForTagGamers_") {
        let target = parse_id_suffix(data, "selectedGroupForTagGamers_");
        handle_selected_tag_gamers(services, chat_id, target, user).await
    } else if data.starts_with("showPrivate_") {
        handle_show_private(services, query, data, user).await
    } else if data == "showgames" {
        services.game_service.show_games(chat_id, None).await;
        Ok(())
    } else if data == "list" {
        services.game_service.show_game_players(chat_id, None).await;
        Ok(())
    } else if data == "register" {
        let request = CreateUserRequest {
            user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            chat_id: chat_id.0,
            is_guest: false,
        };
        let result = services.user_service.register_user(request).await;
        services.messenger.send_text(chat_id, result, None).await?;
        Ok(())
    } else if data == "agilliol" {
        let result = services.user_service.random_user_message(chat_id.0).await;
        services.messenger.send_html(chat_id, result, None).await?;
        Ok(())
    } else {
        debug!(callback_data = %data, "Unknown callback payload");
        Ok(())
    }
}

async fn handle_attend(
    services: &ServiceFactory,
    chat_id: ChatId,
    game_id: i64,
    user: &TelegramUser,
) -> Result<()> {
    let handle = display_handle(user);
    match services
        .game_service
        .attend(game_id, chat_id.0, user.id.0 as i64)
        .await?
    {
        AttendOutcome::Closed => {
            services
                .messenger
                .send_text(chat_id, format!("{handle} куда ты прёшь? Игра закрыта!"), None)
                .await?;
        }
        AttendOutcome::Joined(label) => {
            services
                .messenger
                .send_text(
                    chat_id,
                    format!("{handle} вы записались на {}!", decline_ru(&label, RuCase::Accusative)),
                    None,
                )
                .await?;
        }
        AttendOutcome::GameMissing => {}
    }
    Ok(())
}

async fn handle_maybe(
    services: &ServiceFactory,
    chat_id: ChatId,
    game_id: i64,
    user: &TelegramUser,
) -> Result<()> {
    let handle = display_handle(user);
    if let Some(label) = services
        .game_service
        .maybe(game_id, chat_id.0, user.id.0 as i64)
        .await?
    {
        services
            .messenger
            .send_text(
                chat_id,
                format!(
                    "{handle} вы записались на {}! Но это не точно 😒",
                    decline_ru(&label, RuCase::Accusative)
                ),
                None,
            )
            .await?;
    }
    Ok(())
}

async fn handle_decline(
    services: &ServiceFactory,
    chat_id: ChatId,
    game_id: i64,
    user: &TelegramUser,
) -> Result<()> {
    let handle = display_handle(user);
    match services
        .game_service
        .decline(game_id, chat_id.0, user.id.0 as i64)
        .await?
    {
        DeclineOutcome::Left { label, joke } => {
            let text = format!(
                "{handle} удирает с игры на {}. {joke}",
                decline_ru(&label, RuCase::Accusative)
            )
            .trim_end()
            .to_string();
            services.messenger.send_text(chat_id, text, None).await?;
        }
        DeclineOutcome::NotInGame => {
            services
                .messenger
                .send_text(chat_id, format!("{handle} минусует"), None)
                .await?;
        }
    }
    Ok(())
}

/// Link and live target-chat admin role must both hold for a cross-group
/// selection to proceed
async fn verify_group_selection(
    services: &ServiceFactory,
    admin_chat_id: ChatId,
    target_chat_id: i64,
    user: &TelegramUser,
) -> Result<bool> {
    if !services
        .admin_group_service
        .is_linked(admin_chat_id.0, target_chat_id)
        .await?
    {
        services
            .messenger
            .send_text(admin_chat_id, messages::NOT_ADMIN_OF_SELECTED, None)
            .await?;
        return Ok(false);
    }

    let is_admin = services
        .auth_service
        .is_chat_admin(ChatId(target_chat_id), user.id)
        .await
        .unwrap_or(false);
    if !is_admin {
        services
            .messenger
            .send_text(admin_chat_id, messages::NOT_ADMIN_OF_SELECTED, None)
            .await?;
        return Ok(false);
    }

    Ok(true)
}

async fn handle_selected_start_game(
    services: &ServiceFactory,
    admin_chat_id: ChatId,
    target_chat_id: i64,
    user: &TelegramUser,
) -> Result<()> {
    if !verify_group_selection(services, admin_chat_id, target_chat_id, user).await? {
        return Ok(());
    }

    services
        .sessions
        .select_chat(admin_chat_id.0, target_chat_id)
        .await?;

    services
        .messenger
        .send_text(
            admin_chat_id,
            "Введите данные игры в формате:\n\
             /startgame дата/время начала/время конца/лимит/место/день недели\n\n\
             Пример: /startgame 01.01.2025/18:00/20:00/12/Спортзал/понедельник",
            None,
        )
        .await?;
    Ok(())
}

async fn handle_selected_deactivate(
    services: &ServiceFactory,
    admin_chat_id: ChatId,
    target_chat_id: i64,
    user: &TelegramUser,
) -> Result<()> {
    if !verify_group_selection(services, admin_chat_id, target_chat_id, user).await? {
        return Ok(());
    }

    let games = services.game_service.active_games(target_chat_id).await?;
    if games.is_empty() {
        services
            .messenger
            .send_text(admin_chat_id, "Нет активных игр", None)
            .await?;
        return Ok(());
    }

    let rows: Vec<Vec<InlineKeyboardButton>> = games
        .iter()
        .map(|game| {
            vec![InlineKeyboardButton::callback(
                format!("{} ({})", game.label, game.game_date.format("%d.%m.%Y")),
                format!("deactivegame_{}", game.id),
            )]
        })
        .collect();

    services
        .messenger
        .send_with_keyboard(
            admin_chat_id,
            "Выберите игру для закрытия:",
            InlineKeyboardMarkup::new(rows),
            None,
        )
        .await?;
    Ok(())
}

async fn handle_selected_show_users(
    services: &ServiceFactory,
    admin_chat_id: ChatId,
    target_chat_id: i64,
    user: &TelegramUser,
) -> Result<()> {
    if !verify_group_selection(services, admin_chat_id, target_chat_id, user).await? {
        return Ok(());
    }

    let users = services.user_service.users_of_chat(target_chat_id).await?;
    if users.is_empty() {
        services
            .messenger
            .send_text(admin_chat_id, messages::NO_REGISTERED_USERS, None)
            .await?;
        return Ok(());
    }

    let list = users
        .iter()
        .enumerate()
        .map(|(idx, u)| {
            let last_name = u.last_name.as_deref().unwrap_or_default();
            let az = u
                .fullname_az
                .as_deref()
                .filter(|az| !az.is_empty())
                .map(|az| format!(" ({az})"))
                .unwrap_or_default();
            format!("{}. {} {}{}", idx + 1, u.first_name, last_name, az)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n");

    services
        .messenger
        .send_text(admin_chat_id, format!("Пользователи группы:\n\n{list}"), None)
        .await?;
    Ok(())
}

async fn handle_selected_tag_gamers(
    services: &ServiceFactory,
    admin_chat_id: ChatId,
    target_chat_id: i64,
    user: &TelegramUser,
) -> Result<()> {
    if !verify_group_selection(services, admin_chat_id, target_chat_id, user).await? {
        return Ok(());
    }

    let users = services.user_service.users_of_chat(target_chat_id).await?;
    if users.is_empty() {
        services
            .messenger
            .send_text(admin_chat_id, messages::NO_REGISTERED_USERS, None)
            .await?;
        return Ok(());
    }

    services
        .messenger
        .send_html(
            ChatId(target_chat_id),
            format!("Эй, игроки! {}", tag_users_by_commas(&users)),
            None,
        )
        .await?;
    Ok(())
}

/// One-time delivery of a pending private message. Only the handle the
/// message was stashed for can collect it; the entry is consumed on read.
async fn handle_show_private(
    services: &ServiceFactory,
    query: &CallbackQuery,
    data: &str,
    user: &TelegramUser,
) -> Result<()> {
    let Some(username) = user.username.as_deref().filter(|u| !u.is_empty()) else {
        services
            .messenger
            .answer_callback(&query.id, Some("У вас нет username"))
            .await;
        return Ok(());
    };

    let target_username = data.strip_prefix("showPrivate_").unwrap_or("");
    if target_username != username {
        services
            .messenger
            .answer_callback(&query.id, Some("Это сообщение не для вас!"))
            .await;
        return Ok(());
    }

    let Some(message) = services.sessions.take_private_message(username).await? else {
        services
            .messenger
            .answer_callback(&query.id, Some("Сообщение не найдено"))
            .await;
        return Ok(());
    };

    services
        .messenger
        .send_private(user.id.0 as i64, &format!("Личное сообщение:\n\n{message}"))
        .await;
    services
        .messenger
        .answer_callback(&query.id, Some("Сообщение отправлено в личку!"))
        .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_suffix_parses_and_coerces() {
        assert_eq!(parse_id_suffix("appointment_42", "appointment_"), 42);
        assert_eq!(parse_id_suffix("deactivegame_7", "deactivegame_"), 7);
        // malformed suffixes read as 0 and proceed
        assert_eq!(parse_id_suffix("appointment_abc", "appointment_"), 0);
        assert_eq!(parse_id_suffix("appointment_", "appointment_"), 0);
        assert_eq!(parse_id_suffix("unrelated_42", "appointment_"), 0);
    }

    #[test]
    fn two_id_payloads_parse_and_coerce() {
        assert_eq!(parse_two_ids("privateAppointment_-100500_42"), (-100500, 42));
        assert_eq!(parse_two_ids("confirmplayer_5_7"), (5, 7));
        assert_eq!(parse_two_ids("privateDecline_x_42"), (0, 42));
        assert_eq!(parse_two_ids("privateDecline_-1"), (-1, 0));
        assert_eq!(parse_two_ids("nounderscores"), (0, 0));
    }

    #[test]
    fn display_handle_prefers_username() {
        let user = TelegramUser {
            id: teloxide::types::UserId(9),
            is_bot: false,
            first_name: "Анна".to_string(),
            last_name: None,
            username: Some("anna".to_string()),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        };
        assert_eq!(display_handle(&user), "@anna");

        let no_handle = TelegramUser { username: None, ..user };
        assert_eq!(display_handle(&no_handle), "Анна");
    }
}
