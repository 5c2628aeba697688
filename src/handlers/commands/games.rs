//! Game lifecycle commands

use async_trait::async_trait;
use teloxide::types::ChatId;
use tracing::warn;

use crate::i18n::messages;
use crate::utils::errors::Result;
use crate::utils::validation::{parse_change_limit, parse_game_args};
use super::{send_permission_denied, Command, CommandContext};

/// `/startgame <date>/<start>/<end>/<limit>/<place>/<label>` — announce a
/// game. In an admin chat a previously selected managed chat is consumed
/// as the target; without arguments an admin chat gets the group picker.
pub struct StartGameCommand;

#[async_trait]
impl Command for StartGameCommand {
    fn name(&self) -> &'static str {
        "/startgame"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        let args = ctx.args_after("/startgame");

        if args.is_empty()
            && ctx.services.admin_group_service.has_linked_groups(ctx.chat_id.0).await?
        {
            ctx.services
                .admin_group_service
                .show_groups_for_selection(ctx.chat_id, "StartGame", ctx.thread_id)
                .await?;
            return Ok(());
        }

        let Some(request) = parse_game_args(&args) else {
            ctx.services
                .messenger
                .send_text(ctx.chat_id, messages::INVALID_GAME_FORMAT, ctx.thread_id)
                .await?;
            return Ok(());
        };

        // A selected target chat is consumed exactly once
        let selected = match ctx.services.sessions.take_selected_chat(ctx.chat_id.0).await {
            Ok(selected) => selected,
            Err(e) => {
                warn!(chat_id = ctx.chat_id.0, error = %e, "Session store unavailable, creating locally");
                None
            }
        };

        match selected {
            Some(target) => {
                ctx.services
                    .game_service
                    .create_game(ChatId(target), &request, None)
                    .await;
            }
            None => {
                ctx.services
                    .game_service
                    .create_game(ctx.chat_id, &request, ctx.thread_id)
                    .await;
            }
        }
        Ok(())
    }
}

/// `/deactivegame` — offer the active games for closing
pub struct DeactivateGameCommand;

#[async_trait]
impl Command for DeactivateGameCommand {
    fn name(&self) -> &'static str {
        "/deactivegame"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, "Только одмэн может закрыть игру.").await;
        }

        if ctx.services.admin_group_service.has_linked_groups(ctx.chat_id.0).await? {
            ctx.services
                .admin_group_service
                .show_groups_for_selection(ctx.chat_id, "DeactiveGame", ctx.thread_id)
                .await?;
            return Ok(());
        }

        ctx.services
            .game_service
            .deactivate_games(ctx.chat_id, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/activategame` — reopen the most recently closed game
pub struct ActivateGameCommand;

#[async_trait]
impl Command for ActivateGameCommand {
    fn name(&self) -> &'static str {
        "/activategame"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, "Только одмэн может активировать игру.").await;
        }

        ctx.services
            .game_service
            .activate_game(ctx.chat_id, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/changelimit <label>/<newLimit>` — change a game's advisory capacity
pub struct ChangeLimitCommand;

#[async_trait]
impl Command for ChangeLimitCommand {
    fn name(&self) -> &'static str {
        "/changelimit"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        let args = ctx.args_after("/changelimit");
        let Some((label, limit)) = parse_change_limit(&args) else {
            let message = if args.split('/').count() == 2 {
                messages::LIMIT_MUST_BE_NUMBER
            } else {
                messages::INVALID_LIMIT_FORMAT
            };
            ctx.services
                .messenger
                .send_text(ctx.chat_id, message, ctx.thread_id)
                .await?;
            return Ok(());
        };

        ctx.services
            .game_service
            .change_game_limit(ctx.chat_id, &label, limit, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/adminstartgame <groupId> <date/start/end/limit/place/label>` — create
/// a game in a linked managed chat from the admin chat
pub struct AdminStartGameCommand;

#[async_trait]
impl Command for AdminStartGameCommand {
    fn name(&self) -> &'static str {
        "/adminstartgame"
    }

    fn creator_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::CREATOR_ONLY).await;
        }

        let args = ctx.args_after("/adminstartgame");
        let mut parts = args.split_whitespace();
        let (Some(group_id), Some(game_args)) = (parts.next(), parts.next()) else {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    "Использование: /adminstartgame {groupId} {дата/начало/конец/лимит/место/день}",
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        };

        let Ok(group_id) = group_id.parse::<i64>() else {
            ctx.services
                .messenger
                .send_text(ctx.chat_id, "ID группы должен быть числом", ctx.thread_id)
                .await?;
            return Ok(());
        };

        let Some(request) = parse_game_args(game_args) else {
            ctx.services
                .messenger
                .send_text(ctx.chat_id, messages::INVALID_GAME_FORMAT, ctx.thread_id)
                .await?;
            return Ok(());
        };

        let Some(group) = ctx
            .services
            .admin_group_service
            .find_group(ctx.chat_id.0, group_id)
            .await?
        else {
            ctx.services
                .messenger
                .send_text(ctx.chat_id, "Группа не найдена", ctx.thread_id)
                .await?;
            return Ok(());
        };

        ctx.services
            .game_service
            .create_game(ChatId(group.chat_id), &request, None)
            .await;

        ctx.services
            .messenger
            .send_text(
                ctx.chat_id,
                format!(
                    "✅ Игра создана в группе \"{}\"\n📅 {} ({})\n⏰ {} — {}\n📍 {}\n👥 Лимит: {} игроков",
                    group.group_name,
                    request.date.format("%d.%m.%Y"),
                    request.label,
                    request.start.format("%H:%M"),
                    request.end.format("%H:%M"),
                    request.place,
                    request.users_limit,
                ),
                ctx.thread_id,
            )
            .await?;
        Ok(())
    }
}
