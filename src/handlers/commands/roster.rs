//! Registration, listing and tagging commands

use async_trait::async_trait;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::i18n::messages;
use crate::models::user::CreateUserRequest;
use crate::services::ListFormat;
use crate::utils::errors::Result;
use super::{send_permission_denied, Command, CommandContext};

/// `/register` — self-register in the chat
pub struct RegisterCommand;

#[async_trait]
impl Command for RegisterCommand {
    fn name(&self) -> &'static str {
        "/register"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let request = CreateUserRequest {
            user_id: ctx.user_id,
            first_name: ctx.user.first_name.clone(),
            last_name: ctx.user.last_name.clone(),
            username: ctx.user.username.clone(),
            chat_id: ctx.chat_id.0,
            is_guest: false,
        };

        let result = ctx.services.user_service.register_user(request).await;
        ctx.services
            .messenger
            .send_text(ctx.chat_id, result, ctx.thread_id)
            .await?;
        Ok(())
    }
}

/// `/menu` — the button menu with the four shortcut actions
pub struct MenuCommand;

#[async_trait]
impl Command for MenuCommand {
    fn name(&self) -> &'static str {
        "/menu"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(vec![
            vec![InlineKeyboardButton::callback("🏐 Oyunlar / Игры", "showgames")],
            vec![InlineKeyboardButton::callback("📋 İştirakçılar / Участники", "list")],
            vec![InlineKeyboardButton::callback("✍️ Qeydiyyat / Регистрация", "register")],
            vec![InlineKeyboardButton::callback("🧠 Ağıllı ol", "agilliol")],
        ]);

        ctx.services
            .messenger
            .send_with_keyboard(ctx.chat_id, messages::MENU_TITLE, keyboard, ctx.thread_id)
            .await?;
        Ok(())
    }
}

/// `/showgames` — active games with sign-up buttons
pub struct ShowGamesCommand;

#[async_trait]
impl Command for ShowGamesCommand {
    fn name(&self) -> &'static str {
        "/showgames"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        ctx.services.game_service.show_games(ctx.chat_id, ctx.thread_id).await;
        Ok(())
    }
}

/// `/list` — the roster view of every active game
pub struct ListPlayersCommand;

#[async_trait]
impl Command for ListPlayersCommand {
    fn name(&self) -> &'static str {
        "/list"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        ctx.services.game_service.show_game_players(ctx.chat_id, ctx.thread_id).await;
        Ok(())
    }
}

/// `/showregistered` — plain list of registered members
pub struct ShowRegisteredCommand;

#[async_trait]
impl Command for ShowRegisteredCommand {
    fn name(&self) -> &'static str {
        "/showregistered"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, "Только одмэн может массово беспокоить всех!").await;
        }

        // From an admin chat this runs against a selected managed chat
        if ctx.services.admin_group_service.has_linked_groups(ctx.chat_id.0).await? {
            ctx.services
                .admin_group_service
                .show_groups_for_selection(ctx.chat_id, "ShowUsers", ctx.thread_id)
                .await?;
            return Ok(());
        }

        let result = ctx
            .services
            .user_service
            .get_registered_users(ctx.chat_id.0, ListFormat::Show, ctx.is_admin)
            .await;
        ctx.services
            .messenger
            .send_html(ctx.chat_id, result, ctx.thread_id)
            .await?;
        Ok(())
    }
}

/// `/tagregistered` — mention every registered member
pub struct TagRegisteredCommand;

#[async_trait]
impl Command for TagRegisteredCommand {
    fn name(&self) -> &'static str {
        "/tagregistered"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, "Только одмэн может массово беспокоить всех!").await;
        }

        let result = ctx
            .services
            .user_service
            .get_registered_users(ctx.chat_id.0, ListFormat::Tag, ctx.is_admin)
            .await;
        ctx.services
            .messenger
            .send_html(ctx.chat_id, result, ctx.thread_id)
            .await?;
        Ok(())
    }
}

/// `/taggamers` — mention everyone signed up for any active game
pub struct TagGamersCommand;

#[async_trait]
impl Command for TagGamersCommand {
    fn name(&self) -> &'static str {
        "/taggamers"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        if ctx.services.admin_group_service.has_linked_groups(ctx.chat_id.0).await? {
            ctx.services
                .admin_group_service
                .show_groups_for_selection(ctx.chat_id, "TagGamers", ctx.thread_id)
                .await?;
            return Ok(());
        }

        let result = ctx
            .services
            .game_service
            .tag_game_players(ctx.chat_id.0, ctx.is_admin)
            .await;
        ctx.services
            .messenger
            .send_html(ctx.chat_id, result, ctx.thread_id)
            .await?;
        Ok(())
    }
}

/// `/tagundecided` — nudge the players still on "maybe"
pub struct TagUndecidedCommand;

#[async_trait]
impl Command for TagUndecidedCommand {
    fn name(&self) -> &'static str {
        "/tagundecided"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        ctx.services
            .game_service
            .tag_undecided_players(ctx.chat_id, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/taginactive` — nudge members who keep skipping games
pub struct TagInactiveCommand;

#[async_trait]
impl Command for TagInactiveCommand {
    fn name(&self) -> &'static str {
        "/taginactive"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        let result = ctx.services.user_service.inactive_users_message(ctx.chat_id.0).await;
        ctx.services
            .messenger
            .send_html(ctx.chat_id, result, ctx.thread_id)
            .await?;
        Ok(())
    }
}

/// `/agilliol` — pick a random member and tell them to be clever
pub struct AgilliOlCommand;

#[async_trait]
impl Command for AgilliOlCommand {
    fn name(&self) -> &'static str {
        "/agilliol"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = ctx.services.user_service.random_user_message(ctx.chat_id.0).await;
        ctx.services
            .messenger
            .send_html(ctx.chat_id, result, ctx.thread_id)
            .await?;
        Ok(())
    }
}
