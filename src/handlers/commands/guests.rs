//! Guest lifecycle and roster-correction commands

use async_trait::async_trait;

use crate::i18n::messages;
use crate::utils::errors::Result;
use crate::utils::format::capitalize_words;
use crate::utils::validation::{parse_add_guest, parse_user_edit};
use super::{send_permission_denied, Command, CommandContext};

/// `/addguest <label>/<Full Name>[/*]` — attach a disposable guest to a
/// game; the trailing `*` marks "maybe" instead of "attending"
pub struct AddGuestCommand;

#[async_trait]
impl Command for AddGuestCommand {
    fn name(&self) -> &'static str {
        "/addguest"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, "Только одмэн может добавлять гостей.").await;
        }

        let args = ctx.args_after("/addguest");
        let Some((label, fullname, confirmed)) = parse_add_guest(&args) else {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    "Формат: /addguest день недели/Имя Фамилия или /addguest день недели/Имя Фамилия/* (если не точно)",
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        };

        let fullname = capitalize_words(&fullname);
        ctx.services
            .game_service
            .add_guest_to_game(ctx.chat_id, &label, &fullname, confirmed, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/confirmguest <label>` — one button per undecided player; pressing a
/// button confirms exactly that player
pub struct ConfirmGuestCommand;

#[async_trait]
impl Command for ConfirmGuestCommand {
    fn name(&self) -> &'static str {
        "/confirmguest"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        let label = ctx.args_after("/confirmguest");
        if label.is_empty() {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    "Использование: /confirmguest <день недели>\nПример: /confirmguest понедельник",
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        }

        ctx.services
            .game_service
            .show_undecided_for_confirmation(ctx.chat_id, &label, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/unconfirmplayer <label>` — flip a confirmed player back to "maybe"
pub struct UnconfirmPlayerCommand;

#[async_trait]
impl Command for UnconfirmPlayerCommand {
    fn name(&self) -> &'static str {
        "/unconfirmplayer"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        let label = ctx.args_after("/unconfirmplayer");
        if label.is_empty() {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    "Использование: /unconfirmplayer <день недели>\nПример: /unconfirmplayer понедельник",
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        }

        ctx.services
            .game_service
            .show_confirmed_for_unconfirmation(ctx.chat_id, &label, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/deleteguest <label>` — pick a guest to remove from the game; the
/// guest's user row goes with it
pub struct DeleteGuestCommand;

#[async_trait]
impl Command for DeleteGuestCommand {
    fn name(&self) -> &'static str {
        "/deleteguest"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        let label = ctx.args_after("/deleteguest");
        if label.is_empty() {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    "Использование: /deleteguest <день недели>\nПример: /deleteguest понедельник",
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        }

        ctx.services
            .game_service
            .show_guests_for_deletion(ctx.chat_id, &label, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/adminedituser <userId>/<firstName>/<lastName>/<fullnameAz>` — edit a
/// member's stored names
pub struct EditUserCommand;

#[async_trait]
impl Command for EditUserCommand {
    fn name(&self) -> &'static str {
        "/adminedituser"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        let args = ctx.args_after("/adminedituser");
        let Some(edit) = parse_user_edit(&args) else {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    "Формат: /adminedituser ID/Имя/Фамилия/Ad Soyad",
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        };

        let result = ctx.services.user_service.edit_user(edit).await;
        ctx.services
            .messenger
            .send_text(ctx.chat_id, result, ctx.thread_id)
            .await?;
        Ok(())
    }
}
