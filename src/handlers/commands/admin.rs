//! Chat administration and cross-chat delegation commands

use async_trait::async_trait;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ChatId};

use crate::i18n::messages;
use crate::utils::errors::Result;
use super::{send_permission_denied, Command, CommandContext};

/// `/getgroupid` — deliver the chat id to the admin's private chat
pub struct GetGroupIdCommand;

#[async_trait]
impl Command for GetGroupIdCommand {
    fn name(&self) -> &'static str {
        "/getgroupid"
    }

    fn admin_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::ADMIN_ONLY).await;
        }

        ctx.services
            .messenger
            .send_private(ctx.user_id, &format!("ID вашей группы {}", ctx.chat_id.0))
            .await;
        Ok(())
    }
}

/// `/connectto <chatId> <groupName...>` — link a managed chat to this
/// admin chat
pub struct ConnectToCommand;

#[async_trait]
impl Command for ConnectToCommand {
    fn name(&self) -> &'static str {
        "/connectto"
    }

    fn creator_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::CREATOR_ONLY).await;
        }

        let args = ctx.args_after("/connectto");
        let mut parts = args.split_whitespace();
        let target = parts.next().and_then(|p| p.parse::<i64>().ok());
        let group_name = parts.collect::<Vec<_>>().join(" ");

        let (Some(target_chat_id), false) = (target, group_name.is_empty()) else {
            ctx.services
                .messenger
                .send_text(ctx.chat_id, "Использование: /connectto {chatId} {groupName}", ctx.thread_id)
                .await?;
            return Ok(());
        };

        ctx.services
            .admin_group_service
            .connect_to_group(target_chat_id, ctx.chat_id, ctx.user.id, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/showgroups` — list the chats managed from here
pub struct ShowGroupsCommand;

#[async_trait]
impl Command for ShowGroupsCommand {
    fn name(&self) -> &'static str {
        "/showgroups"
    }

    fn creator_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::CREATOR_ONLY).await;
        }

        ctx.services
            .admin_group_service
            .show_groups(ctx.chat_id, ctx.thread_id)
            .await;
        Ok(())
    }
}

/// `/sayprivate <userId> <message...>` — stash a one-shot private message
/// and drop a reveal button into the recipient's home chat. Only the
/// matching handle can collect it, exactly once.
pub struct SayPrivateCommand;

#[async_trait]
impl Command for SayPrivateCommand {
    fn name(&self) -> &'static str {
        "/sayprivate"
    }

    fn creator_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::CREATOR_ONLY).await;
        }

        let args = ctx.args_after("/sayprivate");
        let mut parts = args.split_whitespace();
        let target = parts.next().map(str::to_string).unwrap_or_default();
        let message = parts.collect::<Vec<_>>().join(" ");

        let (Ok(target_user_id), false) = (target.parse::<i64>(), message.is_empty()) else {
            ctx.services
                .messenger
                .send_text(ctx.chat_id, "Использование: /sayprivate {userId} {message}", ctx.thread_id)
                .await?;
            return Ok(());
        };

        let Some(user) = ctx.services.db.users.find_by_telegram_id(target_user_id).await? else {
            ctx.services
                .messenger
                .send_text(ctx.chat_id, format!("Пользователь {target_user_id} не найден"), ctx.thread_id)
                .await?;
            return Ok(());
        };

        let Some(username) = user.username.filter(|u| !u.is_empty()) else {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    "У пользователя нет username, личное сообщение не доставить",
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        };

        ctx.services.sessions.stash_private_message(&username, &message).await?;

        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "💌 Показать сообщение",
            format!("showPrivate_{username}"),
        )]]);
        ctx.services
            .messenger
            .send_with_keyboard(
                ChatId(user.chat_id),
                format!("@{username}, у вас личное сообщение!"),
                keyboard,
                None,
            )
            .await?;

        ctx.services
            .messenger
            .send_text(ctx.chat_id, format!("✅ Сообщение подготовлено для @{username}"), ctx.thread_id)
            .await?;
        Ok(())
    }
}
