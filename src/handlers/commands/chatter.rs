//! Natural-language triggers and easter eggs

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::UserId;
use tracing::warn;

use crate::utils::errors::Result;
use super::{Command, CommandContext};

/// "во сколько" — answer with the start times of the active games
pub struct WhatTimeCommand;

#[async_trait]
impl Command for WhatTimeCommand {
    fn name(&self) -> &'static str {
        "во сколько"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        ctx.services
            .game_service
            .show_game_times(ctx.chat_id, ctx.thread_id)
            .await;
        Ok(())
    }
}

macro_rules! canned_reply {
    ($name:ident, $trigger:literal, $reply:literal) => {
        pub struct $name;

        #[async_trait]
        impl Command for $name {
            fn name(&self) -> &'static str {
                $trigger
            }

            async fn execute(&self, ctx: &CommandContext) -> Result<()> {
                ctx.services
                    .messenger
                    .send_text(ctx.chat_id, $reply, ctx.thread_id)
                    .await?;
                Ok(())
            }
        }
    };
}

canned_reply!(PriffkiCommand, "приффки", "Сам приффки.");
canned_reply!(HelloCommand, "привет", "Салам! 🏐");
canned_reply!(ByeCommand, "пока", "Пока-пока!");
canned_reply!(AlohomoraCommand, "алохамора", "🔓 *дверь открыта, проходим*");
canned_reply!(YourBotCommand, "твой бот", "Да, я бот. Зато какой! 🤖");
canned_reply!(ShutUpCommand, "заткнись", "Сам заткнись 😐");

/// "авада кедавра" — the fatal curse: ban the sender, then unban right
/// away so they can rejoin
pub struct AvadaKedavraCommand;

#[async_trait]
impl Command for AvadaKedavraCommand {
    fn name(&self) -> &'static str {
        "авада кедавра"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let victim = UserId(ctx.user_id as u64);

        match ctx.bot.ban_chat_member(ctx.chat_id, victim).await {
            Ok(_) => {
                ctx.services
                    .messenger
                    .send_text(ctx.chat_id, "💀 *пользователь умер*", ctx.thread_id)
                    .await?;
                if let Err(e) = ctx.bot.unban_chat_member(ctx.chat_id, victim).await {
                    warn!(user_id = ctx.user_id, error = %e, "Failed to unban cursed user");
                }
            }
            Err(e) => {
                warn!(user_id = ctx.user_id, error = %e, "Curse failed");
                ctx.services
                    .messenger
                    .send_text(ctx.chat_id, "⚡️ *заклинание не сработало*", ctx.thread_id)
                    .await?;
            }
        }
        Ok(())
    }
}
