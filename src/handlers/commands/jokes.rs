//! Joke database administration, creator-gated

use async_trait::async_trait;
use tracing::warn;

use crate::i18n::messages;
use crate::models::joke::JokeType;
use crate::utils::errors::Result;
use crate::utils::validation::{parse_add_joke, parse_edit_joke};
use super::{send_permission_denied, Command, CommandContext};

const JOKE_TYPES_HINT: &str =
    "Типы: LEFT_GAME, TAG_REGISTERED, START_GAME, DEACTIVE_GAME, ADD_GUEST, \
     SAY_SOMETHING_TO_INACTIVE, DELETE_PLAYER, TAG_UNDECIDED, RANDOM_FACT";

/// `/adminaddjoke <type>///<text>`
pub struct AddJokeCommand;

#[async_trait]
impl Command for AddJokeCommand {
    fn name(&self) -> &'static str {
        "/adminaddjoke"
    }

    fn creator_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::CREATOR_ONLY).await;
        }

        let args = ctx.args_after("/adminaddjoke");
        let Some((joke_type, joke)) = parse_add_joke(&args) else {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    format!("Формат: /adminaddjoke тип шутки///текст шутки\n{JOKE_TYPES_HINT}"),
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        };

        match ctx.services.db.jokes.add_joke(&joke, joke_type).await {
            Ok(()) => {
                ctx.services
                    .messenger
                    .send_text(
                        ctx.chat_id,
                        format!(
                            "Ваша гениальная \"шутка\" добавлена в базу данных. Полюбуйтесь на неё ещё раз: {joke}"
                        ),
                        ctx.thread_id,
                    )
                    .await?;
            }
            Err(e) => {
                warn!(error = %e, "Failed to add joke");
                ctx.services
                    .messenger
                    .send_text(
                        ctx.chat_id,
                        "Ваша гениальная \"шутка\" не добавилась. Возможно она слишком тупая. А возможно возникла ошибка",
                        ctx.thread_id,
                    )
                    .await?;
            }
        }
        Ok(())
    }
}

/// `/admindeletejoke <id>`
pub struct DeleteJokeCommand;

#[async_trait]
impl Command for DeleteJokeCommand {
    fn name(&self) -> &'static str {
        "/admindeletejoke"
    }

    fn creator_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::CREATOR_ONLY).await;
        }

        let args = ctx.args_after("/admindeletejoke");
        let Ok(joke_id) = args.parse::<i64>() else {
            ctx.services
                .messenger
                .send_text(ctx.chat_id, "Формат: /admindeletejoke ID шутки", ctx.thread_id)
                .await?;
            return Ok(());
        };

        let text = match ctx.services.db.jokes.delete_joke(joke_id).await {
            Ok(true) => "Шутка удалена! Слава богу 😮‍💨".to_string(),
            Ok(false) => format!("Шутки с ID {joke_id} не нашлось"),
            Err(e) => {
                warn!(joke_id, error = %e, "Failed to delete joke");
                "Не удалось удалить шутку".to_string()
            }
        };
        ctx.services
            .messenger
            .send_text(ctx.chat_id, text, ctx.thread_id)
            .await?;
        Ok(())
    }
}

/// `/adminlistjokes` — dump the whole joke table, grouped by category
pub struct ListJokesCommand;

#[async_trait]
impl Command for ListJokesCommand {
    fn name(&self) -> &'static str {
        "/adminlistjokes"
    }

    fn creator_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::CREATOR_ONLY).await;
        }

        let mut all_jokes = Vec::new();
        for joke_type in JokeType::ALL {
            match ctx.services.db.jokes.get_jokes(joke_type).await {
                Ok(jokes) => {
                    all_jokes.extend(
                        jokes
                            .into_iter()
                            .map(|j| format!("ID: {}\nТип: {joke_type}\nШутка: {}", j.id, j.joke)),
                    );
                }
                Err(e) => {
                    warn!(error = %e, "Failed to list jokes");
                    ctx.services
                        .messenger
                        .send_text(ctx.chat_id, messages::ERROR_OCCURRED, ctx.thread_id)
                        .await?;
                    return Ok(());
                }
            }
        }

        let text = if all_jokes.is_empty() {
            "Шуток нет. Как и у тебя 🙃".to_string()
        } else {
            all_jokes.join("\n\n---\n\n")
        };
        ctx.services
            .messenger
            .send_text(ctx.chat_id, text, ctx.thread_id)
            .await?;
        Ok(())
    }
}

/// `/admineditjoke <id>///<type>///<text>`
pub struct EditJokeCommand;

#[async_trait]
impl Command for EditJokeCommand {
    fn name(&self) -> &'static str {
        "/admineditjoke"
    }

    fn creator_only(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        if !self.check_permission(ctx) {
            return send_permission_denied(ctx, messages::CREATOR_ONLY).await;
        }

        let args = ctx.args_after("/admineditjoke");
        let Some((joke_id, joke_type, joke)) = parse_edit_joke(&args) else {
            ctx.services
                .messenger
                .send_text(
                    ctx.chat_id,
                    "Формат: /admineditjoke ID шутки///тип шутки///новый текст",
                    ctx.thread_id,
                )
                .await?;
            return Ok(());
        };

        let text = match ctx.services.db.jokes.update_joke(joke_id, &joke, joke_type).await {
            Ok(true) => "Шутка отредактирована!".to_string(),
            Ok(false) => format!("Шутки с ID {joke_id} не нашлось"),
            Err(e) => {
                warn!(joke_id, error = %e, "Failed to edit joke");
                "Не удалось отредактировать шутку".to_string()
            }
        };
        ctx.services
            .messenger
            .send_text(ctx.chat_id, text, ctx.thread_id)
            .await?;
        Ok(())
    }
}
