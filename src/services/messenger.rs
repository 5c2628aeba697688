//! Bot messenger service
//!
//! Wraps outbound Telegram calls so services never touch the raw client.
//! Forum-topic messages retry exactly once without the thread qualifier
//! when the first attempt fails because the topic reference is invalid.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, Message, ParseMode, ThreadId};
use tracing::{error, warn};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct BotMessenger {
    bot: Bot,
}

impl BotMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Send a plain text message, optionally into a forum topic
    pub async fn send_text(
        &self,
        chat_id: ChatId,
        text: impl Into<String>,
        thread_id: Option<ThreadId>,
    ) -> Result<Message> {
        self.send(chat_id, text.into(), None, None, thread_id).await
    }

    /// Send an HTML-formatted message
    pub async fn send_html(
        &self,
        chat_id: ChatId,
        text: impl Into<String>,
        thread_id: Option<ThreadId>,
    ) -> Result<Message> {
        self.send(chat_id, text.into(), Some(ParseMode::Html), None, thread_id).await
    }

    /// Send a message with an inline keyboard
    pub async fn send_with_keyboard(
        &self,
        chat_id: ChatId,
        text: impl Into<String>,
        keyboard: InlineKeyboardMarkup,
        thread_id: Option<ThreadId>,
    ) -> Result<Message> {
        self.send(chat_id, text.into(), None, Some(keyboard), thread_id).await
    }

    /// Send an HTML message with an inline keyboard
    pub async fn send_html_with_keyboard(
        &self,
        chat_id: ChatId,
        text: impl Into<String>,
        keyboard: InlineKeyboardMarkup,
        thread_id: Option<ThreadId>,
    ) -> Result<Message> {
        self.send(chat_id, text.into(), Some(ParseMode::Html), Some(keyboard), thread_id).await
    }

    async fn send(
        &self,
        chat_id: ChatId,
        text: String,
        parse_mode: Option<ParseMode>,
        keyboard: Option<InlineKeyboardMarkup>,
        thread_id: Option<ThreadId>,
    ) -> Result<Message> {
        let mut request = self.bot.send_message(chat_id, text.clone());
        if let Some(mode) = parse_mode {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = keyboard.clone() {
            request = request.reply_markup(keyboard);
        }
        if let Some(thread_id) = thread_id {
            request = request.message_thread_id(thread_id);
        }

        match request.await {
            Ok(message) => Ok(message),
            Err(e) if thread_id.is_some() && is_thread_error(&e) => {
                warn!(chat_id = chat_id.0, error = %e, "Topic not found, retrying without thread id");
                let mut retry = self.bot.send_message(chat_id, text);
                if let Some(mode) = parse_mode {
                    retry = retry.parse_mode(mode);
                }
                if let Some(keyboard) = keyboard {
                    retry = retry.reply_markup(keyboard);
                }
                Ok(retry.await?)
            }
            Err(e) => {
                error!(chat_id = chat_id.0, error = %e, "Failed to send message");
                Err(e.into())
            }
        }
    }

    /// Deliver a message to a user's private chat. Failures (for instance a
    /// recipient who blocked the bot) are logged and reported as `false`,
    /// never propagated.
    pub async fn send_private(&self, user_id: i64, text: &str) -> bool {
        match self.bot.send_message(ChatId(user_id), text).await {
            Ok(_) => true,
            Err(e) => {
                warn!(user_id, error = %e, "Failed to send private message");
                false
            }
        }
    }

    /// Private-chat variant carrying an inline keyboard
    pub async fn send_private_with_keyboard(
        &self,
        user_id: i64,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> bool {
        match self
            .bot
            .send_message(ChatId(user_id), text)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(user_id, error = %e, "Failed to send private message");
                false
            }
        }
    }

    /// Answer a callback query, optionally with a toast text
    pub async fn answer_callback(&self, query_id: &str, text: Option<&str>) -> bool {
        let mut request = self.bot.answer_callback_query(query_id.to_string());
        if let Some(text) = text {
            request = request.text(text.to_string());
        }
        match request.await {
            Ok(_) => true,
            Err(e) => {
                warn!(query_id, error = %e, "Failed to answer callback query");
                false
            }
        }
    }
}

/// Telegram reports invalid forum-topic references with thread/topic
/// wording; there is no dedicated error variant to match on.
fn is_thread_error(error: &teloxide::RequestError) -> bool {
    let text = error.to_string().to_lowercase();
    text.contains("thread") || text.contains("topic")
}
