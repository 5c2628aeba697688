//! Creator error notifier
//!
//! Infrastructure failures are forwarded to the first configured creator's
//! private chat through a FIFO queue drained at one notification per
//! second, so an incident cannot flood the creator.

use chrono::Utc;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::sync::mpsc;
use tracing::{error, warn};

const MAX_NOTIFICATION_LEN: usize = 4000;

#[derive(Debug, Clone)]
struct Notification {
    context: String,
    error: String,
}

/// Queue handle. Cloneable; the draining task runs for the process
/// lifetime.
#[derive(Clone)]
pub struct ErrorNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ErrorNotifier {
    /// Spawn the queue-draining task and return the handle
    pub fn spawn(bot: Bot, creator_ids: &[i64]) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
        let creator_id = creator_ids.first().copied();

        tokio::spawn(async move {
            let limiter = RateLimiter::direct(Quota::per_second(NonZeroU32::MIN));

            while let Some(notification) = rx.recv().await {
                limiter.until_ready().await;

                let Some(creator_id) = creator_id else {
                    warn!("No creator configured, dropping error notification");
                    continue;
                };

                let text = format_notification(&notification);
                if let Err(e) = bot
                    .send_message(ChatId(creator_id), text)
                    .parse_mode(ParseMode::Html)
                    .await
                {
                    error!(error = %e, "Failed to deliver creator notification");
                }
            }
        });

        Self { tx }
    }

    /// Enqueue an error report. Never blocks and never fails the caller.
    pub fn notify(&self, context: impl Into<String>, error: &crate::utils::errors::VolleyBuddyError) {
        let notification = Notification {
            context: context.into(),
            error: error.to_string(),
        };
        if self.tx.send(notification).is_err() {
            warn!("Error notifier task is gone, notification dropped");
        }
    }
}

fn format_notification(notification: &Notification) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let mut message = format!(
        "🚨 <b>Error Alert</b>\n\n⏰ <b>Time:</b> {timestamp}\n📍 <b>Context:</b> {}\n❌ <b>Error:</b> {}",
        escape_html(&notification.context),
        escape_html(&notification.error),
    );

    if message.chars().count() > MAX_NOTIFICATION_LEN {
        message = message.chars().take(MAX_NOTIFICATION_LEN - 20).collect::<String>() + "\n\n... (truncated)";
    }

    message
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_payload() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn formats_context_and_error() {
        let text = format_notification(&Notification {
            context: "Command: /list | Chat: -1".to_string(),
            error: "Database error: timed out".to_string(),
        });
        assert!(text.contains("Error Alert"));
        assert!(text.contains("Command: /list | Chat: -1"));
        assert!(text.contains("Database error: timed out"));
    }
}
