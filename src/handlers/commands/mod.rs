//! Command objects and the command registry
//!
//! Every user-facing command is one object declaring its match rule and
//! permission tier. The registry resolves an inbound message to at most
//! one command: the exact-match table first, then the ordered predicate
//! list, first match wins.

pub mod admin;
pub mod chatter;
pub mod games;
pub mod guests;
pub mod jokes;
pub mod roster;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ThreadId, User as TelegramUser};
use tracing::{error, info, warn};

use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Everything a command needs to run. The message text is already
/// normalized: lowercased, with the `@botname` suffix stripped from slash
/// commands.
#[derive(Clone)]
pub struct CommandContext {
    pub bot: Bot,
    pub chat_id: ChatId,
    pub user: TelegramUser,
    pub user_id: i64,
    pub text: String,
    pub thread_id: Option<ThreadId>,
    pub is_admin: bool,
    pub is_creator: bool,
    pub services: ServiceFactory,
}

impl CommandContext {
    /// The argument tail after a prefix-matched command name
    pub fn args_after(&self, command: &str) -> String {
        self.text
            .strip_prefix(command)
            .unwrap_or("")
            .trim()
            .to_string()
    }
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn admin_only(&self) -> bool {
        false
    }

    fn creator_only(&self) -> bool {
        false
    }

    /// Voiced permission check used inside command bodies. Redundant with
    /// the registry gate on purpose: this layer answers with a denial
    /// message, the registry stays silent.
    fn check_permission(&self, ctx: &CommandContext) -> bool {
        if self.creator_only() && !ctx.is_creator {
            return false;
        }
        if self.admin_only() && !ctx.is_admin {
            return false;
        }
        true
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Send the command-layer denial message
pub async fn send_permission_denied(ctx: &CommandContext, message: &str) -> Result<()> {
    ctx.services
        .messenger
        .send_text(ctx.chat_id, message, ctx.thread_id)
        .await?;
    Ok(())
}

type Matcher = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Holds the exact-match table and the ordered predicate matchers
#[derive(Default)]
pub struct CommandRegistry {
    exact: HashMap<String, Arc<dyn Command>>,
    matchers: Vec<(Matcher, Arc<dyn Command>)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under an exact key; the last registration for a key wins
    pub fn register_exact(&mut self, name: &str, command: Arc<dyn Command>) {
        self.exact.insert(name.to_lowercase(), command);
    }

    /// Register under a custom matcher, tried in registration order
    pub fn register(&mut self, matcher: Matcher, command: Arc<dyn Command>) {
        self.matchers.push((matcher, command));
    }

    pub fn register_prefix(&mut self, prefix: &str, command: Arc<dyn Command>) {
        let prefix = prefix.to_lowercase();
        self.register(Box::new(move |text| text.starts_with(&prefix)), command);
    }

    pub fn register_contains(&mut self, substring: &str, command: Arc<dyn Command>) {
        let substring = substring.to_lowercase();
        self.register(Box::new(move |text| text.contains(&substring)), command);
    }

    fn resolve(&self, text: &str) -> Option<&Arc<dyn Command>> {
        if let Some(command) = self.exact.get(text) {
            return Some(command);
        }
        self.matchers
            .iter()
            .find(|(matcher, _)| matcher(text))
            .map(|(_, command)| command)
    }

    /// Resolve and run the matching command. Returns false when nothing
    /// matched. A permission miss at this layer is a silent skip: logged,
    /// no message. Execution errors propagate after being logged with the
    /// command and caller identifiers.
    pub async fn execute(&self, ctx: &CommandContext) -> Result<bool> {
        let Some(command) = self.resolve(&ctx.text) else {
            return Ok(false);
        };

        if (command.admin_only() && !ctx.is_admin) || (command.creator_only() && !ctx.is_creator) {
            warn!(
                command = command.name(),
                user_id = ctx.user_id,
                chat_id = ctx.chat_id.0,
                "Unprivileged user attempted restricted command"
            );
            return Ok(true);
        }

        info!(
            command = command.name(),
            user_id = ctx.user_id,
            chat_id = ctx.chat_id.0,
            "Executing command"
        );

        if let Err(e) = command.execute(ctx).await {
            error!(
                command = command.name(),
                user_id = ctx.user_id,
                chat_id = ctx.chat_id.0,
                error = %e,
                "Command execution failed"
            );
            return Err(e);
        }

        Ok(true)
    }
}

/// Wire up every command in its registration order
pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register_exact("/register", Arc::new(roster::RegisterCommand));
    registry.register_exact("/menu", Arc::new(roster::MenuCommand));
    registry.register_exact("/showgames", Arc::new(roster::ShowGamesCommand));
    registry.register_exact("/list", Arc::new(roster::ListPlayersCommand));
    registry.register_prefix("/startgame", Arc::new(games::StartGameCommand));
    registry.register_exact("/deactivegame", Arc::new(games::DeactivateGameCommand));
    registry.register_exact("/activategame", Arc::new(games::ActivateGameCommand));
    registry.register_contains("во сколько", Arc::new(chatter::WhatTimeCommand));
    registry.register_exact("/showregistered", Arc::new(roster::ShowRegisteredCommand));
    registry.register_exact("/tagregistered", Arc::new(roster::TagRegisteredCommand));
    registry.register_prefix("/addguest", Arc::new(guests::AddGuestCommand));
    registry.register_prefix("/changelimit", Arc::new(games::ChangeLimitCommand));
    registry.register_exact("/taggamers", Arc::new(roster::TagGamersCommand));
    registry.register_exact("/tagundecided", Arc::new(roster::TagUndecidedCommand));
    registry.register_exact("/taginactive", Arc::new(roster::TagInactiveCommand));
    registry.register_prefix("/confirmguest", Arc::new(guests::ConfirmGuestCommand));
    registry.register_prefix("/deleteguest", Arc::new(guests::DeleteGuestCommand));
    registry.register_prefix("/unconfirmplayer", Arc::new(guests::UnconfirmPlayerCommand));
    registry.register_prefix("/adminedituser", Arc::new(guests::EditUserCommand));
    registry.register_exact("/getgroupid", Arc::new(admin::GetGroupIdCommand));
    registry.register_prefix("/connectto", Arc::new(admin::ConnectToCommand));
    registry.register_exact("/showgroups", Arc::new(admin::ShowGroupsCommand));
    registry.register_prefix("/adminstartgame", Arc::new(games::AdminStartGameCommand));
    registry.register_prefix("/sayprivate", Arc::new(admin::SayPrivateCommand));
    registry.register_prefix("/adminaddjoke", Arc::new(jokes::AddJokeCommand));
    registry.register_prefix("/admindeletejoke", Arc::new(jokes::DeleteJokeCommand));
    registry.register_exact("/adminlistjokes", Arc::new(jokes::ListJokesCommand));
    registry.register_prefix("/admineditjoke", Arc::new(jokes::EditJokeCommand));
    registry.register_exact("/agilliol", Arc::new(roster::AgilliOlCommand));
    registry.register_contains("приффки", Arc::new(chatter::PriffkiCommand));
    registry.register_contains("привет", Arc::new(chatter::HelloCommand));
    registry.register_contains("пока", Arc::new(chatter::ByeCommand));
    registry.register_contains("алохамора", Arc::new(chatter::AlohomoraCommand));
    registry.register_contains("авада кедавра", Arc::new(chatter::AvadaKedavraCommand));
    registry.register_contains("твой бот", Arc::new(chatter::YourBotCommand));
    registry.register_contains("заткнись", Arc::new(chatter::ShutUpCommand));

    info!("All commands registered");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use teloxide::types::UserId;
    use crate::config::Settings;
    use crate::database::DatabaseService;
    use crate::state::SessionStore;

    struct StubCommand {
        admin_only: bool,
        creator_only: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Command for StubCommand {
        fn name(&self) -> &'static str {
            "/stub"
        }

        fn admin_only(&self) -> bool {
            self.admin_only
        }

        fn creator_only(&self) -> bool {
            self.creator_only
        }

        async fn execute(&self, _ctx: &CommandContext) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn stub(admin_only: bool, creator_only: bool) -> (Arc<StubCommand>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let command = Arc::new(StubCommand { admin_only, creator_only, calls: calls.clone() });
        (command, calls)
    }

    fn test_context(text: &str, is_admin: bool, is_creator: bool) -> CommandContext {
        let bot = Bot::new("123456:TEST");
        let settings = Settings::default();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/volleybuddy_test")
            .expect("lazy pool");
        let db = DatabaseService::new(pool);
        let sessions = SessionStore::new(settings.redis.clone()).expect("session store");
        let services = ServiceFactory::new(bot.clone(), settings, db, sessions);

        CommandContext {
            bot,
            chat_id: ChatId(-1001),
            user: TelegramUser {
                id: UserId(5),
                is_bot: false,
                first_name: "Анна".to_string(),
                last_name: None,
                username: Some("anna".to_string()),
                language_code: None,
                is_premium: false,
                added_to_attachment_menu: false,
            },
            user_id: 5,
            text: text.to_string(),
            thread_id: None,
            is_admin,
            is_creator,
            services,
        }
    }

    #[tokio::test]
    async fn exact_match_wins_over_matchers() {
        let mut registry = CommandRegistry::new();
        let (exact, exact_calls) = stub(false, false);
        let (prefixed, prefixed_calls) = stub(false, false);
        registry.register_prefix("/list", prefixed);
        registry.register_exact("/list", exact);

        let ctx = test_context("/list", false, false);
        assert!(registry.execute(&ctx).await.unwrap());
        assert_eq!(exact_calls.load(Ordering::SeqCst), 1);
        assert_eq!(prefixed_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn first_registered_matcher_wins() {
        let mut registry = CommandRegistry::new();
        let (first, first_calls) = stub(false, false);
        let (second, second_calls) = stub(false, false);
        registry.register_contains("привет", first);
        registry.register_contains("вет", second);

        let ctx = test_context("всем привет!", false, false);
        assert!(registry.execute(&ctx).await.unwrap());
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn last_exact_registration_overwrites() {
        let mut registry = CommandRegistry::new();
        let (old, old_calls) = stub(false, false);
        let (new, new_calls) = stub(false, false);
        registry.register_exact("/menu", old);
        registry.register_exact("/MENU", new);

        let ctx = test_context("/menu", false, false);
        assert!(registry.execute(&ctx).await.unwrap());
        assert_eq!(old_calls.load(Ordering::SeqCst), 0);
        assert_eq!(new_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unmatched_text_reports_unhandled() {
        let registry = CommandRegistry::new();
        let ctx = test_context("просто сообщение", false, false);
        assert!(!registry.execute(&ctx).await.unwrap());
    }

    #[tokio::test]
    async fn admin_command_is_silently_skipped_for_non_admin() {
        let mut registry = CommandRegistry::new();
        let (command, calls) = stub(true, false);
        registry.register_exact("/tagregistered", command);

        let ctx = test_context("/tagregistered", false, false);
        // handled (matched), but never executed and no message sent
        assert!(registry.execute(&ctx).await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let ctx = test_context("/tagregistered", true, false);
        assert!(registry.execute(&ctx).await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn creator_command_is_silently_skipped_for_non_creator() {
        let mut registry = CommandRegistry::new();
        let (command, calls) = stub(false, true);
        registry.register_exact("/showgroups", command);

        let ctx = test_context("/showgroups", true, false);
        assert!(registry.execute(&ctx).await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let ctx = test_context("/showgroups", false, true);
        assert!(registry.execute(&ctx).await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn voiced_check_mirrors_the_tiers() {
        let (command, _) = stub(true, false);
        let ctx = test_context("/stub", false, false);
        assert!(!command.check_permission(&ctx));
        let ctx = test_context("/stub", true, false);
        assert!(command.check_permission(&ctx));

        let (command, _) = stub(false, true);
        let ctx = test_context("/stub", true, false);
        assert!(!command.check_permission(&ctx));
        let ctx = test_context("/stub", false, true);
        assert!(command.check_permission(&ctx));
    }

    #[test]
    fn full_registry_wires_the_vocabulary() {
        let registry = build_registry();
        for text in [
            "/register", "/menu", "/showgames", "/list", "/deactivegame",
            "/activategame", "/showregistered", "/tagregistered", "/taggamers",
            "/tagundecided", "/taginactive", "/getgroupid", "/showgroups",
            "/adminlistjokes", "/agilliol",
        ] {
            assert!(registry.resolve(text).is_some(), "missing exact command {text}");
        }
        for text in [
            "/startgame 01.01.2025/18:00/20:00/2/зал/среда",
            "/addguest среда/иван петров",
            "/changelimit среда/10",
            "/confirmguest среда",
            "/deleteguest среда",
            "/unconfirmplayer среда",
            "/adminedituser 1/имя",
            "/connectto -100 группа",
            "/adminstartgame 1 01.01.2025/18:00/20:00/2/зал/среда",
            "/sayprivate 5 привет",
            "/adminaddjoke left_game///шутка",
            "/admindeletejoke 3",
            "/admineditjoke 3///left_game///шутка",
            "во сколько игра?",
            "всем приффки",
            "авада кедавра",
        ] {
            assert!(registry.resolve(text).is_some(), "missing matcher for {text}");
        }
        assert!(registry.resolve("обычное сообщение").is_none());
    }
}
