//! VolleyBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Update;
use tracing::{error, info, warn};

use VolleyBuddy::{
    config::Settings,
    database::{connection, DatabaseService},
    handlers::{
        build_registry, handle_callback_query, handle_left_chat_member, handle_message,
        handle_new_chat_members, CommandRegistry,
    },
    services::ServiceFactory,
    state::SessionStore,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let settings = Settings::new()?;
    settings.validate()?;

    // The guard keeps the file appender flushing until the process exits
    let _logging_guard = logging::init_logging(&settings.logging)?;

    info!("Starting VolleyBuddy Telegram Bot...");

    info!("Connecting to database...");
    let pool = connection::create_pool(&settings.database).await?;
    connection::run_migrations(&pool).await?;

    let database_service = DatabaseService::new(pool.clone());

    info!("Connecting to Redis...");
    let sessions = SessionStore::new(settings.redis.clone())?;

    let bot = Bot::new(&settings.bot.token);

    info!("Initializing services...");
    let services = ServiceFactory::new(bot.clone(), settings, database_service, sessions);
    let registry = Arc::new(build_registry());

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![Arc::new(services), registry])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("VolleyBuddy bot is ready, starting polling...");
    dispatcher.dispatch().await;

    // Ctrl-C stops the dispatcher; drain the pool before exiting
    info!("Shutting down, closing database pool...");
    pool.close().await;
    info!("VolleyBuddy bot has been shut down.");

    Ok(())
}

/// Wire the update branches: membership events first, then text dispatch,
/// then callback queries.
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::filter(|msg: Message| msg.new_chat_members().is_some())
                        .endpoint(handle_new_members),
                )
                .branch(
                    dptree::filter(|msg: Message| msg.left_chat_member().is_some())
                        .endpoint(handle_left_member),
                )
                .branch(dptree::endpoint(handle_text_message)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

async fn handle_text_message(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    registry: Arc<CommandRegistry>,
) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, (*services).clone(), registry).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }
    Ok(())
}

async fn handle_new_members(msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    if let Err(e) = handle_new_chat_members(msg, (*services).clone()).await {
        error!(error = %e, "Error greeting new chat member");
        return Err(e.into());
    }
    Ok(())
}

async fn handle_left_member(msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    if let Err(e) = handle_left_chat_member(msg, (*services).clone()).await {
        error!(error = %e, "Error seeing off left chat member");
        return Err(e.into());
    }
    Ok(())
}

async fn handle_callbacks(
    query: teloxide::types::CallbackQuery,
    services: Arc<ServiceFactory>,
) -> HandlerResult {
    if let Err(e) = handle_callback_query(query, (*services).clone()).await {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }
    Ok(())
}
