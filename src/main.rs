use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use mailbot::core::{config, init_logger};
use mailbot::storage::db::seed_main_admin;
use mailbot::storage::{create_pool, get_connection};
use mailbot::telegram::{create_bot, schema, setup_bot_commands};
use mailbot::HandlerDeps;

/// Main entry point for the Telegram bot
///
/// Initializes logging, the database, and the dispatcher, then blocks
/// serving updates via long polling until ctrl-c.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    let token = config::BOT_TOKEN.clone();
    if token.is_empty() {
        log::error!("BOT_TOKEN not found in environment variables");
        std::process::exit(1);
    }

    log::info!("Starting Mail Purchase Bot...");

    // Create database connection pool; migrations run on the first connection
    log::info!("Initializing database at {}", &*config::DATABASE_PATH);
    let db_pool = Arc::new(create_pool(&config::DATABASE_PATH)?);

    // Seed the main admin row (idempotent)
    {
        let conn = get_connection(&db_pool)?;
        seed_main_admin(&conn, &config::admin::MAIN_ADMIN_USERNAME)?;
    }
    log::info!("Database initialized");

    let bot = create_bot(&token);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let handler = schema(HandlerDeps::new(Arc::clone(&db_pool)));

    log::info!("Bot started!");

    // Long polling; the dispatcher's logging error handler is the only
    // top-level error hook, matching the update-loop failure semantics.
    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
