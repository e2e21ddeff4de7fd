use once_cell::sync::Lazy;
use std::env;

/// Configuration constants for the bot

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: bot.db
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "bot.db".to_string()));

/// Log file path
/// Read from LOG_FILE environment variable
/// Default: bot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE").unwrap_or_else(|_| "bot.log".to_string()));

/// Log level for both console and file output
/// Read from LOG_LEVEL environment variable ("error", "warn", "info", "debug", "trace")
/// Default: info
pub static LOG_LEVEL: Lazy<String> =
    Lazy::new(|| env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

/// Admin configuration
pub mod admin {
    use super::*;

    /// Username of the main admin, seeded into the admins table at startup
    /// Read from MAIN_ADMIN_USERNAME environment variable
    pub static MAIN_ADMIN_USERNAME: Lazy<String> =
        Lazy::new(|| env::var("MAIN_ADMIN_USERNAME").unwrap_or_else(|_| "@admin".to_string()));

    /// Sentinel user_id for the seeded main admin row. Real admins carry
    /// their Telegram id; the seeded row only marks the configured username.
    pub const MAIN_ADMIN_SENTINEL_ID: i64 = 0;
}
