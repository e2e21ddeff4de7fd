//! Mailbot - Telegram bot for mail purchases
//!
//! This library provides all the core functionality for the bot: user
//! registration, the admin roster, transaction history reads, and the
//! Telegram dispatcher schema.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, and logging
//! - `storage`: Database pool, migrations, and accessors
//! - `telegram`: Bot commands, menus, and handlers

pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use crate::storage::{create_pool, get_connection, DbConnection, DbPool};
pub use crate::telegram::{create_bot, schema, Command, HandlerDeps};
