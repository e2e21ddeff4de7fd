//! Command handlers for /start, /help, and /admin
//!
//! Each command's decision is computed by a plain function over a database
//! connection, returning an outcome the async wrapper turns into Telegram
//! calls. This keeps the blocked/admin branching testable without a bot.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, ParseMode};

use super::types::{sender_id, HandlerDeps};
use crate::core::AppResult;
use crate::storage::db;
use crate::storage::get_connection;
use crate::telegram::menu;

/// Outcome of processing /start.
#[derive(Debug, PartialEq)]
pub enum StartOutcome {
    /// Sender is blocked: send the rejection text, nothing else
    Blocked,
    /// Welcome reply with the main menu
    Welcome {
        text: String,
        keyboard: InlineKeyboardMarkup,
    },
}

/// Outcome of processing /admin.
#[derive(Debug, PartialEq)]
pub enum AdminOutcome {
    /// Sender is not in the admin roster
    Refused,
    /// Admin panel with the menu matching the sender's privilege level
    Panel { keyboard: InlineKeyboardMarkup },
}

/// Register the sender and decide the /start reply.
///
/// Upserts the user unconditionally (blocked users are still recorded),
/// then checks the blocked flag.
pub fn process_start(
    conn: &db::DbConnection,
    user_id: i64,
    username: Option<&str>,
    first_name: &str,
    last_name: Option<&str>,
) -> rusqlite::Result<StartOutcome> {
    db::upsert_user(conn, user_id, username, Some(first_name), last_name)?;

    if db::is_blocked(conn, user_id)? {
        return Ok(StartOutcome::Blocked);
    }

    Ok(StartOutcome::Welcome {
        text: menu::welcome_text(first_name),
        keyboard: menu::main_menu_keyboard(),
    })
}

/// Decide the /admin reply for the sender.
pub fn process_admin(conn: &db::DbConnection, user_id: i64) -> rusqlite::Result<AdminOutcome> {
    if !db::is_admin(conn, user_id)? {
        return Ok(AdminOutcome::Refused);
    }

    let is_main = db::is_main_admin(conn, user_id)?;
    Ok(AdminOutcome::Panel {
        keyboard: menu::admin_menu_keyboard(is_main),
    })
}

/// Handle the /start command
pub async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(user_id) = sender_id(from.id) else {
        return Ok(());
    };

    let outcome = {
        let conn = get_connection(&deps.db_pool)?;
        process_start(
            &conn,
            user_id,
            from.username.as_deref(),
            &from.first_name,
            from.last_name.as_deref(),
        )?
    };

    match outcome {
        StartOutcome::Blocked => {
            log::info!("Blocked user {} attempted /start", user_id);
            bot.send_message(msg.chat.id, menu::BLOCKED_TEXT).await?;
        }
        StartOutcome::Welcome { text, keyboard } => {
            bot.send_message(msg.chat.id, text).reply_markup(keyboard).await?;
        }
    }

    Ok(())
}

/// Handle the /help command
pub async fn handle_help_command(bot: &Bot, chat_id: ChatId) -> AppResult<()> {
    bot.send_message(chat_id, menu::HELP_TEXT)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/// Handle the /admin command
pub async fn handle_admin_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    // Never fall back to a default id here: 0 is the seeded main admin.
    let Some(user_id) = msg.from.as_ref().and_then(|u| sender_id(u.id)) else {
        return Ok(());
    };

    let outcome = {
        let conn = get_connection(&deps.db_pool)?;
        process_admin(&conn, user_id)?
    };

    match outcome {
        AdminOutcome::Refused => {
            bot.send_message(msg.chat.id, menu::NOT_ADMIN_TEXT).await?;
        }
        AdminOutcome::Panel { keyboard } => {
            bot.send_message(msg.chat.id, menu::ADMIN_PANEL_TEXT)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboard)
                .await?;
        }
    }

    Ok(())
}
