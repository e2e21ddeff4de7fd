//! Callback query handling for inline keyboard buttons

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::types::{sender_id, HandlerDeps};
use crate::core::AppResult;
use crate::storage::db;
use crate::storage::get_connection;
use crate::telegram::callback::{AdminAction, CallbackAction};
use crate::telegram::menu;

/// Number of transactions shown by the my_transactions button
const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// What a callback press resolves to, separated from Telegram I/O.
#[derive(Debug, PartialEq)]
pub enum CallbackOutcome {
    /// Send a text reply to the chat
    Reply(String),
    /// Delete the menu message that carried the button, no reply text
    DeleteMenu,
    /// Nothing to do (unrecognized identifier)
    Ignore,
}

/// Resolve a button press into an outcome.
///
/// Admin actions re-check the roster even though the menu that produced
/// them was admin-gated: callback payloads can be forged by any client.
pub fn process_callback(conn: &db::DbConnection, user_id: i64, data: &str) -> rusqlite::Result<CallbackOutcome> {
    match CallbackAction::parse(data) {
        CallbackAction::BuyMail => Ok(CallbackOutcome::Reply(menu::BUY_MAIL_TEXT.to_string())),
        CallbackAction::MyTransactions => {
            let transactions = db::list_recent_transactions(conn, user_id, RECENT_TRANSACTIONS_LIMIT)?;
            if transactions.is_empty() {
                Ok(CallbackOutcome::Reply(menu::NO_TRANSACTIONS_TEXT.to_string()))
            } else {
                Ok(CallbackOutcome::Reply(menu::format_transactions(&transactions)))
            }
        }
        CallbackAction::Help => Ok(CallbackOutcome::Reply(menu::HELP_TEXT.to_string())),
        CallbackAction::Admin(action) => {
            if !db::is_admin(conn, user_id)? {
                return Ok(CallbackOutcome::Reply(menu::ADMIN_ACCESS_REQUIRED_TEXT.to_string()));
            }
            match action {
                AdminAction::Close => Ok(CallbackOutcome::DeleteMenu),
                AdminAction::Users => {
                    let total = db::count_users(conn)?;
                    let blocked = db::count_blocked_users(conn)?;
                    Ok(CallbackOutcome::Reply(menu::user_stats_text(total, blocked)))
                }
                AdminAction::Transactions => {
                    let total = db::count_transactions(conn)?;
                    let completed = db::count_completed_transactions(conn)?;
                    let amount = db::sum_completed_amount(conn)?;
                    Ok(CallbackOutcome::Reply(menu::transaction_stats_text(total, completed, amount)))
                }
                AdminAction::Stats => {
                    let users = db::count_users(conn)?;
                    let transactions = db::count_transactions(conn)?;
                    let admins = db::count_admins(conn)?;
                    Ok(CallbackOutcome::Reply(menu::bot_stats_text(users, transactions, admins)))
                }
                AdminAction::ManageAdmins | AdminAction::Unknown(_) => {
                    Ok(CallbackOutcome::Reply(menu::NOT_IMPLEMENTED_TEXT.to_string()))
                }
            }
        }
        CallbackAction::Unrecognized(data) => {
            log::warn!("Ignoring unrecognized callback data: {:?}", data);
            Ok(CallbackOutcome::Ignore)
        }
    }
}

/// Handle a callback query from an inline keyboard button.
pub async fn handle_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> AppResult<()> {
    // ACK the press so the client stops showing the spinner
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };

    let chat_id = q.message.as_ref().map(|m| m.chat().id);
    let message_id = q.message.as_ref().map(|m| m.id());
    let (Some(chat_id), Some(message_id)) = (chat_id, message_id) else {
        return Ok(());
    };

    // Never fall back to a default id here: 0 is the seeded main admin.
    let Some(user_id) = sender_id(q.from.id) else {
        return Ok(());
    };

    let outcome = {
        let conn = get_connection(&deps.db_pool)?;
        process_callback(&conn, user_id, data)?
    };

    match outcome {
        CallbackOutcome::Reply(text) => {
            bot.send_message(chat_id, text).parse_mode(ParseMode::Markdown).await?;
        }
        CallbackOutcome::DeleteMenu => {
            bot.delete_message(chat_id, message_id).await?;
        }
        CallbackOutcome::Ignore => {}
    }

    Ok(())
}
