//! Menu keyboards and user-facing message texts

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::storage::db::Transaction;

/// Reply for blocked users on /start
pub const BLOCKED_TEXT: &str = "You have been blocked from using this bot.";

/// Fixed /help reply
pub const HELP_TEXT: &str = "📖 *Help*\n\n\
    Available commands:\n\
    /start - Start the bot\n\
    /help - Show this help message\n\
    /admin - Admin panel (admins only)\n\n\
    Use the buttons to navigate and make purchases.";

/// Refusal for non-admins on /admin
pub const NOT_ADMIN_TEXT: &str = "🚫 This command is only available to administrators.";

/// Refusal for non-admins pressing an admin button
pub const ADMIN_ACCESS_REQUIRED_TEXT: &str = "🚫 Admin access required.";

/// Placeholder reply for the buy_mail button
pub const BUY_MAIL_TEXT: &str = "📧 *Mail Purchase*\n\n\
    Please contact support to complete your purchase.\n\
    This feature will be fully implemented soon!";

/// Reply when a user has no transactions
pub const NO_TRANSACTIONS_TEXT: &str = "You have no transactions yet.";

/// Generic fallback for unimplemented admin actions
pub const NOT_IMPLEMENTED_TEXT: &str = "This feature is not yet implemented.";

/// Admin panel header
pub const ADMIN_PANEL_TEXT: &str = "👑 *Admin Panel*\n\nSelect an option:";

/// Welcome text for /start, greeting the user by first name.
pub fn welcome_text(first_name: &str) -> String {
    format!(
        "👋 Welcome to Mail Purchase Bot!\n\n\
         Hello {}!\n\n\
         Use /help to see available commands.",
        first_name
    )
}

/// Main menu shown after /start: one selectable action per row.
pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📧 Buy Mail", "buy_mail")],
        vec![InlineKeyboardButton::callback("📊 My Transactions", "my_transactions")],
        vec![InlineKeyboardButton::callback("❓ Help", "help")],
    ])
}

/// Admin panel menu. The main admin gets an extra Manage Admins row on top.
pub fn admin_menu_keyboard(is_main_admin: bool) -> InlineKeyboardMarkup {
    let mut rows = vec![
        vec![InlineKeyboardButton::callback("👥 Manage Users", "admin_users")],
        vec![InlineKeyboardButton::callback("💰 View Transactions", "admin_transactions")],
        vec![InlineKeyboardButton::callback("📊 Statistics", "admin_stats")],
        vec![InlineKeyboardButton::callback("❌ Close", "admin_close")],
    ];

    if is_main_admin {
        rows.insert(
            0,
            vec![InlineKeyboardButton::callback("👑 Manage Admins", "admin_manage_admins")],
        );
    }

    InlineKeyboardMarkup::new(rows)
}

/// Format a user's recent transactions for the my_transactions reply.
///
/// Expects the slice already ordered newest first, as returned by
/// `list_recent_transactions`.
pub fn format_transactions(transactions: &[Transaction]) -> String {
    let mut text = String::from("📊 *Your Recent Transactions*\n\n");
    for txn in transactions {
        text.push_str(&format!("ID: {}\n", txn.transaction_id));
        text.push_str(&format!("Amount: ${}\n", txn.amount.unwrap_or(0.0)));
        text.push_str(&format!("Status: {}\n", txn.status.as_deref().unwrap_or("unknown")));
        text.push_str(&format!("Date: {}\n\n", txn.created_at));
    }
    text
}

/// User statistics reply for admin_users.
pub fn user_stats_text(total: i64, blocked: i64) -> String {
    format!(
        "👥 *User Statistics*\n\n\
         Total Users: {}\n\
         Blocked Users: {}\n\
         Active Users: {}",
        total,
        blocked,
        total - blocked
    )
}

/// Transaction statistics reply for admin_transactions.
pub fn transaction_stats_text(total: i64, completed: i64, completed_amount: f64) -> String {
    format!(
        "💰 *Transaction Statistics*\n\n\
         Total Transactions: {}\n\
         Completed: {}\n\
         Total Amount: ${:.2}",
        total, completed, completed_amount
    )
}

/// Overall bot statistics reply for admin_stats.
pub fn bot_stats_text(users: i64, transactions: i64, admins: i64) -> String {
    format!(
        "📊 *Bot Statistics*\n\n\
         👥 Users: {}\n\
         💰 Transactions: {}\n\
         👑 Admins: {}",
        users, transactions, admins
    )
}
