//! Bot initialization and command definitions

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "start the bot")]
    Start,
    #[command(description = "show this help message")]
    Help,
    #[command(description = "admin panel (admins only)")]
    Admin,
}

/// Creates a Bot instance from the configured token.
pub fn create_bot(token: &str) -> Bot {
    Bot::new(token)
}

/// Sets up bot commands in the Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("start", "start the bot"),
        BotCommand::new("help", "show this help message"),
        BotCommand::new("admin", "admin panel (admins only)"),
    ])
    .await?;

    Ok(())
}
