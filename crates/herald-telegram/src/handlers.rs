//! Command handlers for the Herald bot.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::state::BotState;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "snake_case", description = "Available commands:")]
pub enum Command {
    #[command(description = "Create a new scheduled message")]
    CreateScheduledMessage,

    #[command(description = "Stop the current scheduled message")]
    StopScheduledMessage,

    #[command(description = "Trigger the scheduled job manually for testing")]
    TriggerJob,

    #[command(description = "Cancel the current setup conversation")]
    Cancel,

    #[command(description = "Show help message")]
    Help,
}

/// Username of the sender, if Telegram attached one.
fn sender_username(msg: &Message) -> Option<&str> {
    msg.from.as_ref().and_then(|u| u.username.as_deref())
}

/// Dispatch commands to appropriate handlers.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    let username = sender_username(&msg);
    let reply = match cmd {
        Command::CreateScheduledMessage => state.begin_setup(msg.chat.id, username).await,
        Command::StopScheduledMessage => state.stop_schedule(msg.chat.id, username).await,
        Command::TriggerJob => state.trigger_job(msg.chat.id, username).await,
        Command::Cancel => state.cancel_setup(msg.chat.id, username).await,
        Command::Help => Command::descriptions().to_string(),
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Handle plain (non-command) text: feed it to the setup conversation.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let username = sender_username(&msg);
    let reply = state.handle_text(msg.chat.id, username, text).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
