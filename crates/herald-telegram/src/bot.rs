//! Main Herald bot implementation.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::delivery::TelegramDelivery;
use crate::error::{HeraldError, Result};
use crate::handlers::{handle_command, handle_message, Command};
use crate::state::{create_shared_state, BotState};

/// The Telegram bot for Herald.
pub struct HeraldBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<BotState>,
}

impl HeraldBot {
    /// Create a new HeraldBot instance.
    ///
    /// Requires `TELEGRAM_BOT_TOKEN` and `HERALD_ALLOWED_USER` environment
    /// variables to be set.
    pub fn new() -> Result<Self> {
        let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| HeraldError::NoToken)?;
        let allowed_user =
            std::env::var("HERALD_ALLOWED_USER").map_err(|_| HeraldError::NoAllowedUser)?;

        let bot = Bot::new(token);
        let delivery = Arc::new(TelegramDelivery::new(bot.clone()));
        let state = create_shared_state(allowed_user, delivery);

        Ok(Self { bot, state })
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| HeraldError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Register the command list with Telegram.
    pub async fn set_commands(&self) -> Result<()> {
        self.bot
            .set_my_commands(Command::bot_commands())
            .await
            .map_err(|e| HeraldError::BotStartFailed(e.to_string()))?;
        Ok(())
    }

    /// Start the bot in polling mode.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting Herald bot in polling mode...");

        if let Err(e) = self.set_commands().await {
            warn!(error = %e, "Could not register bot commands");
        }

        let bot = self.bot.clone();
        let state_for_commands = Arc::clone(&self.state);
        let state_for_messages = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state_for_commands);
                        info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        async move { handle_command(bot, msg, cmd, state).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Unrecognized commands (start with / but didn't parse)
                        msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(move |bot: Bot, msg: Message| async move {
                        if let Some(text) = msg.text() {
                            bot.send_message(
                                msg.chat.id,
                                format!(
                                    "Unknown command: {}\n\nUse /help to see available commands.",
                                    text.split_whitespace().next().unwrap_or(text)
                                ),
                            )
                            .await?;
                        }
                        Ok(())
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Only handle non-command text messages
                        msg.text().map(|t| !t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_messages);
                        async move { handle_message(bot, msg, state).await }
                    }),
            );

        info!("Bot is running! Send /create_scheduled_message to begin.");

        Dispatcher::builder(bot, handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }

    /// Shared state, mainly for status inspection and tests.
    pub fn state(&self) -> &Arc<BotState> {
        &self.state
    }
}
