//! Telegram bot interface for Herald.
//!
//! This crate provides a single-user Telegram bot that sends one templated
//! message per day at a configured time. Templates may embed
//! `{increment, N}` and `{decrement, N}` counters that step once per firing,
//! so "Day {increment, 1}" delivers "Day 2", "Day 3", ... on successive days.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//! - `HERALD_ALLOWED_USER`: The only Telegram username allowed to use the bot
//!
//! # Example
//!
//! ```no_run
//! use herald_telegram::HeraldBot;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bot = HeraldBot::new()?;
//!     bot.start_polling().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Commands
//!
//! - `/create_scheduled_message` - Set up the daily message (template, time, confirm)
//! - `/stop_scheduled_message` - Stop the current schedule
//! - `/trigger_job` - Fire the job once, immediately (counters advance as usual)
//! - `/cancel` - Abort an in-progress setup conversation
//! - `/help` - Show available commands

pub mod bot;
pub mod delivery;
pub mod error;
pub mod handlers;
pub mod scheduler;
pub mod session;
pub mod state;

pub use bot::HeraldBot;
pub use delivery::{DeliveryChannel, TelegramDelivery};
pub use error::{HeraldError, Result};
pub use scheduler::{ActiveMessage, ScheduleController};
pub use session::{Draft, SetupSession, SetupStep};
pub use state::{create_shared_state, BotState};
