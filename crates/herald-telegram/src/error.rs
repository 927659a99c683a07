//! Error types for the Herald bot.

use thiserror::Error;

/// Errors that can occur in the Herald bot.
#[derive(Debug, Error)]
pub enum HeraldError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    NoToken,

    /// Allow-listed username not provided.
    #[error("Allowed user not set. Set HERALD_ALLOWED_USER environment variable.")]
    NoAllowedUser,

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// No schedule is installed.
    #[error("There is no active scheduled message.")]
    NoActiveSchedule,

    /// The messaging gateway failed to deliver a message.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Result type for Herald operations.
pub type Result<T> = std::result::Result<T, HeraldError>;

impl From<teloxide::RequestError> for HeraldError {
    fn from(e: teloxide::RequestError) -> Self {
        HeraldError::Delivery(e.to_string())
    }
}
