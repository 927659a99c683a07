//! Outbound delivery seam between the scheduler and the Telegram API.

use async_trait::async_trait;
use teloxide::prelude::*;

use crate::error::Result;

/// Where rendered messages go when a job fires.
///
/// The schedule controller only talks to this trait, so tests can capture
/// deliveries without a live Telegram connection.
#[async_trait]
pub trait DeliveryChannel: Send + Sync + 'static {
    async fn deliver(&self, chat: ChatId, text: &str) -> Result<()>;
}

/// Production channel backed by the teloxide [`Bot`].
pub struct TelegramDelivery {
    bot: Bot,
}

impl TelegramDelivery {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl DeliveryChannel for TelegramDelivery {
    async fn deliver(&self, chat: ChatId, text: &str) -> Result<()> {
        self.bot.send_message(chat, text).await?;
        Ok(())
    }
}
