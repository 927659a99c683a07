//! Shared state for the Herald bot.

use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::delivery::DeliveryChannel;
use crate::scheduler::{ActiveMessage, ScheduleController};
use crate::session::{SetupSession, SetupStep};

/// Reply sent to senders who are not the allow-listed user.
const UNAUTHORIZED_REPLY: &str = "You are not authorized to use this bot.";

/// Shared state for the Herald bot, accessible across all handlers.
///
/// All mutation flows through here: the setup conversation promotes its
/// draft via the controller, and the controller's timer task advances the
/// active counters. Nothing lives in module-level globals.
pub struct BotState {
    /// The single allow-listed Telegram username.
    allowed_user: String,
    /// In-progress setup conversations (chat_id -> state machine position).
    sessions: RwLock<HashMap<i64, SetupSession>>,
    /// Owns the active message and the daily job.
    controller: ScheduleController,
}

impl BotState {
    pub fn new(allowed_user: String, delivery: Arc<dyn DeliveryChannel>) -> Self {
        Self {
            allowed_user,
            sessions: RwLock::new(HashMap::new()),
            controller: ScheduleController::new(delivery),
        }
    }

    /// Authorization gate: only the configured username may use the bot.
    pub fn is_authorized(&self, username: Option<&str>) -> bool {
        username == Some(self.allowed_user.as_str())
    }

    /// Gate an operation, tearing down any in-progress conversation for the
    /// chat when the sender is not allowed. Returns the rejection reply on
    /// failure; no other state is touched.
    async fn gate(&self, chat: ChatId, username: Option<&str>) -> Option<String> {
        if self.is_authorized(username) {
            return None;
        }
        let removed = self.sessions.write().await.remove(&chat.0).is_some();
        if removed {
            debug!(chat_id = %chat.0, "Conversation terminated for unauthorized sender");
        }
        Some(UNAUTHORIZED_REPLY.to_string())
    }

    // --- Conversation entry points ---

    /// /create_scheduled_message: enter (or re-enter) the setup conversation.
    pub async fn begin_setup(&self, chat: ChatId, username: Option<&str>) -> String {
        if let Some(rejection) = self.gate(chat, username).await {
            return rejection;
        }
        self.sessions
            .write()
            .await
            .insert(chat.0, SetupSession::AwaitingMessage);
        info!(chat_id = %chat.0, "Setup conversation started");
        SetupSession::entry_prompt().to_string()
    }

    /// /cancel: abort any in-progress conversation, discarding the draft.
    pub async fn cancel_setup(&self, chat: ChatId, username: Option<&str>) -> String {
        if let Some(rejection) = self.gate(chat, username).await {
            return rejection;
        }
        self.sessions.write().await.remove(&chat.0);
        "Operation cancelled.".to_string()
    }

    /// Route one plain text message into the conversation and return the
    /// reply to send.
    pub async fn handle_text(&self, chat: ChatId, username: Option<&str>, text: &str) -> String {
        if let Some(rejection) = self.gate(chat, username).await {
            return rejection;
        }

        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.remove(&chat.0) else {
            return "No setup in progress. Use /create_scheduled_message to begin.".to_string();
        };

        match session.advance(text) {
            SetupStep::Continue { next, reply } => {
                sessions.insert(chat.0, next);
                reply
            }
            SetupStep::Commit { draft, time } => {
                drop(sessions);
                let message = ActiveMessage {
                    template: draft.template,
                    counters: draft.counters,
                };
                self.controller.install(message, time, chat).await;
                "Scheduled message has been set up successfully!".to_string()
            }
        }
    }

    // --- Stateless command entry points ---

    /// /stop_scheduled_message: cancel the active job, if any.
    pub async fn stop_schedule(&self, chat: ChatId, username: Option<&str>) -> String {
        if let Some(rejection) = self.gate(chat, username).await {
            return rejection;
        }
        if self.controller.cancel().await {
            "Scheduled message has been stopped.".to_string()
        } else {
            "There is no active scheduled message.".to_string()
        }
    }

    /// /trigger_job: run one firing immediately, counters and all.
    pub async fn trigger_job(&self, chat: ChatId, username: Option<&str>) -> String {
        if let Some(rejection) = self.gate(chat, username).await {
            return rejection;
        }
        match self.controller.fire_now().await {
            Ok(_) => {
                info!(chat_id = %chat.0, "Scheduled job triggered manually");
                "Scheduled job triggered manually.".to_string()
            }
            Err(e) => e.to_string(),
        }
    }

    /// Access to the schedule controller, for status reporting and tests.
    pub fn controller(&self) -> &ScheduleController {
        &self.controller
    }
}

/// Create a shared state wrapped in Arc for use across handlers.
pub fn create_shared_state(
    allowed_user: String,
    delivery: Arc<dyn DeliveryChannel>,
) -> Arc<BotState> {
    Arc::new(BotState::new(allowed_user, delivery))
}
