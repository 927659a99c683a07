//! Setup-conversation state machine.
//!
//! The conversation collects a message template, a time of day and a
//! confirmation, keeping everything as an uncommitted draft until the final
//! "yes". The machine itself is pure: feeding a message in returns the next
//! position and the reply to send, and the shared bot state applies both.

use herald_core::{render, CounterState, ScheduleTime};

/// Uncommitted template plus the counters seeded from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub template: String,
    pub counters: CounterState,
}

impl Draft {
    /// Build a draft from raw template text, seeding counters immediately.
    ///
    /// The active schedule is untouched; these counters only become real on
    /// the final confirmation.
    pub fn new(template: String) -> Self {
        let counters = CounterState::seed_from(&template);
        Self { template, counters }
    }

    /// Render the draft with its freshly seeded counters (pre-advance), so
    /// the preview shows the seed values in place.
    pub fn preview(&self) -> String {
        render(&self.template, &self.counters)
    }
}

/// Where an in-progress setup conversation currently stands.
///
/// The terminal Idle state is represented by the chat having no session at
/// all, so every variant here is mid-conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupSession {
    /// Waiting for the message template text.
    AwaitingMessage,
    /// Waiting for the daily time of day.
    AwaitingTime { draft: Draft },
    /// Waiting for a Yes/No on the shown preview.
    AwaitingConfirmation { draft: Draft, time: ScheduleTime },
}

/// Outcome of feeding one message into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupStep {
    /// Conversation continues (or restarts); reply with the given prompt.
    Continue { next: SetupSession, reply: String },
    /// The draft was confirmed; promote it and end the conversation.
    Commit { draft: Draft, time: ScheduleTime },
}

impl SetupSession {
    /// Prompt sent when the conversation is (re)entered.
    pub fn entry_prompt() -> &'static str {
        "Let's create a scheduled message. First, please enter the custom message you want to send daily."
    }

    /// Advance the machine with one incoming text message.
    pub fn advance(self, text: &str) -> SetupStep {
        match self {
            SetupSession::AwaitingMessage => {
                let draft = Draft::new(text.to_string());
                SetupStep::Continue {
                    next: SetupSession::AwaitingTime { draft },
                    reply: "Message set. Now, please specify the time for the daily message \
                            (in 24-hour format, e.g., 14:30 for 2:30 PM)."
                        .to_string(),
                }
            }
            SetupSession::AwaitingTime { draft } => match ScheduleTime::parse(text) {
                Ok(time) => {
                    let reply = format!(
                        "Your message will be sent daily at {} Singapore time.\n\n\
                         Here's a preview of your message:\n\n{}\n\n\
                         Is this correct? (Yes/No)",
                        time,
                        draft.preview()
                    );
                    SetupStep::Continue {
                        next: SetupSession::AwaitingConfirmation { draft, time },
                        reply,
                    }
                }
                Err(_) => SetupStep::Continue {
                    next: SetupSession::AwaitingTime { draft },
                    reply: "Invalid time format. Please use HH:MM (24-hour format).".to_string(),
                },
            },
            SetupSession::AwaitingConfirmation { draft, time } => {
                match text.trim().to_lowercase().as_str() {
                    "yes" => SetupStep::Commit { draft, time },
                    "no" => SetupStep::Continue {
                        next: SetupSession::AwaitingMessage,
                        reply: "Let's start over. Please enter your custom message.".to_string(),
                    },
                    _ => SetupStep::Continue {
                        next: SetupSession::AwaitingConfirmation { draft, time },
                        reply: "Please respond with 'Yes' or 'No'.".to_string(),
                    },
                }
            }
        }
    }
}
