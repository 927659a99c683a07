//! The schedule controller: owns the single recurring daily job.

use std::sync::Arc;

use herald_core::{render, schedule, CounterState, ScheduleTime};
use teloxide::types::ChatId;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::delivery::DeliveryChannel;
use crate::error::{HeraldError, Result};

/// The committed template and counters used for real firings.
#[derive(Debug, Clone)]
pub struct ActiveMessage {
    pub template: String,
    pub counters: CounterState,
}

/// Handle to the installed daily job.
struct ActiveJob {
    chat: ChatId,
    time: ScheduleTime,
    task: JoinHandle<()>,
}

/// Owns the at-most-one recurring job and the active message state.
///
/// The active template/counters live behind a single `RwLock` shared with
/// the spawned timer task; the job handle itself sits behind a `Mutex` so
/// install/cancel/replace are serialized.
pub struct ScheduleController {
    active: Arc<RwLock<Option<ActiveMessage>>>,
    job: Mutex<Option<ActiveJob>>,
    delivery: Arc<dyn DeliveryChannel>,
}

impl ScheduleController {
    pub fn new(delivery: Arc<dyn DeliveryChannel>) -> Self {
        Self {
            active: Arc::new(RwLock::new(None)),
            job: Mutex::new(None),
            delivery,
        }
    }

    /// Promote a message to active state and install its daily job,
    /// superseding any existing one.
    ///
    /// The previous job (if any) is aborted before the new task is spawned,
    /// so at most one job exists at any time.
    pub async fn install(&self, message: ActiveMessage, time: ScheduleTime, chat: ChatId) {
        let mut job = self.job.lock().await;
        if let Some(old) = job.take() {
            old.task.abort();
            info!(chat_id = %old.chat.0, "Superseded previous scheduled job");
        }

        *self.active.write().await = Some(message);

        let active = Arc::clone(&self.active);
        let delivery = Arc::clone(&self.delivery);
        let task = tokio::spawn(async move {
            run_daily(time, chat, active, delivery).await;
        });

        *job = Some(ActiveJob { chat, time, task });
        info!(chat_id = %chat.0, time = %time, "Scheduled job installed");
    }

    /// Cancel the active job. Returns whether one existed.
    pub async fn cancel(&self) -> bool {
        let mut job = self.job.lock().await;
        match job.take() {
            Some(active) => {
                active.task.abort();
                info!(chat_id = %active.chat.0, "Scheduled message stopped");
                true
            }
            None => false,
        }
    }

    /// Whether a job is currently installed.
    pub async fn has_job(&self) -> bool {
        self.job.lock().await.is_some()
    }

    /// Schedule time and delivery target of the installed job, if any.
    pub async fn job_info(&self) -> Option<(ScheduleTime, ChatId)> {
        self.job.lock().await.as_ref().map(|j| (j.time, j.chat))
    }

    /// Fire the job logic once, immediately.
    ///
    /// Runs the exact advance-render-deliver sequence of a real firing, so
    /// counters move just as they would at the scheduled time.
    pub async fn fire_now(&self) -> Result<String> {
        let chat = {
            let job = self.job.lock().await;
            job.as_ref()
                .map(|j| j.chat)
                .ok_or(HeraldError::NoActiveSchedule)?
        };
        fire(&self.active, self.delivery.as_ref(), chat).await
    }
}

/// One firing: advance counters, render the post-advance state, deliver.
///
/// The write guard is held across the delivery await so two firings can
/// never interleave their advance and deliver steps.
async fn fire(
    active: &RwLock<Option<ActiveMessage>>,
    delivery: &dyn DeliveryChannel,
    chat: ChatId,
) -> Result<String> {
    let mut guard = active.write().await;
    let message = guard.as_mut().ok_or(HeraldError::NoActiveSchedule)?;
    message.counters.advance();
    let text = render(&message.template, &message.counters);
    delivery.deliver(chat, &text).await?;
    info!(chat_id = %chat.0, text = %text, "Scheduled message sent");
    Ok(text)
}

/// Background task body: sleep until each next occurrence, then fire.
async fn run_daily(
    time: ScheduleTime,
    chat: ChatId,
    active: Arc<RwLock<Option<ActiveMessage>>>,
    delivery: Arc<dyn DeliveryChannel>,
) {
    loop {
        let now = schedule::now();
        let next = time.next_occurrence(now);
        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        info!(fired_at = %schedule::now(), "Job executed");
        if let Err(e) = fire(&active, delivery.as_ref(), chat).await {
            warn!(chat_id = %chat.0, error = %e, "Scheduled firing failed");
        }
    }
}
