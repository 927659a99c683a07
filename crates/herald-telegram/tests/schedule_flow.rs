//! Integration tests for the scheduling flow, driven end to end against a
//! fake delivery channel.

use std::sync::Arc;

use async_trait::async_trait;
use herald_core::ScheduleTime;
use herald_telegram::{ActiveMessage, BotState, DeliveryChannel};
use teloxide::types::ChatId;
use tokio::sync::Mutex;

const USER: &str = "alice";
const CHAT: ChatId = ChatId(1001);

/// Captures deliveries instead of talking to Telegram.
#[derive(Default)]
struct FakeDelivery {
    sent: Mutex<Vec<(ChatId, String)>>,
}

#[async_trait]
impl DeliveryChannel for FakeDelivery {
    async fn deliver(&self, chat: ChatId, text: &str) -> herald_telegram::Result<()> {
        self.sent.lock().await.push((chat, text.to_string()));
        Ok(())
    }
}

fn state_with_fake() -> (Arc<BotState>, Arc<FakeDelivery>) {
    let delivery = Arc::new(FakeDelivery::default());
    let state = Arc::new(BotState::new(USER.to_string(), delivery.clone()));
    (state, delivery)
}

#[tokio::test]
async fn full_setup_and_manual_trigger_advances_counters() {
    let (state, delivery) = state_with_fake();

    let prompt = state.begin_setup(CHAT, Some(USER)).await;
    assert!(prompt.contains("enter the custom message"));

    let prompt = state
        .handle_text(CHAT, Some(USER), "Day {increment, 1}")
        .await;
    assert!(prompt.contains("specify the time"));

    let preview = state.handle_text(CHAT, Some(USER), "09:00").await;
    assert!(preview.contains("09:00"));
    assert!(preview.contains("Day 1"));

    let done = state.handle_text(CHAT, Some(USER), "yes").await;
    assert!(done.contains("successfully"));
    assert!(state.controller().has_job().await);

    // First manual trigger: seed 1 advances to 2 before rendering.
    let reply = state.trigger_job(CHAT, Some(USER)).await;
    assert_eq!(reply, "Scheduled job triggered manually.");
    assert_eq!(
        *delivery.sent.lock().await,
        vec![(CHAT, "Day 2".to_string())]
    );

    // Second trigger keeps counting.
    state.trigger_job(CHAT, Some(USER)).await;
    assert_eq!(delivery.sent.lock().await.last().unwrap().1, "Day 3");
}

#[tokio::test]
async fn install_twice_leaves_exactly_one_job() {
    let (state, _delivery) = state_with_fake();
    let controller = state.controller();

    controller
        .install(
            ActiveMessage {
                template: "first".into(),
                counters: Default::default(),
            },
            ScheduleTime::parse("08:00").unwrap(),
            ChatId(1),
        )
        .await;
    controller
        .install(
            ActiveMessage {
                template: "second".into(),
                counters: Default::default(),
            },
            ScheduleTime::parse("09:30").unwrap(),
            ChatId(2),
        )
        .await;

    let (time, chat) = controller.job_info().await.expect("job installed");
    assert_eq!(time.to_string(), "09:30");
    assert_eq!(chat, ChatId(2));
}

#[tokio::test]
async fn stop_without_job_reports_nothing_to_stop() {
    let (state, _) = state_with_fake();
    let reply = state.stop_schedule(CHAT, Some(USER)).await;
    assert_eq!(reply, "There is no active scheduled message.");
}

#[tokio::test]
async fn trigger_without_job_reports_nothing_to_fire() {
    let (state, delivery) = state_with_fake();
    let reply = state.trigger_job(CHAT, Some(USER)).await;
    assert_eq!(reply, "There is no active scheduled message.");
    assert!(delivery.sent.lock().await.is_empty());
}

#[tokio::test]
async fn stop_cancels_installed_job() {
    let (state, _) = state_with_fake();

    state.begin_setup(CHAT, Some(USER)).await;
    state.handle_text(CHAT, Some(USER), "hello").await;
    state.handle_text(CHAT, Some(USER), "12:00").await;
    state.handle_text(CHAT, Some(USER), "yes").await;
    assert!(state.controller().has_job().await);

    let reply = state.stop_schedule(CHAT, Some(USER)).await;
    assert_eq!(reply, "Scheduled message has been stopped.");
    assert!(!state.controller().has_job().await);

    // The stopped job cannot be fired any more.
    let reply = state.trigger_job(CHAT, Some(USER)).await;
    assert_eq!(reply, "There is no active scheduled message.");
}

#[tokio::test]
async fn unauthorized_sender_never_mutates_state() {
    let (state, delivery) = state_with_fake();

    for reply in [
        state.begin_setup(CHAT, Some("mallory")).await,
        state
            .handle_text(CHAT, Some("mallory"), "Day {increment, 1}")
            .await,
        state.stop_schedule(CHAT, Some("mallory")).await,
        state.trigger_job(CHAT, Some("mallory")).await,
        state.cancel_setup(CHAT, Some("mallory")).await,
    ] {
        assert_eq!(reply, "You are not authorized to use this bot.");
    }
    assert!(!state.controller().has_job().await);
    assert!(delivery.sent.lock().await.is_empty());

    // A sender with no username at all is rejected too.
    let reply = state.begin_setup(CHAT, None).await;
    assert_eq!(reply, "You are not authorized to use this bot.");
}

#[tokio::test]
async fn unauthorized_message_terminates_conversation() {
    let (state, _) = state_with_fake();

    state.begin_setup(CHAT, Some(USER)).await;
    state.handle_text(CHAT, Some("mallory"), "hijack").await;

    // The conversation was torn down, not left mid-state.
    let reply = state.handle_text(CHAT, Some(USER), "Day 1").await;
    assert!(reply.contains("No setup in progress"));
}

#[tokio::test]
async fn rejected_preview_does_not_leak_into_active_state() {
    let (state, delivery) = state_with_fake();

    state.begin_setup(CHAT, Some(USER)).await;
    state
        .handle_text(CHAT, Some(USER), "Day {increment, 10}")
        .await;
    state.handle_text(CHAT, Some(USER), "07:00").await;
    let reply = state.handle_text(CHAT, Some(USER), "no").await;
    assert!(reply.contains("start over"));

    // The rejected draft's counters are gone; the new draft seeds fresh.
    state
        .handle_text(CHAT, Some(USER), "Day {increment, 1}")
        .await;
    state.handle_text(CHAT, Some(USER), "09:00").await;
    state.handle_text(CHAT, Some(USER), "yes").await;

    state.trigger_job(CHAT, Some(USER)).await;
    assert_eq!(delivery.sent.lock().await.last().unwrap().1, "Day 2");
}

#[tokio::test]
async fn cancel_discards_in_progress_draft() {
    let (state, _) = state_with_fake();

    state.begin_setup(CHAT, Some(USER)).await;
    state.handle_text(CHAT, Some(USER), "draft text").await;
    let reply = state.cancel_setup(CHAT, Some(USER)).await;
    assert_eq!(reply, "Operation cancelled.");

    let reply = state.handle_text(CHAT, Some(USER), "14:30").await;
    assert!(reply.contains("No setup in progress"));
    assert!(!state.controller().has_job().await);
}
