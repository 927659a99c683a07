//! Herald Core - scheduling logic shared by the Herald interfaces.
//!
//! This crate holds the pure pieces of the daily-message scheduler, with no
//! Telegram types in sight:
//!
//! - **counters**: increment/decrement counter state seeded from a template
//! - **schedule**: daily firing time in the fixed bot timezone
//! - **template**: placeholder scanning and message rendering

pub mod counters;
pub mod schedule;
pub mod template;

// Re-export commonly used items for convenience
pub use counters::CounterState;
pub use schedule::{ParseTimeError, ScheduleTime};
pub use template::{render, scan, Placeholder, PlaceholderKind};
