//! Counter state attached to a message template.

use crate::template::{scan, PlaceholderKind};

/// At most one increment and one decrement counter, each optional.
///
/// `None` means the counter is not active: its placeholders render as
/// literal text and [`advance`](CounterState::advance) leaves it alone.
/// The two counters are independent; either, both, or neither may be active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    pub increment: Option<i64>,
    pub decrement: Option<i64>,
}

impl CounterState {
    /// Seed counters from a template, fully replacing any prior state.
    ///
    /// The first occurrence of each placeholder kind supplies the starting
    /// value; a kind that never appears leaves that counter inactive.
    pub fn seed_from(template: &str) -> Self {
        let mut state = Self::default();
        for ph in scan(template) {
            let slot = match ph.kind {
                PlaceholderKind::Increment => &mut state.increment,
                PlaceholderKind::Decrement => &mut state.decrement,
            };
            if slot.is_none() {
                *slot = Some(ph.seed);
            }
        }
        state
    }

    /// Step both active counters: increment +1, decrement -1. Unbounded in
    /// either direction. Called once per firing, never on preview.
    pub fn advance(&mut self) {
        if let Some(n) = self.increment.as_mut() {
            *n += 1;
        }
        if let Some(n) = self.decrement.as_mut() {
            *n -= 1;
        }
    }
}
