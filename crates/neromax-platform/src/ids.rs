//! Session id generation.
//!
//! Ids keep the historical `session_<millis>` shape so already-stored
//! history keys stay addressable. A monotonic floor prevents minting
//! the same id twice within one millisecond.

use neromax_core::ports::IdSource;
use std::cell::Cell;

pub struct ClockIds {
    last: Cell<i64>,
}

impl ClockIds {
    pub fn new() -> Self {
        Self { last: Cell::new(0) }
    }
}

impl Default for ClockIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for ClockIds {
    fn next_id(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let next = now.max(self.last.get() + 1);
        self.last.set(next);
        format!("session_{}", next)
    }
}
