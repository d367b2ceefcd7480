//! Time source for session ids and "today".

use chrono::Utc;
use dialed_core::date::SessionDate;
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    /// Milliseconds since the epoch, strictly increasing between calls.
    fn now_millis(&self) -> i64;

    fn today(&self) -> SessionDate;
}

/// Wall clock. Two ids requested within the same millisecond still differ.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1)
    }

    fn today(&self) -> SessionDate {
        SessionDate::today()
    }
}

/// Clock pinned to one day, handing out sequential ids.
#[derive(Debug)]
pub struct FixedClock {
    today: SessionDate,
    next: AtomicI64,
}

impl FixedClock {
    pub fn new(today: SessionDate, first_id: i64) -> Self {
        Self {
            today,
            next: AtomicI64::new(first_id),
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    fn today(&self) -> SessionDate {
        self.today
    }
}
