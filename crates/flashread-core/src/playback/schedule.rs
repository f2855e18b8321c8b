/// Milliseconds in one minute, the numerator of every tick interval.
pub const MS_PER_MINUTE: u64 = 60_000;

/// Tick interval for a rate in words per minute.
pub const fn interval_for_wpm(wpm: u16) -> u64 {
    let wpm = if wpm == 0 { 1 } else { wpm as u64 };
    MS_PER_MINUTE / wpm
}

/// The one pending tick of a playing session.
///
/// Only `PlaybackState::Playing` carries a schedule, so replacing the state
/// is the only way to cancel or re-register a tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct TickSchedule {
    interval_ms: u64,
    next_due_ms: u64,
}

impl TickSchedule {
    pub(super) const fn start(now_ms: u64, interval_ms: u64) -> Self {
        Self {
            interval_ms,
            next_due_ms: now_ms.saturating_add(interval_ms),
        }
    }

    pub(super) const fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_due_ms
    }

    /// Schedule for the tick after one that fired at `now_ms`. A late host
    /// gets one tick, not a burst of catch-up ticks.
    pub(super) const fn rearm(self, now_ms: u64) -> Self {
        Self::start(now_ms, self.interval_ms)
    }

    pub(super) const fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }
}
