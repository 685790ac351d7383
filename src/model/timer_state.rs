use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampSeconds;

/// Wall-clock bookkeeping for one session: when it started, how long it has
/// been paused, and when it ended. Pure value type; transitions return a new
/// state and take an explicit `now` so tests stay deterministic.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    #[serde_as(as = "TimestampSeconds")]
    pub started_timestamp: SystemTime,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub paused_timestamp: Option<SystemTime>,
    pub paused_duration: Duration,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub ended_timestamp: Option<SystemTime>,
}

impl TimerState {
    pub fn started(now: SystemTime) -> Self {
        Self {
            started_timestamp: now,
            paused_timestamp: None,
            paused_duration: Duration::ZERO,
            ended_timestamp: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_timestamp.is_some()
    }

    /// Play time accrued up to `now`, excluding paused stretches. Once the
    /// session has ended or is paused, the answer no longer moves.
    pub fn elapsed_at(&self, now: SystemTime) -> Duration {
        let until = self.paused_timestamp.or(self.ended_timestamp).unwrap_or(now);
        until
            .duration_since(self.started_timestamp)
            .unwrap_or(Duration::ZERO)
            .saturating_sub(self.paused_duration)
    }

    pub fn paused(&self, now: SystemTime) -> TimerState {
        let mut next = self.clone();
        if next.paused_timestamp.is_none() {
            next.paused_timestamp = Some(now);
        }
        next
    }

    pub fn resumed(&self, now: SystemTime) -> TimerState {
        let mut next = self.clone();
        if let Some(pause_started) = next.paused_timestamp.take() {
            next.paused_duration = next.paused_duration.saturating_add(
                now.duration_since(pause_started).unwrap_or(Duration::ZERO),
            );
        }
        next
    }

    pub fn ended(&self, now: SystemTime) -> TimerState {
        let mut next = self.clone();
        next.ended_timestamp = Some(now);
        next
    }
}
