/// What one tick did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// The clock is not running; nothing happened.
    Idle,
    /// One unit elapsed; this much remains.
    Ticked(u32),
    /// The countdown just hit zero. Reported exactly once, after which the
    /// clock has stopped itself.
    Expired,
}

/// Fixed-interval countdown in whole tick units. Drives both the one-shot
/// memorize window and the whole-session expiry timer. The embedding layer
/// owns the cadence and feeds ticks in; the clock never spawns anything.
#[derive(Debug, Default)]
pub struct RoundClock {
    remaining: Option<u32>,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown. Re-arming implicitly cancels any prior countdown;
    /// no two ticking instances ever coexist for one purpose.
    pub fn start(&mut self, duration: u32) {
        self.remaining = Some(duration);
    }

    /// Idempotent stop; cancelling a stopped clock is a no-op.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    pub fn tick(&mut self) -> ClockTick {
        match self.remaining {
            None => ClockTick::Idle,
            Some(left) if left <= 1 => {
                self.remaining = None;
                ClockTick::Expired
            }
            Some(left) => {
                self.remaining = Some(left - 1);
                ClockTick::Ticked(left - 1)
            }
        }
    }
}
