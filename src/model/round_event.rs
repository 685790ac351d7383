use super::{BoardView, GameOutcome, RoundPhase, TimerState};

/// Emitted by the round engine; presentation layers subscribe and render.
#[derive(Debug, Clone)]
pub enum RoundEvent {
    PhaseChanged(RoundPhase),
    BoardUpdated(BoardView),
    ScoreChanged(i32),
    LivesChanged(u8),
    TimeRemainingChanged(u32),
    RoundAdvanced(u32),
    TimerStateChanged(TimerState),
    /// Ask the shell to call back with `RoundCommand::ResolveFired` after
    /// the feedback delay. The generation stamp makes the callback safe to
    /// fire late: a torn-down session ignores it.
    ResolveScheduled {
        generation: u64,
        delay_ticks: u32,
    },
    SessionFinished(GameOutcome),
}
