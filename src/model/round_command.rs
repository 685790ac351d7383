use super::{Difficulty, GameMode, GameType};

/// A discrete in-round answer. Tap drives the three board games; Classify
/// drives speed match ("same as the previous symbol?").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Tap(usize),
    Classify(bool),
}

/// Everything the embedding layer can ask of the round engine. `Tick` is
/// the single logical time unit; the shell forwards one per second.
#[derive(Debug, Clone)]
pub enum RoundCommand {
    NewSession {
        game_type: GameType,
        mode: GameMode,
        difficulty: Difficulty,
        seed: Option<u64>,
    },
    Input(PlayerInput),
    Tick,
    /// A scheduled resolve delay elapsed. Carries the generation stamped
    /// into the matching `RoundEvent::ResolveScheduled`; the engine drops
    /// callbacks from sessions that have since been torn down.
    ResolveFired {
        generation: u64,
    },
    Pause,
    Resume,
    PlayAgain,
    Quit,
}
