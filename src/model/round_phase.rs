use serde::{Deserialize, Serialize};

/// Shared phase machine for every mini-game:
/// `Setup -> Reveal -> Active -> Resolving -> (Active | Reveal | Finished)`.
///
/// Variants without a memorize window skip Reveal. A session is never in
/// Finished and Active at the same time; the engine owns the single phase
/// field that makes that impossible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    Setup,
    Reveal,
    Active,
    Resolving,
    Finished,
}

impl RoundPhase {
    pub fn accepts_input(&self) -> bool {
        matches!(self, RoundPhase::Active)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Finished)
    }
}
