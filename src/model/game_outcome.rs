use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GameMode, GameType};

/// Immutable record of one finished session. Created exactly once when a
/// session reaches Finished, persisted immediately, never mutated; the
/// `readonly` attribute keeps fields frozen outside this module.
#[readonly::make]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameOutcome {
    pub game_type: GameType,
    pub game_mode: GameMode,
    pub score: i32,
    pub time_taken: Duration,
    /// Meaning varies per game: rounds won (match-pairs), levels completed
    /// (recall), targets found (locator), best streak (speed match).
    pub extra_stat: u32,
    pub hits: u32,
    pub faults: u32,
    pub timestamp: i64,
    pub session_id: Uuid,
}

impl GameOutcome {
    pub fn new(
        game_type: GameType,
        game_mode: GameMode,
        score: i32,
        time_taken: Duration,
        extra_stat: u32,
        hits: u32,
        faults: u32,
        session_id: Uuid,
    ) -> Self {
        Self {
            game_type,
            game_mode,
            score,
            time_taken,
            extra_stat,
            hits,
            faults,
            timestamp: Utc::now().timestamp(),
            session_id,
        }
    }

    /// Percentage of judged inputs that were correct; 100 when nothing was
    /// judged (a session abandoned before the first answer).
    pub fn accuracy(&self) -> u32 {
        let judged = self.hits + self.faults;
        if judged == 0 {
            100
        } else {
            self.hits * 100 / judged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(hits: u32, faults: u32) -> GameOutcome {
        GameOutcome::new(
            GameType::SpeedMatch,
            GameMode::Timed,
            10,
            Duration::from_secs(30),
            4,
            hits,
            faults,
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_accuracy_rounds_down() {
        assert_eq!(outcome(2, 1).accuracy(), 66);
    }

    #[test]
    fn test_accuracy_with_no_inputs_is_full() {
        assert_eq!(outcome(0, 0).accuracy(), 100);
    }
}
