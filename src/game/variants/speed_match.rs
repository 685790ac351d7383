use log::trace;
use rand::rngs::StdRng;
use rand::Rng;

use super::{GameVariant, Judgment, Penalty, WonRound};
use crate::model::{BoardView, GameMode, GameType, PlayerInput, RoundPhase, Symbol};

/// Symbols drawn into the session pool; small on purpose so repeats are
/// frequent enough to keep the judgment interesting.
const POOL_SIZE: usize = 6;

/// One symbol at a time: does it match the previous one? No memorize
/// window; the very first symbol has nothing to compare against, so the
/// first answer is neutral no matter what it says.
pub struct SpeedMatch {
    pool: Vec<Symbol>,
    current: Option<Symbol>,
    previous: Option<Symbol>,
    streak: u32,
    best_streak: u32,
}

impl SpeedMatch {
    pub fn new() -> Self {
        Self {
            pool: Vec::new(),
            current: None,
            previous: None,
            streak: 0,
            best_streak: 0,
        }
    }

    fn draw_symbol(&self, rng: &mut StdRng) -> Symbol {
        self.pool[rng.random_range(0..self.pool.len())]
    }
}

impl GameVariant for SpeedMatch {
    fn game_type(&self) -> GameType {
        GameType::SpeedMatch
    }

    fn reveal_ticks(&self) -> u32 {
        0
    }

    fn begin_round(&mut self, rng: &mut StdRng) {
        self.pool = Symbol::draw(rng, POOL_SIZE);
        self.current = Some(self.draw_symbol(rng));
        self.previous = None;
        self.streak = 0;
        self.best_streak = 0;
        trace!(target: "speed_match", "Session pool: {:?}", self.pool);
    }

    fn judge(&mut self, input: PlayerInput, mode: GameMode) -> Judgment {
        let PlayerInput::Classify(says_match) = input else {
            return Judgment::Ignored;
        };
        let Some(current) = self.current else {
            return Judgment::Ignored;
        };

        let Some(previous) = self.previous else {
            // First symbol of the session: nothing to compare against.
            return Judgment::Neutral;
        };

        if (previous == current) == says_match {
            self.streak += 1;
            if self.streak > self.best_streak {
                self.best_streak = self.streak;
            }
            Judgment::Correct {
                reward: 1,
                round_won: false,
                pause: true,
            }
        } else {
            self.streak = 0;
            let penalty = match mode {
                GameMode::Timed => Penalty::Score(1),
                GameMode::Infinite => Penalty::Life,
            };
            Judgment::Incorrect {
                penalty,
                pause: true,
            }
        }
    }

    fn after_resolve(&mut self, rng: &mut StdRng) {
        self.previous = self.current;
        self.current = Some(self.draw_symbol(rng));
    }

    fn on_round_won(&self, _mode: GameMode) -> WonRound {
        WonRound::Continue
    }

    fn extra_stat(&self) -> u32 {
        self.best_streak
    }

    fn board_view(&self, _phase: RoundPhase) -> BoardView {
        BoardView::SpeedMatch {
            shown: self.current.unwrap_or(Symbol('❔')),
            previous: self.previous,
        }
    }
}
