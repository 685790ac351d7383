use log::trace;
use rand::rngs::StdRng;
use rand::Rng;

use super::{GameVariant, Judgment, Penalty, WonRound};
use crate::model::{BoardView, Difficulty, GameMode, GameType, PlayerInput, RoundPhase, Symbol};

/// Awarded for echoing a whole sequence back correctly.
pub const SEQUENCE_ROUND_REWARD: i32 = 10;
/// Wrong answers tolerated per life in Infinite mode.
pub const STRIKES_PER_LIFE: u32 = 3;

/// Simon-style recall: memorize a growing symbol sequence, then echo it by
/// tapping palette entries. Every completed round appends one element and
/// replays the memorize window.
pub struct RecallSequence {
    difficulty: Difficulty,
    palette: Vec<Symbol>,
    sequence: Vec<Symbol>,
    entered: usize,
    strikes: u32,
    levels_completed: u32,
}

impl RecallSequence {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            palette: Vec::new(),
            sequence: Vec::new(),
            entered: 0,
            strikes: 0,
            levels_completed: 0,
        }
    }

    fn random_symbol(&self, rng: &mut StdRng) -> Symbol {
        self.palette[rng.random_range(0..self.palette.len())]
    }
}

impl GameVariant for RecallSequence {
    fn game_type(&self) -> GameType {
        GameType::RecallSequence
    }

    fn reveal_ticks(&self) -> u32 {
        // One tick per element to memorize.
        self.sequence.len() as u32
    }

    fn begin_round(&mut self, rng: &mut StdRng) {
        if self.palette.is_empty() {
            self.palette = Symbol::draw(rng, self.difficulty.palette_size());
            for _ in 0..self.difficulty.sequence_seed_len() {
                let symbol = self.random_symbol(rng);
                self.sequence.push(symbol);
            }
        } else {
            let symbol = self.random_symbol(rng);
            self.sequence.push(symbol);
        }
        self.entered = 0;
        trace!(target: "recall_sequence", "Sequence grew to {}", self.sequence.len());
    }

    fn judge(&mut self, input: PlayerInput, mode: GameMode) -> Judgment {
        let PlayerInput::Tap(palette_index) = input else {
            return Judgment::Ignored;
        };
        let Some(&symbol) = self.palette.get(palette_index) else {
            return Judgment::Ignored;
        };
        let Some(&expected) = self.sequence.get(self.entered) else {
            return Judgment::Ignored;
        };

        if symbol == expected {
            self.entered += 1;
            if self.entered == self.sequence.len() {
                self.levels_completed += 1;
                return Judgment::Correct {
                    reward: SEQUENCE_ROUND_REWARD,
                    round_won: true,
                    pause: true,
                };
            }
            // Mid-sequence progress earns nothing by itself.
            return Judgment::Correct {
                reward: 0,
                round_won: false,
                pause: false,
            };
        }

        // One wrong tap throws away the whole in-progress echo; the
        // sequence itself is untouched.
        self.entered = 0;
        match mode {
            GameMode::Timed => Judgment::Incorrect {
                penalty: Penalty::EndSession,
                pause: false,
            },
            GameMode::Infinite => {
                self.strikes += 1;
                if self.strikes >= STRIKES_PER_LIFE {
                    self.strikes = 0;
                    Judgment::Incorrect {
                        penalty: Penalty::Life,
                        pause: true,
                    }
                } else {
                    Judgment::Incorrect {
                        penalty: Penalty::None,
                        pause: true,
                    }
                }
            }
        }
    }

    fn after_resolve(&mut self, _rng: &mut StdRng) {}

    fn on_round_won(&self, _mode: GameMode) -> WonRound {
        WonRound::Continue
    }

    fn extra_stat(&self) -> u32 {
        self.levels_completed
    }

    fn board_view(&self, phase: RoundPhase) -> BoardView {
        BoardView::RecallSequence {
            revealed: if phase == RoundPhase::Reveal {
                self.sequence.clone()
            } else {
                Vec::new()
            },
            palette: self.palette.clone(),
            entered: self.entered,
            sequence_len: self.sequence.len(),
        }
    }
}
