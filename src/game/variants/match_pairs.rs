use itertools::Itertools;
use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{GameVariant, Judgment, Penalty, WonRound};
use crate::model::{
    BoardView, CardView, Difficulty, GameMode, GameType, PlayerInput, RoundPhase, Symbol,
};

pub const PAIR_MATCH_REWARD: i32 = 20;
pub const PAIR_MISMATCH_PENALTY: i32 = 5;

#[derive(Debug, Clone)]
struct CardSlot {
    symbol: Symbol,
    face_up: bool,
    matched: bool,
}

/// Classic memory match: a shuffled deck of symbol pairs, all shown during
/// the memorize window, then flipped down. Two face-up cards resolve to a
/// match or a mismatch; the round is won when every pair is matched.
pub struct MatchPairs {
    difficulty: Difficulty,
    slots: Vec<CardSlot>,
    rounds_won: u32,
    mismatch: Option<(usize, usize)>,
}

impl MatchPairs {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            slots: Vec::new(),
            rounds_won: 0,
            mismatch: None,
        }
    }

    fn all_matched(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(|slot| slot.matched)
    }
}

impl GameVariant for MatchPairs {
    fn game_type(&self) -> GameType {
        GameType::MatchPairs
    }

    fn reveal_ticks(&self) -> u32 {
        self.difficulty.reveal_ticks()
    }

    fn begin_round(&mut self, rng: &mut StdRng) {
        let symbols = Symbol::draw(rng, self.difficulty.pair_count());
        let mut deck: Vec<Symbol> = symbols
            .iter()
            .flat_map(|symbol| [*symbol, *symbol])
            .collect();
        deck.shuffle(rng);
        self.slots = deck
            .into_iter()
            .map(|symbol| CardSlot {
                symbol,
                face_up: false,
                matched: false,
            })
            .collect();
        self.mismatch = None;
        trace!(target: "match_pairs", "Dealt {} cards", self.slots.len());
    }

    fn judge(&mut self, input: PlayerInput, mode: GameMode) -> Judgment {
        let PlayerInput::Tap(index) = input else {
            return Judgment::Ignored;
        };
        let Some(slot) = self.slots.get(index) else {
            return Judgment::Ignored;
        };
        if slot.matched || slot.face_up {
            return Judgment::Ignored;
        }

        let partner = self
            .slots
            .iter()
            .positions(|other| other.face_up && !other.matched)
            .collect_vec();
        self.slots[index].face_up = true;

        let Some(&first) = partner.first() else {
            // First card of the pair; nothing to judge yet.
            return Judgment::Accepted;
        };

        if self.slots[first].symbol == self.slots[index].symbol {
            self.slots[first].matched = true;
            self.slots[index].matched = true;
            let round_won = self.all_matched();
            if round_won {
                self.rounds_won += 1;
            }
            Judgment::Correct {
                reward: PAIR_MATCH_REWARD,
                round_won,
                pause: false,
            }
        } else {
            self.mismatch = Some((first, index));
            let penalty = match mode {
                GameMode::Timed => Penalty::Score(PAIR_MISMATCH_PENALTY),
                GameMode::Infinite => Penalty::Life,
            };
            Judgment::Incorrect {
                penalty,
                pause: true,
            }
        }
    }

    fn after_resolve(&mut self, _rng: &mut StdRng) {
        if let Some((first, second)) = self.mismatch.take() {
            self.slots[first].face_up = false;
            self.slots[second].face_up = false;
        }
    }

    fn on_round_won(&self, mode: GameMode) -> WonRound {
        // Timed sessions end on a full match; Infinite sessions deal a
        // fresh board and keep the score running.
        match mode {
            GameMode::Timed => WonRound::FinishSession,
            GameMode::Infinite => WonRound::Continue,
        }
    }

    fn extra_stat(&self) -> u32 {
        self.rounds_won
    }

    fn board_view(&self, phase: RoundPhase) -> BoardView {
        let reveal_all = phase == RoundPhase::Reveal;
        BoardView::MatchPairs {
            cards: self
                .slots
                .iter()
                .map(|slot| CardView {
                    symbol: (reveal_all || slot.face_up || slot.matched).then_some(slot.symbol),
                    matched: slot.matched,
                })
                .collect(),
        }
    }
}
