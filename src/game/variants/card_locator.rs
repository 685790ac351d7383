use itertools::Itertools;
use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{GameVariant, Judgment, Penalty, WonRound};
use crate::model::{BoardView, Difficulty, GameMode, GameType, PlayerInput, RoundPhase};

/// Find the flashed target cards on a face-down board. Target count and the
/// reward/penalty table both come from the difficulty tier.
pub struct CardLocator {
    difficulty: Difficulty,
    card_count: usize,
    targets: Vec<usize>,
    found: Vec<usize>,
    total_found: u32,
}

impl CardLocator {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            card_count: difficulty.board_size(),
            targets: Vec::new(),
            found: Vec::new(),
            total_found: 0,
        }
    }
}

impl GameVariant for CardLocator {
    fn game_type(&self) -> GameType {
        GameType::CardLocator
    }

    fn reveal_ticks(&self) -> u32 {
        self.difficulty.reveal_ticks()
    }

    fn begin_round(&mut self, rng: &mut StdRng) {
        let mut indices = (0..self.card_count).collect_vec();
        indices.shuffle(rng);
        self.targets = indices
            .into_iter()
            .take(self.difficulty.target_count())
            .sorted()
            .collect_vec();
        self.found.clear();
        trace!(target: "card_locator", "Hid targets at {:?}", self.targets);
    }

    fn judge(&mut self, input: PlayerInput, mode: GameMode) -> Judgment {
        let PlayerInput::Tap(index) = input else {
            return Judgment::Ignored;
        };
        if index >= self.card_count || self.found.contains(&index) {
            // Off the board, or a slot that already resolved.
            return Judgment::Ignored;
        }

        if self.targets.contains(&index) {
            self.found.push(index);
            self.total_found += 1;
            Judgment::Correct {
                reward: self.difficulty.locate_reward(),
                round_won: self.found.len() == self.targets.len(),
                pause: false,
            }
        } else {
            let penalty = match mode {
                GameMode::Timed => Penalty::Score(self.difficulty.locate_penalty()),
                GameMode::Infinite => Penalty::Life,
            };
            Judgment::Incorrect {
                penalty,
                pause: false,
            }
        }
    }

    fn after_resolve(&mut self, _rng: &mut StdRng) {}

    fn on_round_won(&self, mode: GameMode) -> WonRound {
        match mode {
            GameMode::Timed => WonRound::FinishSession,
            GameMode::Infinite => WonRound::Continue,
        }
    }

    fn extra_stat(&self) -> u32 {
        self.total_found
    }

    fn board_view(&self, phase: RoundPhase) -> BoardView {
        BoardView::CardLocator {
            card_count: self.card_count,
            revealed_targets: if phase == RoundPhase::Reveal {
                self.targets.clone()
            } else {
                Vec::new()
            },
            found: self.found.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn started(difficulty: Difficulty) -> CardLocator {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = CardLocator::new(difficulty);
        game.begin_round(&mut rng);
        game
    }

    #[test]
    fn test_tier_two_board_shape() {
        let game = started(Difficulty::Easy);
        assert_eq!(game.card_count, 12);
        assert_eq!(game.targets.len(), 2);
    }

    #[test]
    fn test_finding_all_targets_in_any_order_wins() {
        let mut game = started(Difficulty::Easy);
        let targets = game.targets.clone();

        // Tap the second target first.
        let judgment = game.judge(PlayerInput::Tap(targets[1]), GameMode::Timed);
        assert_eq!(
            judgment,
            Judgment::Correct {
                reward: 25,
                round_won: false,
                pause: false
            }
        );

        let judgment = game.judge(PlayerInput::Tap(targets[0]), GameMode::Timed);
        assert_eq!(
            judgment,
            Judgment::Correct {
                reward: 25,
                round_won: true,
                pause: false
            }
        );
        assert_eq!(game.extra_stat(), 2);
    }

    #[test]
    fn test_miss_penalty_scales_with_tier() {
        let mut easy = started(Difficulty::Easy);
        let miss = (0..easy.card_count)
            .find(|index| !easy.targets.contains(index))
            .unwrap();
        assert_eq!(
            easy.judge(PlayerInput::Tap(miss), GameMode::Timed),
            Judgment::Incorrect {
                penalty: Penalty::Score(10),
                pause: false
            }
        );

        let mut hard = started(Difficulty::Hard);
        assert_eq!(hard.targets.len(), 5);
        let miss = (0..hard.card_count)
            .find(|index| !hard.targets.contains(index))
            .unwrap();
        assert_eq!(
            hard.judge(PlayerInput::Tap(miss), GameMode::Timed),
            Judgment::Incorrect {
                penalty: Penalty::Score(20),
                pause: false
            }
        );
    }

    #[test]
    fn test_found_slot_ignores_second_tap() {
        let mut game = started(Difficulty::Easy);
        let target = game.targets[0];
        game.judge(PlayerInput::Tap(target), GameMode::Timed);
        assert_eq!(
            game.judge(PlayerInput::Tap(target), GameMode::Timed),
            Judgment::Ignored
        );
    }

    #[test]
    fn test_targets_only_visible_during_reveal() {
        let game = started(Difficulty::Easy);
        let BoardView::CardLocator {
            revealed_targets, ..
        } = game.board_view(RoundPhase::Reveal)
        else {
            panic!("wrong view variant");
        };
        assert_eq!(revealed_targets, game.targets);

        let BoardView::CardLocator {
            revealed_targets, ..
        } = game.board_view(RoundPhase::Active)
        else {
            panic!("wrong view variant");
        };
        assert!(revealed_targets.is_empty());
    }
}
