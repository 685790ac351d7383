mod card_locator;
mod match_pairs;
mod recall_sequence;
mod speed_match;

pub use card_locator::CardLocator;
pub use match_pairs::{MatchPairs, PAIR_MATCH_REWARD, PAIR_MISMATCH_PENALTY};
pub use recall_sequence::{RecallSequence, SEQUENCE_ROUND_REWARD, STRIKES_PER_LIFE};
pub use speed_match::SpeedMatch;

use rand::rngs::StdRng;

use crate::model::{BoardView, Difficulty, GameMode, GameType, PlayerInput, RoundPhase};

/// Consequence of a wrong answer. The variant owns its penalty table and
/// already folded the session mode into the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Penalty {
    /// The mistake had a board-local effect only (e.g. a cleared input
    /// buffer, a burned strike).
    None,
    Score(i32),
    Life,
    EndSession,
}

/// Immediate verdict on one player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgment {
    /// Input hit a dead slot or the wrong phase slipped through; ignore it
    /// silently.
    Ignored,
    /// Input took effect on the board but was not an answer (first card of
    /// a pair). Not scored, not counted.
    Accepted,
    /// Judged but unscored, with a feedback pause (speed match's first
    /// round has nothing to compare against).
    Neutral,
    Correct {
        reward: i32,
        round_won: bool,
        /// Pass through Resolving before accepting more input.
        pause: bool,
    },
    Incorrect {
        penalty: Penalty,
        pause: bool,
    },
}

/// Where a won round takes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WonRound {
    /// Reseed and keep playing (next level / next deal).
    Continue,
    FinishSession,
}

/// Strategy seam of the round engine: each mini-game supplies its board,
/// its judging table and its win rule; the engine owns phases, lives,
/// score, clocks and outcome recording.
pub trait GameVariant {
    fn game_type(&self) -> GameType;

    /// Length of the memorize window in ticks; 0 skips Reveal entirely.
    fn reveal_ticks(&self) -> u32;

    /// Seed content for the next round. Called at session start and again
    /// on every `WonRound::Continue`.
    fn begin_round(&mut self, rng: &mut StdRng);

    fn judge(&mut self, input: PlayerInput, mode: GameMode) -> Judgment;

    /// Apply deferred feedback effects when the Resolving delay elapses
    /// (flip mismatched cards back down, advance to the next symbol).
    fn after_resolve(&mut self, rng: &mut StdRng);

    fn on_round_won(&self, mode: GameMode) -> WonRound;

    /// The per-game extra statistic carried into the outcome.
    fn extra_stat(&self) -> u32;

    fn board_view(&self, phase: RoundPhase) -> BoardView;
}

pub fn build(game_type: GameType, difficulty: Difficulty) -> Box<dyn GameVariant> {
    match game_type {
        GameType::MatchPairs => Box::new(MatchPairs::new(difficulty)),
        GameType::RecallSequence => Box::new(RecallSequence::new(difficulty)),
        GameType::CardLocator => Box::new(CardLocator::new(difficulty)),
        GameType::SpeedMatch => Box::new(SpeedMatch::new()),
    }
}
