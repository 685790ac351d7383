use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace};

use crate::model::{GameMode, GameOutcome, GameType, GameTypeStatistic, GlobalStatistic};
use crate::storage::{Repository, StorageError};

/// Recent outcomes kept per (game type, mode).
const RECENT_LIMIT: usize = 20;

/// What the finish screen needs to show deltas against the record book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub best_score: i32,
    pub best_time: Option<Duration>,
    pub new_best_score: bool,
    pub new_best_time: bool,
    pub total_plays: u32,
}

/// Turns finished sessions into persisted records. Call `record` exactly
/// once per outcome; statistics update under the monotonic rules and every
/// mutation flushes straight through the repository.
pub struct ScoreRecorder {
    repository: Rc<RefCell<Repository>>,
}

impl ScoreRecorder {
    pub fn new(repository: Rc<RefCell<Repository>>) -> Self {
        Self { repository }
    }

    pub fn record(&mut self, outcome: &GameOutcome) -> Result<RecordSummary, StorageError> {
        let mut repository = self.repository.borrow_mut();

        let mut statistic = repository
            .statistic(outcome.game_type, outcome.game_mode)?
            .unwrap_or_else(|| GameTypeStatistic::new(outcome.game_type, outcome.game_mode));
        let deltas = statistic.apply(outcome);
        repository.put_statistic(&statistic)?;

        let mut global = repository.global_statistic(outcome.game_type)?;
        global.absorb(outcome);
        repository.put_global_statistic(outcome.game_type, &global)?;

        let mut recent = repository.recent_outcomes(outcome.game_type, outcome.game_mode)?;
        recent.insert(0, outcome.clone());
        recent.truncate(RECENT_LIMIT);
        repository.put_recent_outcomes(outcome.game_type, outcome.game_mode, &recent)?;

        debug!(
            target: "score_recorder",
            "Recorded {:?}/{:?}: score {} (best {}), plays {}",
            outcome.game_type,
            outcome.game_mode,
            outcome.score,
            statistic.best_score,
            statistic.total_plays
        );

        Ok(RecordSummary {
            best_score: statistic.best_score,
            best_time: statistic.best_time,
            new_best_score: deltas.new_best_score,
            new_best_time: deltas.new_best_time,
            total_plays: statistic.total_plays,
        })
    }

    pub fn statistic(
        &self,
        game_type: GameType,
        mode: GameMode,
    ) -> Result<Option<GameTypeStatistic>, StorageError> {
        self.repository.borrow().statistic(game_type, mode)
    }

    pub fn global_statistic(&self, game_type: GameType) -> Result<GlobalStatistic, StorageError> {
        self.repository.borrow().global_statistic(game_type)
    }

    pub fn recent_outcomes(
        &self,
        game_type: GameType,
        mode: GameMode,
    ) -> Result<Vec<GameOutcome>, StorageError> {
        self.repository.borrow().recent_outcomes(game_type, mode)
    }

    /// Explicit full reset of the record book.
    pub fn reset_all(&mut self) -> Result<(), StorageError> {
        trace!(target: "score_recorder", "Resetting all recorded statistics");
        self.repository.borrow_mut().reset_statistics()
    }
}
