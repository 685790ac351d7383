use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{GameMode, GameOutcome, GameType};

/// Running best-score/best-time aggregate for one (game type, mode) key.
///
/// Updates are monotonic: `best_score` only climbs, `best_time` only drops
/// once set, `total_plays` only grows. Mutation happens through `apply`, so
/// the laws hold no matter who records outcomes.
#[readonly::make]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTypeStatistic {
    pub game_type: GameType,
    pub game_mode: GameMode,
    pub best_score: i32,
    pub best_time: Option<Duration>,
    pub worst_time: Option<Duration>,
    pub best_extra_stat: u32,
    pub total_plays: u32,
    pub first_played: i64,
    pub last_played: i64,
    pub best_outcome: Option<GameOutcome>,
}

/// What `apply` changed, so the finish screen can celebrate new records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDeltas {
    pub new_best_score: bool,
    pub new_best_time: bool,
}

impl GameTypeStatistic {
    pub fn new(game_type: GameType, game_mode: GameMode) -> Self {
        let now = Utc::now().timestamp();
        Self {
            game_type,
            game_mode,
            best_score: 0,
            best_time: None,
            worst_time: None,
            best_extra_stat: 0,
            total_plays: 0,
            first_played: now,
            last_played: now,
            best_outcome: None,
        }
    }

    pub fn apply(&mut self, outcome: &GameOutcome) -> AppliedDeltas {
        let first_play = self.total_plays == 0;
        self.total_plays += 1;
        self.last_played = outcome.timestamp;
        if first_play {
            self.first_played = outcome.timestamp;
        }

        let new_best_score = first_play || outcome.score > self.best_score;
        if new_best_score {
            self.best_score = outcome.score;
        }

        let new_best_time = match self.best_time {
            None => true,
            Some(best) => outcome.time_taken < best,
        };
        if new_best_time {
            self.best_time = Some(outcome.time_taken);
        }
        if self.worst_time.map_or(true, |w| outcome.time_taken > w) {
            self.worst_time = Some(outcome.time_taken);
        }
        if outcome.extra_stat > self.best_extra_stat {
            self.best_extra_stat = outcome.extra_stat;
        }

        // Best outcome follows best score; ties go to the faster run.
        let supersedes = match &self.best_outcome {
            None => true,
            Some(best) => {
                outcome.score > best.score
                    || (outcome.score == best.score && outcome.time_taken < best.time_taken)
            }
        };
        if supersedes {
            self.best_outcome = Some(outcome.clone());
        }

        AppliedDeltas {
            new_best_score,
            new_best_time,
        }
    }
}

/// Mode-independent running totals per game type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalStatistic {
    pub total_plays: u32,
    pub total_time_played: Duration,
    pub longest_session: Duration,
}

impl GlobalStatistic {
    pub fn absorb(&mut self, outcome: &GameOutcome) {
        self.total_plays += 1;
        self.total_time_played += outcome.time_taken;
        if outcome.time_taken > self.longest_session {
            self.longest_session = outcome.time_taken;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn outcome(score: i32, secs: u64) -> GameOutcome {
        GameOutcome::new(
            GameType::MatchPairs,
            GameMode::Timed,
            score,
            Duration::from_secs(secs),
            1,
            5,
            0,
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_best_time_monotonic_min() {
        let mut stat = GameTypeStatistic::new(GameType::MatchPairs, GameMode::Timed);
        stat.apply(&outcome(100, 12));
        assert_eq!(stat.best_time, Some(Duration::from_secs(12)));

        stat.apply(&outcome(100, 15));
        assert_eq!(stat.best_time, Some(Duration::from_secs(12)));

        stat.apply(&outcome(100, 9));
        assert_eq!(stat.best_time, Some(Duration::from_secs(9)));
    }

    #[test]
    fn test_best_score_only_climbs() {
        let mut stat = GameTypeStatistic::new(GameType::MatchPairs, GameMode::Timed);
        let deltas = stat.apply(&outcome(120, 30));
        assert!(deltas.new_best_score);

        let deltas = stat.apply(&outcome(80, 30));
        assert!(!deltas.new_best_score);
        assert_eq!(stat.best_score, 120);
        assert_eq!(stat.total_plays, 2);
    }

    #[test]
    fn test_best_outcome_tie_breaks_on_time() {
        let mut stat = GameTypeStatistic::new(GameType::MatchPairs, GameMode::Timed);
        stat.apply(&outcome(120, 30));
        stat.apply(&outcome(120, 18));
        let best = stat.best_outcome.as_ref().unwrap();
        assert_eq!(best.time_taken, Duration::from_secs(18));
    }

    #[test]
    fn test_worst_time_monotonic_max() {
        let mut stat = GameTypeStatistic::new(GameType::MatchPairs, GameMode::Timed);
        stat.apply(&outcome(10, 12));
        stat.apply(&outcome(10, 40));
        stat.apply(&outcome(10, 20));
        assert_eq!(stat.worst_time, Some(Duration::from_secs(40)));
    }

    #[test]
    fn test_global_statistic_tracks_longest_session() {
        let mut global = GlobalStatistic::default();
        global.absorb(&outcome(10, 20));
        global.absorb(&outcome(10, 8));
        assert_eq!(global.total_plays, 2);
        assert_eq!(global.total_time_played, Duration::from_secs(28));
        assert_eq!(global.longest_session, Duration::from_secs(20));
    }
}
