use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GameType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AchievementKind {
    /// Counts finished sessions.
    Completion,
    /// Beat a target time; progress stores the best margin under the target.
    Speed,
    /// Reach a target accuracy percentage.
    Accuracy,
    /// Counts toward a fixed milestone.
    Milestone,
    /// Advanced only by the personal-best path, never by generic tracking.
    Record,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub kind: AchievementKind,
    pub target_value: u32,
    pub current_value: u32,
    pub is_completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    /// None applies to every game ("general" affinity).
    pub game_type: Option<GameType>,
}

impl Achievement {
    pub fn new(
        id: &str,
        name: &str,
        kind: AchievementKind,
        target_value: u32,
        game_type: Option<GameType>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            target_value,
            current_value: 0,
            is_completed: false,
            completed_date: None,
            game_type,
        }
    }

    pub fn applies_to(&self, game_type: GameType) -> bool {
        self.game_type.map_or(true, |affinity| affinity == game_type)
    }

    /// Progress update for the generic completion path. Record-kind
    /// achievements are untouched here; `advance_record` is their only way
    /// forward. Completion is latched exactly once per cycle.
    pub fn advance(&mut self, time_taken_secs: u32, accuracy: u32, extra_stat: u32) {
        if self.is_completed {
            return;
        }
        match self.kind {
            AchievementKind::Completion => {
                self.current_value += 1;
            }
            AchievementKind::Milestone => {
                // Game-scoped milestones accumulate the per-game counter
                // (targets found, levels, streak); general ones count
                // sessions.
                if self.game_type.is_some() {
                    self.current_value += extra_stat;
                } else {
                    self.current_value += 1;
                }
            }
            AchievementKind::Speed => {
                if time_taken_secs < self.target_value {
                    let margin = self.target_value - time_taken_secs;
                    if margin > self.current_value {
                        self.current_value = margin;
                    }
                    // Beating the target time is the completion condition;
                    // the margin is only kept for progress display.
                    self.complete();
                    return;
                }
            }
            AchievementKind::Accuracy => {
                if accuracy >= self.target_value {
                    self.current_value = accuracy;
                }
            }
            AchievementKind::Record => return,
        }
        if self.current_value >= self.target_value {
            self.complete();
        }
    }

    pub fn advance_record(&mut self) {
        if self.is_completed || self.kind != AchievementKind::Record {
            return;
        }
        self.current_value += 1;
        if self.current_value >= self.target_value {
            self.complete();
        }
    }

    fn complete(&mut self) {
        if !self.is_completed {
            self.is_completed = true;
            self.completed_date = Some(Utc::now());
        }
    }

    /// Reset-on-completion archival: progress and the completion latch go
    /// back to zero, the definition stays.
    pub fn reset_progress(&mut self) {
        self.current_value = 0;
        self.is_completed = false;
        self.completed_date = None;
    }
}

/// A themed trophy room. Groups unlock strictly in creation order:
/// `Locked -> Unlocked -> Completed`, never skipping a state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color_tag: String,
    pub creation_index: usize,
    pub is_unlocked: bool,
    pub is_completed: bool,
    pub achievements: Vec<Achievement>,
}

impl RewardGroup {
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        color_tag: &str,
        creation_index: usize,
        achievements: Vec<Achievement>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            color_tag: color_tag.to_string(),
            // The first room is open from the start.
            is_unlocked: creation_index == 0,
            is_completed: false,
            creation_index,
            achievements,
        }
    }

    pub fn all_achievements_completed(&self) -> bool {
        !self.achievements.is_empty() && self.achievements.iter().all(|a| a.is_completed)
    }

    pub fn completed_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.is_completed).count()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UnlockError {
    #[error("no reward group with id {0}")]
    UnknownGroup(String),
    #[error("group '{group}' stays locked until '{predecessor}' is completed")]
    PredecessorIncomplete { group: String, predecessor: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_completes_exactly_once() {
        let mut achievement =
            Achievement::new("m1", "Milestone", AchievementKind::Milestone, 5, None);
        for _ in 0..4 {
            achievement.advance(0, 0, 0);
        }
        assert!(!achievement.is_completed);

        achievement.advance(0, 0, 0);
        assert!(achievement.is_completed);
        let first_date = achievement.completed_date;
        assert!(first_date.is_some());

        // Further calls must not move the completion date.
        achievement.advance(0, 0, 0);
        assert_eq!(achievement.current_value, 5);
        assert_eq!(achievement.completed_date, first_date);
    }

    #[test]
    fn test_scoped_milestone_accumulates_the_counter() {
        let mut achievement = Achievement::new(
            "m2",
            "Targets",
            AchievementKind::Milestone,
            25,
            Some(GameType::CardLocator),
        );
        achievement.advance(0, 0, 10);
        achievement.advance(0, 0, 10);
        assert!(!achievement.is_completed);
        achievement.advance(0, 0, 5);
        assert!(achievement.is_completed);
    }

    #[test]
    fn test_speed_completes_when_beating_target() {
        let mut achievement = Achievement::new("s1", "Speed", AchievementKind::Speed, 45, None);
        achievement.advance(50, 0, 0);
        assert!(!achievement.is_completed);
        assert_eq!(achievement.current_value, 0);

        achievement.advance(30, 0, 0);
        assert!(achievement.is_completed);
        assert_eq!(achievement.current_value, 15);
    }

    #[test]
    fn test_accuracy_requires_threshold() {
        let mut achievement =
            Achievement::new("a1", "Accuracy", AchievementKind::Accuracy, 80, None);
        achievement.advance(0, 79, 0);
        assert!(!achievement.is_completed);
        achievement.advance(0, 91, 0);
        assert!(achievement.is_completed);
        assert_eq!(achievement.current_value, 91);
    }

    #[test]
    fn test_record_ignores_generic_path() {
        let mut achievement = Achievement::new("r1", "Record", AchievementKind::Record, 2, None);
        achievement.advance(1, 100, 0);
        assert_eq!(achievement.current_value, 0);

        achievement.advance_record();
        achievement.advance_record();
        assert!(achievement.is_completed);
    }

    #[test]
    fn test_reset_progress_clears_latch() {
        let mut achievement =
            Achievement::new("c1", "Completion", AchievementKind::Completion, 1, None);
        achievement.advance(0, 0, 0);
        assert!(achievement.is_completed);

        achievement.reset_progress();
        assert!(!achievement.is_completed);
        assert_eq!(achievement.current_value, 0);
        assert!(achievement.completed_date.is_none());
    }

    #[test]
    fn test_affinity_filter() {
        let general = Achievement::new("g", "G", AchievementKind::Completion, 1, None);
        let scoped = Achievement::new(
            "s",
            "S",
            AchievementKind::Completion,
            1,
            Some(GameType::CardLocator),
        );
        assert!(general.applies_to(GameType::SpeedMatch));
        assert!(scoped.applies_to(GameType::CardLocator));
        assert!(!scoped.applies_to(GameType::SpeedMatch));
    }

    #[test]
    fn test_group_zero_starts_unlocked() {
        let group = RewardGroup::new("bronze", "Bronze", "", "bronze", 0, vec![]);
        assert!(group.is_unlocked);
        let later = RewardGroup::new("silver", "Silver", "", "silver", 1, vec![]);
        assert!(!later.is_unlocked);
    }
}
