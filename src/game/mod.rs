pub mod achievement_tracker;
mod catalog;
pub mod palaces;
pub mod round_clock;
pub mod round_engine;
pub mod score_recorder;
pub mod settings;
pub mod variants;

pub use achievement_tracker::{
    AchievementTracker, TrackerError, EXPECTED_ACHIEVEMENTS_PER_GROUP, EXPECTED_GROUPS,
};
pub use catalog::default_reward_groups;
pub use palaces::PalaceDirectory;
pub use round_clock::{ClockTick, RoundClock};
pub use round_engine::RoundEngine;
pub use score_recorder::{RecordSummary, ScoreRecorder};
pub use settings::Settings;
