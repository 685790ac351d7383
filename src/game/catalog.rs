use crate::model::{Achievement, AchievementKind, GameType, RewardGroup};

/// The shipped trophy rooms: five groups of five, unlocked in order. The
/// tracker falls back to this catalog when nothing is persisted yet and
/// after a full reset.
pub fn default_reward_groups() -> Vec<RewardGroup> {
    vec![
        RewardGroup::new(
            "hall_of_focus",
            "Hall of Focus",
            "First steps: warm your memory up.",
            "bronze",
            0,
            vec![
                Achievement::new("warm_up", "Warm Up", AchievementKind::Completion, 3, None),
                Achievement::new(
                    "pair_apprentice",
                    "Pair Apprentice",
                    AchievementKind::Milestone,
                    10,
                    Some(GameType::MatchPairs),
                ),
                Achievement::new("quick_study", "Quick Study", AchievementKind::Speed, 90, None),
                Achievement::new("steady_eye", "Steady Eye", AchievementKind::Accuracy, 70, None),
                Achievement::new("first_entry", "First Entry", AchievementKind::Record, 1, None),
            ],
        ),
        RewardGroup::new(
            "gallery_of_echoes",
            "Gallery of Echoes",
            "Sequences start to stick.",
            "silver",
            1,
            vec![
                Achievement::new("dedicated", "Dedicated", AchievementKind::Completion, 10, None),
                Achievement::new(
                    "sequence_seeker",
                    "Sequence Seeker",
                    AchievementKind::Milestone,
                    15,
                    Some(GameType::RecallSequence),
                ),
                Achievement::new("swift_mind", "Swift Mind", AchievementKind::Speed, 60, None),
                Achievement::new("sharp_eye", "Sharp Eye", AchievementKind::Accuracy, 80, None),
                Achievement::new(
                    "record_setter",
                    "Record Setter",
                    AchievementKind::Record,
                    2,
                    None,
                ),
            ],
        ),
        RewardGroup::new(
            "vault_of_patterns",
            "Vault of Patterns",
            "Nothing on the board escapes you.",
            "gold",
            2,
            vec![
                Achievement::new("regular", "Regular", AchievementKind::Completion, 20, None),
                Achievement::new(
                    "target_spotter",
                    "Target Spotter",
                    AchievementKind::Milestone,
                    25,
                    Some(GameType::CardLocator),
                ),
                Achievement::new(
                    "lightning_round",
                    "Lightning Round",
                    AchievementKind::Speed,
                    45,
                    None,
                ),
                Achievement::new("laser_focus", "Laser Focus", AchievementKind::Accuracy, 90, None),
                Achievement::new(
                    "record_collector",
                    "Record Collector",
                    AchievementKind::Record,
                    4,
                    None,
                ),
            ],
        ),
        RewardGroup::new(
            "observatory_of_recall",
            "Observatory of Recall",
            "Split-second judgment, every time.",
            "platinum",
            3,
            vec![
                Achievement::new("devoted", "Devoted", AchievementKind::Completion, 40, None),
                Achievement::new(
                    "snap_judge",
                    "Snap Judge",
                    AchievementKind::Milestone,
                    30,
                    Some(GameType::SpeedMatch),
                ),
                Achievement::new(
                    "blink_and_done",
                    "Blink and Done",
                    AchievementKind::Speed,
                    30,
                    None,
                ),
                Achievement::new(
                    "near_perfect",
                    "Near Perfect",
                    AchievementKind::Accuracy,
                    95,
                    None,
                ),
                Achievement::new(
                    "record_hoarder",
                    "Record Hoarder",
                    AchievementKind::Record,
                    6,
                    None,
                ),
            ],
        ),
        RewardGroup::new(
            "sanctum_of_memory",
            "Sanctum of Memory",
            "The trophy room few ever see.",
            "diamond",
            4,
            vec![
                Achievement::new(
                    "memory_marathon",
                    "Memory Marathon",
                    AchievementKind::Completion,
                    75,
                    None,
                ),
                Achievement::new(
                    "pair_grandmaster",
                    "Pair Grandmaster",
                    AchievementKind::Milestone,
                    40,
                    Some(GameType::MatchPairs),
                ),
                Achievement::new(
                    "flawless_speed",
                    "Flawless Speed",
                    AchievementKind::Speed,
                    20,
                    None,
                ),
                Achievement::new("perfection", "Perfection", AchievementKind::Accuracy, 100, None),
                Achievement::new(
                    "living_legend",
                    "Living Legend",
                    AchievementKind::Record,
                    10,
                    None,
                ),
            ],
        ),
    ]
}
