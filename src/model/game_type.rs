use serde::{Deserialize, Serialize};

/// The four mini-games. Storage keys and achievement affinities are derived
/// from the stable `key()` name, so variants must not be renamed casually.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameType {
    MatchPairs,
    RecallSequence,
    CardLocator,
    SpeedMatch,
}

impl GameType {
    pub fn all() -> Vec<GameType> {
        vec![
            GameType::MatchPairs,
            GameType::RecallSequence,
            GameType::CardLocator,
            GameType::SpeedMatch,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            GameType::MatchPairs => 0,
            GameType::RecallSequence => 1,
            GameType::CardLocator => 2,
            GameType::SpeedMatch => 3,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GameType::MatchPairs => "match_pairs",
            GameType::RecallSequence => "recall_sequence",
            GameType::CardLocator => "card_locator",
            GameType::SpeedMatch => "speed_match",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameType::MatchPairs => "Memory Match",
            GameType::RecallSequence => "Sequence Recall",
            GameType::CardLocator => "Card Locator",
            GameType::SpeedMatch => "Speed Match",
        }
    }
}
