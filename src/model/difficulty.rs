use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Moderate => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_index(index: usize) -> Difficulty {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Moderate,
            2 => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }

    /// Number of hidden targets in a card-locator round.
    pub fn target_count(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Moderate => 3,
            Difficulty::Hard => 5,
        }
    }

    /// Card-locator board size; targets hide among these cards.
    pub fn board_size(&self) -> usize {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Moderate => 16,
            Difficulty::Hard => 20,
        }
    }

    /// Card-locator score table. Reward per found target and penalty per
    /// miss both scale with the tier.
    pub fn locate_reward(&self) -> i32 {
        match self {
            Difficulty::Easy => 25,
            Difficulty::Moderate => 35,
            Difficulty::Hard => 50,
        }
    }

    pub fn locate_penalty(&self) -> i32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Moderate => 15,
            Difficulty::Hard => 20,
        }
    }

    /// Number of symbol pairs dealt in a match-pairs round.
    pub fn pair_count(&self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Moderate => 8,
            Difficulty::Hard => 10,
        }
    }

    /// Starting sequence length for recall rounds.
    pub fn sequence_seed_len(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Moderate => 4,
            Difficulty::Hard => 5,
        }
    }

    /// Size of the answer palette shown below a recall sequence.
    pub fn palette_size(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Moderate => 6,
            Difficulty::Hard => 8,
        }
    }

    /// Whole-session tick budget for Timed mode.
    pub fn time_budget(&self) -> u32 {
        match self {
            Difficulty::Easy => 60,
            Difficulty::Moderate => 90,
            Difficulty::Hard => 120,
        }
    }

    /// Memorize-window length, in ticks, for variants that show an answer
    /// key before play.
    pub fn reveal_ticks(&self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Moderate => 4,
            Difficulty::Hard => 5,
        }
    }
}
