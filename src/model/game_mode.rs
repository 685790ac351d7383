use serde::{Deserialize, Serialize};

/// Session mode, fixed at setup. Timed sessions run against a tick budget;
/// Infinite sessions run until the life pool is gone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameMode {
    Timed,
    Infinite,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Timed
    }
}

impl GameMode {
    pub fn all() -> Vec<GameMode> {
        vec![GameMode::Timed, GameMode::Infinite]
    }

    pub fn key(&self) -> &'static str {
        match self {
            GameMode::Timed => "timed",
            GameMode::Infinite => "infinite",
        }
    }
}
