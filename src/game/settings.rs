use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, GameMode};
use crate::storage::{Repository, StorageError};

const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub default_difficulty: Difficulty,

    #[serde(default)]
    pub default_mode: GameMode,

    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    #[serde(default)]
    pub reduced_motion: bool,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            default_difficulty: Difficulty::default(),
            default_mode: GameMode::default(),
            sound_enabled: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Load from the repository, writing defaults back on first use so the
    /// key exists from then on.
    pub fn load(repository: &Rc<RefCell<Repository>>) -> Self {
        if let Ok(Some(mut settings)) = repository.borrow().read_value::<Settings>(SETTINGS_KEY) {
            settings.migrate();
            return settings;
        }
        let default = Settings::default();
        let _ = default.save(repository);
        default
    }

    pub fn save(&self, repository: &Rc<RefCell<Repository>>) -> Result<(), StorageError> {
        repository.borrow_mut().write_value(SETTINGS_KEY, self)
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }
}
