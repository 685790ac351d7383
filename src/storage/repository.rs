use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, StorageError};
use crate::model::{
    GameMode, GameOutcome, GameType, GameTypeStatistic, GlobalStatistic, MemoryPalace, RewardGroup,
};

const REWARD_GROUPS_KEY: &str = "reward_groups";
const RECORD_COUNT_KEY: &str = "record_count";
const PALACES_KEY: &str = "palaces";

/// Typed facade over the key-value store. Key composition and blob encoding
/// live here and nowhere else; callers speak in entities. One repository is
/// built at startup and handed to every component that persists anything.
pub struct Repository {
    store: Box<dyn KeyValueStore>,
}

impl Repository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // Keys derive as `{game_type}_{game_mode}_{suffix}` for per-mode
    // records and `{game_type}_{suffix}` for mode-independent ones.
    fn statistic_key(game_type: GameType, mode: GameMode) -> String {
        format!("{}_{}_stats", game_type.key(), mode.key())
    }

    fn recent_key(game_type: GameType, mode: GameMode) -> String {
        format!("{}_{}_recent", game_type.key(), mode.key())
    }

    fn global_key(game_type: GameType) -> String {
        format!("{}_global", game_type.key())
    }

    pub(crate) fn read_value<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        self.store
            .get(key)
            .map(serde_json::from_value)
            .transpose()
            .map_err(StorageError::from)
    }

    pub(crate) fn write_value<T: Serialize>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        self.store.put(key, serde_json::to_value(value)?)
    }

    pub fn statistic(
        &self,
        game_type: GameType,
        mode: GameMode,
    ) -> Result<Option<GameTypeStatistic>, StorageError> {
        self.read_value(&Self::statistic_key(game_type, mode))
    }

    pub fn put_statistic(&mut self, statistic: &GameTypeStatistic) -> Result<(), StorageError> {
        self.write_value(
            &Self::statistic_key(statistic.game_type, statistic.game_mode),
            statistic,
        )
    }

    pub fn recent_outcomes(
        &self,
        game_type: GameType,
        mode: GameMode,
    ) -> Result<Vec<GameOutcome>, StorageError> {
        Ok(self
            .read_value(&Self::recent_key(game_type, mode))?
            .unwrap_or_default())
    }

    pub fn put_recent_outcomes(
        &mut self,
        game_type: GameType,
        mode: GameMode,
        outcomes: &[GameOutcome],
    ) -> Result<(), StorageError> {
        self.write_value(&Self::recent_key(game_type, mode), &outcomes)
    }

    pub fn global_statistic(&self, game_type: GameType) -> Result<GlobalStatistic, StorageError> {
        Ok(self
            .read_value(&Self::global_key(game_type))?
            .unwrap_or_default())
    }

    pub fn put_global_statistic(
        &mut self,
        game_type: GameType,
        statistic: &GlobalStatistic,
    ) -> Result<(), StorageError> {
        self.write_value(&Self::global_key(game_type), statistic)
    }

    pub fn reward_groups(&self) -> Result<Option<Vec<RewardGroup>>, StorageError> {
        self.read_value(REWARD_GROUPS_KEY)
    }

    pub fn put_reward_groups(&mut self, groups: &[RewardGroup]) -> Result<(), StorageError> {
        self.write_value(REWARD_GROUPS_KEY, &groups)
    }

    pub fn record_count(&self) -> Result<u64, StorageError> {
        Ok(self.read_value(RECORD_COUNT_KEY)?.unwrap_or(0))
    }

    pub fn put_record_count(&mut self, count: u64) -> Result<(), StorageError> {
        self.write_value(RECORD_COUNT_KEY, &count)
    }

    pub fn palaces(&self) -> Result<Vec<MemoryPalace>, StorageError> {
        Ok(self.read_value(PALACES_KEY)?.unwrap_or_default())
    }

    pub fn put_palaces(&mut self, palaces: &[MemoryPalace]) -> Result<(), StorageError> {
        self.write_value(PALACES_KEY, &palaces)
    }

    /// Full reset of recorded play data. Reward groups, settings and
    /// palaces are owned by their components and reset separately.
    pub fn reset_statistics(&mut self) -> Result<(), StorageError> {
        for key in self.store.keys() {
            if key.ends_with("_stats") || key.ends_with("_recent") || key.ends_with("_global") {
                self.store.remove(&key)?;
            }
        }
        Ok(())
    }
}
