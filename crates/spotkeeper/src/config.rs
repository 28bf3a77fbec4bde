//! Store configuration

use crate::persistence::DEFAULT_STORAGE_KEY;

/// What a store starts with when its slot has never been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedPolicy {
    /// The demo spots A1, A2 and A3
    #[default]
    Demo,

    /// No spots
    Empty,
}

/// Settings for opening a [`SpotStore`](crate::SpotStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name of the persistence slot
    pub storage_key: String,

    /// Contents of a store whose slot is empty
    pub seed: SeedPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed: SeedPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `seed` when the slot is empty.
    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    /// Use `key` as the slot name.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
