//! In-memory slot, standing in for browser storage

use super::{decode, encode, SpotPersistence, DEFAULT_STORAGE_KEY};
use crate::config::StoreConfig;
use crate::error::PersistenceError;
use crate::spot::Spot;

/// A named slot holding the encoded document in memory.
///
/// # Example
///
/// ```
/// use spotkeeper::{MemorySlot, Spot, SpotPersistence};
///
/// let mut slot = MemorySlot::new("parkingSpots");
/// assert!(slot.load().unwrap().is_none());
///
/// slot.save(&[Spot::vacant("A1")]).unwrap();
/// assert_eq!(slot.raw(), Some(r#"[{"id":"A1","status":"vacant"}]"#));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySlot {
    key: String,
    contents: Option<String>,
    writes: usize,
}

impl Default for MemorySlot {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

impl MemorySlot {
    /// An empty slot.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            contents: None,
            writes: 0,
        }
    }

    /// An empty slot named after `config.storage_key`.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.storage_key.as_str())
    }

    /// A slot already holding `document`.
    pub fn with_contents(key: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            contents: Some(document.into()),
            ..Self::new(key)
        }
    }

    /// Slot name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored document, as written.
    pub fn raw(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SpotPersistence for MemorySlot {
    fn load(&self) -> Result<Option<Vec<Spot>>, PersistenceError> {
        self.contents.as_deref().map(decode).transpose()
    }

    fn save(&mut self, spots: &[Spot]) -> Result<(), PersistenceError> {
        let document = encode(spots)?;
        tracing::debug!(key = %self.key, bytes = document.len(), "saved spots to memory slot");
        self.contents = Some(document);
        self.writes += 1;
        Ok(())
    }
}
