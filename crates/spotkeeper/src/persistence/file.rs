//! JSON file slot

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{decode, encode, SpotPersistence};
use crate::config::StoreConfig;
use crate::error::PersistenceError;
use crate::spot::Spot;

/// A slot stored as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// slot, so a failed save leaves the previous document intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Slot `key` inside `dir`. The directory must exist.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Slot named after `config.storage_key` inside `dir`.
    pub fn from_config(dir: impl AsRef<Path>, config: &StoreConfig) -> Self {
        Self::new(dir, &config.storage_key)
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SpotPersistence for FileSlot {
    fn load(&self) -> Result<Option<Vec<Spot>>, PersistenceError> {
        let document = match fs::read_to_string(&self.path) {
            Ok(document) => document,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %self.path.display(), "loading spots from file");
        decode(&document).map(Some)
    }

    fn save(&mut self, spots: &[Spot]) -> Result<(), PersistenceError> {
        let document = encode(spots)?;
        let temp = self.temp_path();
        fs::write(&temp, document.as_bytes())?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = spots.len(), "saved spots to file");
        Ok(())
    }
}
