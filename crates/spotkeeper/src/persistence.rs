//! Persistence boundary for the spot store
//!
//! The store is saved as a single JSON document in one named slot. Each
//! spot is written with its derived status alongside the record; the status
//! is ignored again on load.
//!
//! Documents written by earlier versions of the parking board are accepted
//! and migrated:
//! - a tenant with a `departureDate` instead of `endDate`, where an empty
//!   string means no date
//! - a tenant given as a bare name, with `startDate`, `endDate`, `email`,
//!   `phone` and `isIndefinite` stored on the spot itself

mod file;
mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::error::PersistenceError;
use crate::spot::{Spot, Tenant};

/// Slot name used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "parkingSpots";

/// A key-value slot holding the whole ordered list of spots.
pub trait SpotPersistence {
    /// Read the stored spots, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<Vec<Spot>>, PersistenceError>;

    /// Replace the stored spots with `spots`.
    fn save(&mut self, spots: &[Spot]) -> Result<(), PersistenceError>;
}

impl<P: SpotPersistence + ?Sized> SpotPersistence for &mut P {
    fn load(&self) -> Result<Option<Vec<Spot>>, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, spots: &[Spot]) -> Result<(), PersistenceError> {
        (**self).save(spots)
    }
}

impl<P: SpotPersistence + ?Sized> SpotPersistence for Box<P> {
    fn load(&self) -> Result<Option<Vec<Spot>>, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, spots: &[Spot]) -> Result<(), PersistenceError> {
        (**self).save(spots)
    }
}

/// Serialize spots into the stored document.
pub fn encode(spots: &[Spot]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(spots)?)
}

/// Parse a stored document, migrating older layouts.
pub fn decode(document: &str) -> Result<Vec<Spot>, PersistenceError> {
    Ok(serde_json::from_str(document)?)
}

/// A spot as read from storage, in any supported layout.
///
/// Converted into a canonical [`Spot`] on deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSpot {
    id: String,
    #[serde(default)]
    tenant: Option<StoredTenant>,
    #[serde(default, deserialize_with = "lenient_date")]
    start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    is_indefinite: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredTenant {
    Name(String),
    Record(Tenant),
}

impl From<StoredSpot> for Spot {
    fn from(stored: StoredSpot) -> Self {
        let tenant = match stored.tenant {
            None => None,
            Some(StoredTenant::Record(tenant)) => Some(tenant),
            // In the flat layout the name alone decides occupancy
            Some(StoredTenant::Name(name)) if name.trim().is_empty() => None,
            Some(StoredTenant::Name(name)) => {
                tracing::debug!(spot = %stored.id, "migrating flat tenant layout");
                Some(Tenant {
                    name,
                    phone: stored.phone.unwrap_or_default(),
                    email: stored.email.unwrap_or_default(),
                    start_date: stored.start_date,
                    end_date: stored.end_date,
                    is_indefinite: stored.is_indefinite,
                    ..Default::default()
                })
            }
        };

        Spot {
            id: stored.id,
            tenant,
        }
        .canonicalize()
    }
}

/// Read an optional `YYYY-MM-DD` date, treating `null` and `""` as absent.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
