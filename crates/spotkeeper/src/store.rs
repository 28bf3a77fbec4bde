//! The spot store: ordered spots synchronized to a persistence slot

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::editor::SpotIds;
use crate::error::{Result, SpotError, ValidationError};
use crate::persistence::SpotPersistence;
use crate::seed::seed_spots;
use crate::spot::Spot;

/// Ordered collection of spots, keyed by id.
///
/// Spots keep their insertion order. Every mutation writes the whole store
/// to the persistence slot; if that write fails, the mutation is undone and
/// the error returned, so memory never runs ahead of storage.
///
/// # Example
///
/// ```
/// use spotkeeper::{MemorySlot, SeedPolicy, Spot, SpotStatus, SpotStore, StoreConfig, Tenant};
///
/// let config = StoreConfig::new().with_seed(SeedPolicy::Empty);
/// let mut store = SpotStore::open(MemorySlot::default(), config).unwrap();
///
/// store.create(Spot::vacant("A1")).unwrap();
/// store.upsert(Spot::occupied("A1", Tenant::named("Dupont"))).unwrap();
/// assert_eq!(store.get("A1").map(Spot::status), Some(SpotStatus::Occupied));
///
/// store.free("A1").unwrap();
/// assert_eq!(store.get("A1").map(Spot::status), Some(SpotStatus::Vacant));
/// ```
#[derive(Debug)]
pub struct SpotStore<P> {
    spots: IndexMap<String, Spot>,
    persistence: P,
    config: StoreConfig,
}

impl<P: SpotPersistence> SpotStore<P> {
    /// Load the store from `persistence`.
    ///
    /// An empty slot yields the spots chosen by `config.seed`. Stored spots
    /// are canonicalized; if an id appears twice, the first one wins. A
    /// stored spot without an id is skipped, and a lease ending before it
    /// starts loses its end date.
    pub fn open(persistence: P, config: StoreConfig) -> Result<Self> {
        let loaded = match persistence.load()? {
            Some(spots) => {
                debug!(count = spots.len(), "loaded spots");
                spots
            }
            None => {
                info!(seed = ?config.seed, "empty slot, seeding store");
                seed_spots(config.seed)
            }
        };

        let mut spots = IndexMap::with_capacity(loaded.len());
        for spot in loaded {
            let mut spot = spot.canonicalize();
            if let Err(e) = spot.validate() {
                if spot.id.trim().is_empty() {
                    warn!(error = %e, "dropping stored spot without an id");
                    continue;
                }
                warn!(spot = %spot.id, error = %e, "dropping end date of stored spot");
                if let Some(tenant) = spot.tenant.as_mut() {
                    tenant.end_date = None;
                }
            }
            if spots.contains_key(&spot.id) {
                warn!(spot = %spot.id, "duplicate id in stored document, keeping the first");
                continue;
            }
            spots.insert(spot.id.clone(), spot);
        }

        Ok(Self {
            spots,
            persistence,
            config,
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reading
    // ═══════════════════════════════════════════════════════════════════

    /// All spots, in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Spot> + '_ {
        self.spots.values()
    }

    /// Owned copy of all spots, in insertion order.
    pub fn to_vec(&self) -> Vec<Spot> {
        self.spots.values().cloned().collect()
    }

    /// Look up a spot by id.
    pub fn get(&self, id: &str) -> Option<&Spot> {
        self.spots.get(id)
    }

    /// Whether a spot with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.spots.contains_key(id)
    }

    /// Position of a spot in the list.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.spots.get_index_of(id)
    }

    /// Number of spots.
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Whether the store has no spots.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// The settings the store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The persistence slot.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Close the store, handing back the persistence slot.
    pub fn into_persistence(self) -> P {
        self.persistence
    }

    // ═══════════════════════════════════════════════════════════════════
    // Mutation
    // ═══════════════════════════════════════════════════════════════════

    /// Replace the spot with the same id in place, or append it.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the spot breaks a record rule; nothing changes
    pub fn upsert(&mut self, spot: Spot) -> Result<()> {
        let spot = spot.canonicalize();
        spot.validate()?;
        let previous = self.spots.clone();

        let id = spot.id.clone();
        let replaced = self.spots.insert(id.clone(), spot).is_some();
        self.commit(previous)?;

        info!(spot = %id, replaced, "upserted spot");
        Ok(())
    }

    /// Append a new spot.
    ///
    /// # Errors
    ///
    /// - `ValidationError::DuplicateId` if the id exists; nothing changes
    /// - `ValidationError` if the spot breaks a record rule
    pub fn create(&mut self, spot: Spot) -> Result<()> {
        let spot = spot.canonicalize();
        spot.validate()?;
        if self.contains(&spot.id) {
            return Err(ValidationError::DuplicateId { id: spot.id }.into());
        }
        let previous = self.spots.clone();

        let id = spot.id.clone();
        self.spots.insert(id.clone(), spot);
        self.commit(previous)?;

        info!(spot = %id, status = %self.status_of(&id), "created spot");
        Ok(())
    }

    /// Replace the spot `original_id` with `spot`, keeping its position.
    ///
    /// When `spot.id` differs from `original_id` the entry is renamed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `original_id` does not exist
    /// - `ValidationError::DuplicateId` if the new id belongs to another spot
    /// - `ValidationError` if the spot breaks a record rule
    pub fn update(&mut self, original_id: &str, spot: Spot) -> Result<()> {
        let index = self
            .position(original_id)
            .ok_or_else(|| SpotError::not_found(original_id))?;
        let spot = spot.canonicalize();
        spot.validate()?;
        if spot.id != original_id && self.contains(&spot.id) {
            return Err(ValidationError::DuplicateId { id: spot.id }.into());
        }
        let previous = self.spots.clone();

        let id = spot.id.clone();
        if id == original_id {
            self.spots.insert(id.clone(), spot);
        } else {
            self.spots.shift_remove_index(index);
            self.spots.shift_insert(index, id.clone(), spot);
        }
        self.commit(previous)?;

        info!(spot = %id, from = %original_id, status = %self.status_of(&id), "updated spot");
        Ok(())
    }

    /// Delete a spot and return it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no spot has this id
    pub fn remove(&mut self, id: &str) -> Result<Spot> {
        if !self.contains(id) {
            return Err(SpotError::not_found(id));
        }
        let previous = self.spots.clone();

        let removed = self.spots.shift_remove(id);
        self.commit(previous)?;

        info!(spot = %id, "removed spot");
        removed.ok_or_else(|| SpotError::not_found(id))
    }

    /// Release a spot: clear its tenant and lease, keep the spot.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no spot has this id
    pub fn free(&mut self, id: &str) -> Result<()> {
        if !self.contains(id) {
            return Err(SpotError::not_found(id));
        }
        let previous = self.spots.clone();

        if let Some(spot) = self.spots.get_mut(id) {
            spot.tenant = None;
        }
        self.commit(previous)?;

        info!(spot = %id, "freed spot");
        Ok(())
    }

    /// Write the whole store, restoring `previous` if the write fails.
    fn commit(&mut self, previous: IndexMap<String, Spot>) -> Result<()> {
        let snapshot = self.to_vec();
        if let Err(e) = self.persistence.save(&snapshot) {
            warn!(error = %e, "save failed, rolling back");
            self.spots = previous;
            return Err(e.into());
        }
        Ok(())
    }

    fn status_of(&self, id: &str) -> String {
        self.get(id)
            .map(|spot| spot.status().to_string())
            .unwrap_or_default()
    }
}

impl<P> SpotIds for SpotStore<P> {
    fn contains_id(&self, id: &str) -> bool {
        self.spots.contains_key(id)
    }
}
