//! Spot store tests

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use spotkeeper::*;

fn empty_store() -> SpotStore<MemorySlot> {
    SpotStore::open(MemorySlot::default(), StoreConfig::new().with_seed(SeedPolicy::Empty))
        .expect("open store")
}

fn ids<P: SpotPersistence>(store: &SpotStore<P>) -> Vec<&str> {
    store.list().map(|s| s.id.as_str()).collect()
}

fn tenant(name: &str) -> Tenant {
    Tenant::named(name)
        .with_phone("06 10 02 03 04")
        .with_email("contact@email.com")
        .with_start_date(NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"))
}

/// A slot whose writes can be switched off.
#[derive(Debug, Default)]
struct FlakySlot {
    inner: MemorySlot,
    failing: bool,
}

impl SpotPersistence for FlakySlot {
    fn load(&self) -> std::result::Result<Option<Vec<Spot>>, PersistenceError> {
        self.inner.load()
    }

    fn save(&mut self, spots: &[Spot]) -> std::result::Result<(), PersistenceError> {
        if self.failing {
            return Err(PersistenceError::Backend("quota exceeded".to_string()));
        }
        self.inner.save(spots)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Opening
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_open_with_key_and_seed() {
    let config = StoreConfig::new()
        .with_storage_key("garage")
        .with_seed(SeedPolicy::Empty);
    let store = SpotStore::open(MemorySlot::from_config(&config), config).expect("open");
    assert!(store.is_empty());
    assert_eq!(store.persistence().key(), "garage");
    assert_eq!(store.config().storage_key, "garage");
}

#[test]
fn test_open_empty_slot_with_demo_seed() {
    let store = SpotStore::open(MemorySlot::default(), StoreConfig::default()).expect("open");
    assert_eq!(ids(&store), ["A1", "A2", "A3"]);

    let statuses: Vec<SpotStatus> = store.list().map(Spot::status).collect();
    assert_eq!(
        statuses,
        [SpotStatus::Vacant, SpotStatus::Occupied, SpotStatus::Ending]
    );
}

#[test]
fn test_open_empty_slot_with_empty_seed() {
    let store = empty_store();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn test_open_existing_document_ignores_seed() {
    let slot = MemorySlot::with_contents("parkingSpots", r#"[{"id":"Z1","status":"vacant"}]"#);
    let store = SpotStore::open(slot, StoreConfig::default()).expect("open");
    assert_eq!(ids(&store), ["Z1"]);
}

#[test]
fn test_open_keeps_first_of_duplicate_ids() {
    let slot = MemorySlot::with_contents(
        "parkingSpots",
        r#"[{"id":"A1","tenant":{"name":"First"}},{"id":"A2"},{"id":"A1","tenant":{"name":"Second"}}]"#,
    );
    let store = SpotStore::open(slot, StoreConfig::default()).expect("open");
    assert_eq!(ids(&store), ["A1", "A2"]);
    assert_eq!(
        store.get("A1").and_then(|s| s.tenant.as_ref()).map(|t| t.name.as_str()),
        Some("First")
    );
}

#[test]
fn test_open_corrupt_document_fails() {
    let slot = MemorySlot::with_contents("parkingSpots", "{not json");
    let err = SpotStore::open(slot, StoreConfig::default()).expect_err("corrupt");
    assert!(matches!(
        err,
        SpotError::Persistence(PersistenceError::Serialization(_))
    ));
}

#[test]
fn test_isolated_stores_do_not_interfere() {
    let mut first = empty_store();
    let second = empty_store();
    first.create(Spot::vacant("A1")).expect("create");
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Upsert and Create
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_upsert_new_id_appends() {
    let mut store = empty_store();
    store.upsert(Spot::vacant("A1")).expect("upsert");
    store.upsert(Spot::vacant("A2")).expect("upsert");
    assert_eq!(ids(&store), ["A1", "A2"]);
}

#[test]
fn test_upsert_existing_id_replaces_in_place() {
    let mut store = empty_store();
    for id in ["A1", "A2", "A3"] {
        store.upsert(Spot::vacant(id)).expect("upsert");
    }

    store.upsert(Spot::occupied("A2", tenant("Dupont"))).expect("upsert");

    assert_eq!(ids(&store), ["A1", "A2", "A3"]);
    assert_eq!(store.get("A2").map(Spot::status), Some(SpotStatus::Occupied));
    assert_eq!(store.position("A2"), Some(1));
}

#[test]
fn test_upsert_collapses_blank_tenant() {
    let mut store = empty_store();
    store.upsert(Spot::occupied("A1", Tenant::default())).expect("upsert");
    assert_eq!(store.get("A1"), Some(&Spot::vacant("A1")));
}

#[test]
fn test_create_duplicate_rejected_without_mutation() {
    let mut store = empty_store();
    store.create(Spot::occupied("A1", tenant("Dupont"))).expect("create");
    let before = store.to_vec();
    let raw_before = store.persistence().raw().map(str::to_string);

    let err = store.create(Spot::vacant("A1")).expect_err("duplicate");

    assert!(err.is_validation());
    assert!(matches!(
        err,
        SpotError::Validation(ValidationError::DuplicateId { ref id }) if id == "A1"
    ));
    assert_eq!(store.to_vec(), before);
    assert_eq!(store.persistence().raw().map(str::to_string), raw_before);
}

#[test]
fn test_reversed_lease_rejected_without_mutation() {
    let mut store = empty_store();
    store.create(Spot::vacant("A1")).expect("create");
    let before = store.to_vec();
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date");
    let end = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    let reversed = || Spot::occupied("A1", tenant("X").with_start_date(start).with_end_date(end));

    for err in [
        store.upsert(reversed()).expect_err("upsert"),
        store.update("A1", reversed()).expect_err("update"),
        store.create(Spot::occupied("A2", reversed().tenant.expect("tenant"))).expect_err("create"),
    ] {
        assert!(matches!(
            err,
            SpotError::Validation(ValidationError::EndBeforeStart { .. })
        ));
    }
    assert_eq!(store.to_vec(), before);
    assert_eq!(store.persistence().writes(), 1);
}

#[test]
fn test_blank_id_rejected() {
    let mut store = empty_store();
    for err in [
        store.create(Spot::vacant("")).expect_err("create"),
        store.upsert(Spot::vacant("  ")).expect_err("upsert"),
    ] {
        assert!(matches!(
            err,
            SpotError::Validation(ValidationError::MissingField { field: "id" })
        ));
    }
    assert!(store.is_empty());
    assert_eq!(store.persistence().writes(), 0);
}

#[test]
fn test_open_drops_reversed_end_date() {
    let slot = MemorySlot::with_contents(
        "parkingSpots",
        r#"[{"id":"A1","tenant":{"name":"X","startDate":"2025-01-01","endDate":"2024-01-01"}},{"id":""}]"#,
    );
    let store = SpotStore::open(slot, StoreConfig::default()).expect("open");

    assert_eq!(ids(&store), ["A1"]);
    let spot = store.get("A1").expect("spot");
    assert_eq!(spot.tenant.as_ref().and_then(|t| t.end_date), None);
    assert_eq!(spot.status(), SpotStatus::Occupied);
}

// ═══════════════════════════════════════════════════════════════════════
// Update
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_update_same_id() {
    let mut store = empty_store();
    store.create(Spot::vacant("A1")).expect("create");
    store.create(Spot::vacant("A2")).expect("create");

    store
        .update("A1", Spot::occupied("A1", tenant("Martin")))
        .expect("update");

    assert_eq!(ids(&store), ["A1", "A2"]);
    assert_eq!(store.get("A1").map(Spot::status), Some(SpotStatus::Occupied));
}

#[test]
fn test_update_rename_rekeys_in_place() {
    let mut store = empty_store();
    for id in ["A1", "A2", "A3"] {
        store.create(Spot::vacant(id)).expect("create");
    }

    store
        .update("A1", Spot::occupied("P1", tenant("Roux")))
        .expect("rename");

    assert_eq!(ids(&store), ["P1", "A2", "A3"]);
    assert!(store.get("A1").is_none());
    assert_eq!(store.get("P1").map(Spot::status), Some(SpotStatus::Occupied));
}

#[test]
fn test_update_rename_onto_existing_rejected() {
    let mut store = empty_store();
    store.create(Spot::vacant("A1")).expect("create");
    store.create(Spot::vacant("A2")).expect("create");

    let err = store.update("A1", Spot::vacant("A2")).expect_err("duplicate");
    assert!(err.is_validation());
    assert_eq!(ids(&store), ["A1", "A2"]);
}

#[test]
fn test_update_unknown_id_not_found() {
    let mut store = empty_store();
    let err = store.update("Q9", Spot::vacant("Q9")).expect_err("unknown");
    assert!(matches!(err, SpotError::NotFound { ref id } if id == "Q9"));
}

// ═══════════════════════════════════════════════════════════════════════
// Free and Remove
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_free_clears_tenant_and_keeps_spot() {
    let mut store = empty_store();
    let leased = tenant("Martin").with_end_date(NaiveDate::from_ymd_opt(2024, 12, 31).expect("date"));
    store.create(Spot::occupied("A3", leased)).expect("create");
    assert_eq!(store.get("A3").map(Spot::status), Some(SpotStatus::Ending));

    store.free("A3").expect("free");

    let spot = store.get("A3").expect("still present");
    assert_eq!(spot.tenant, None);
    assert_eq!(derive_status(spot), SpotStatus::Vacant);
}

#[test]
fn test_free_unknown_id_not_found() {
    let mut store = empty_store();
    assert!(matches!(store.free("A1"), Err(SpotError::NotFound { .. })));
}

#[test]
fn test_remove_deletes_and_preserves_order() {
    let mut store = empty_store();
    for id in ["A1", "A2", "A3"] {
        store.create(Spot::vacant(id)).expect("create");
    }

    let removed = store.remove("A2").expect("remove");

    assert_eq!(removed, Spot::vacant("A2"));
    assert_eq!(ids(&store), ["A1", "A3"]);
}

#[test]
fn test_remove_unknown_id_not_found() {
    let mut store = empty_store();
    store.create(Spot::vacant("A1")).expect("create");
    let writes = store.persistence().writes();

    let err = store.remove("B1").expect_err("unknown");

    assert_eq!(err.to_string(), "Spot not found: B1");
    assert_eq!(store.persistence().writes(), writes);
}

// ═══════════════════════════════════════════════════════════════════════
// Persistence
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_every_mutation_writes_whole_store() {
    let mut store = empty_store();
    store.create(Spot::vacant("A1")).expect("create");
    store.upsert(Spot::occupied("A2", tenant("Dupont"))).expect("upsert");
    store.free("A2").expect("free");
    store.remove("A1").expect("remove");

    assert_eq!(store.persistence().writes(), 4);
    assert_eq!(
        store.persistence().raw(),
        Some(r#"[{"id":"A2","status":"vacant"}]"#)
    );
}

#[test]
fn test_persisted_status_is_fresh() {
    let mut store = empty_store();
    let leased = tenant("Martin").with_end_date(NaiveDate::from_ymd_opt(2024, 12, 31).expect("date"));
    store.create(Spot::occupied("A3", leased)).expect("create");

    let saved = store.persistence().load().expect("load").expect("document");
    assert_eq!(saved[0].status(), SpotStatus::Ending);
    assert!(store
        .persistence()
        .raw()
        .is_some_and(|raw| raw.contains(r#""status":"ending""#)));
}

#[test]
fn test_failed_save_rolls_back() {
    let slot = FlakySlot {
        failing: true,
        ..Default::default()
    };
    let mut store = SpotStore::open(slot, StoreConfig::default()).expect("open");
    let before = store.to_vec();

    let err = store.free("A2").expect_err("save fails");
    assert!(matches!(err, SpotError::Persistence(PersistenceError::Backend(_))));
    assert_eq!(store.to_vec(), before);

    let err = store.create(Spot::vacant("B1")).expect_err("save fails");
    assert!(matches!(err, SpotError::Persistence(_)));
    assert!(!store.contains("B1"));

    let err = store.update("A1", Spot::vacant("Z1")).expect_err("save fails");
    assert!(matches!(err, SpotError::Persistence(_)));
    assert_eq!(ids(&store), ["A1", "A2", "A3"]);

    assert!(store.remove("A3").is_err());
    assert_eq!(store.len(), 3);
}

#[test]
fn test_store_recovers_after_failed_save() {
    let mut store = SpotStore::open(FlakySlot::default(), StoreConfig::default()).expect("open");
    store.free("A2").expect("free");

    let mut slot = store.into_persistence();
    slot.failing = true;
    let mut store = SpotStore::open(slot, StoreConfig::default()).expect("reopen");
    assert!(store.remove("A1").is_err());
    assert_eq!(store.get("A2").map(Spot::status), Some(SpotStatus::Vacant));
    assert_eq!(ids(&store), ["A1", "A2", "A3"]);
}

#[test]
fn test_borrowed_slot_survives_store() {
    let mut slot = MemorySlot::default();
    {
        let mut store =
            SpotStore::open(&mut slot, StoreConfig::new().with_seed(SeedPolicy::Empty)).expect("open");
        store.create(Spot::vacant("K1")).expect("create");
    }

    let reopened = SpotStore::open(&mut slot, StoreConfig::default()).expect("reopen");
    assert_eq!(ids(&reopened), ["K1"]);
}
