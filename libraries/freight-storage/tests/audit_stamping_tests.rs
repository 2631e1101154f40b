//! Audit stamping through the unit of work

use freight_core::types::{AuditStamp, Carrier, Commodity, EntityKind, Identity};
use freight_storage::{carriers, commodities, persist_audited, users, StorageError, UnitOfWork};
use mockable::Clock;

use test_helpers::{create_test_commodity, MutableClock, TestDb};

#[tokio::test]
async fn test_create_sets_created_and_updated_to_same_instant() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let commodity = create_test_commodity(db.pool(), &clock, "Steel", "STL").await;

    let expected = AuditStamp::storage_precision(clock.utc());
    assert!(commodity.id > 0);
    assert_eq!(commodity.audit.created_at, expected);
    assert_eq!(commodity.audit.updated_at, expected);

    // What was stamped in memory is exactly what was stored
    let stored = commodities::get_by_id(db.pool(), commodity.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.audit, commodity.audit);
}

#[tokio::test]
async fn test_caller_supplied_timestamps_are_overwritten_on_create() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let mut commodity = Commodity::new("Grain", "GRN");
    commodity.audit.created_at = chrono::DateTime::from_timestamp(42, 0).unwrap();
    commodity.audit.updated_at = chrono::DateTime::from_timestamp(43, 0).unwrap();

    let saved = persist_audited(db.pool(), &clock, commodity, true).await.unwrap();

    let expected = AuditStamp::storage_precision(clock.utc());
    assert_eq!(saved.audit.created_at, expected);
    assert_eq!(saved.audit.updated_at, expected);
}

#[tokio::test]
async fn test_update_changes_only_updated_at() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let commodity = create_test_commodity(db.pool(), &clock, "Steel", "STL").await;
    let original_created_at = commodity.audit.created_at;

    clock.advance_seconds(90);

    let mut edited = commodity.clone();
    edited.name = "Stainless Steel".to_string();
    let saved = persist_audited(db.pool(), &clock, edited, false).await.unwrap();

    assert_eq!(saved.audit.created_at, original_created_at);
    assert_eq!(saved.audit.updated_at, AuditStamp::storage_precision(clock.utc()));
    assert!(saved.audit.updated_at > original_created_at);

    let stored = commodities::get_by_id(db.pool(), commodity.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Stainless Steel");
    assert_eq!(stored.audit.created_at, original_created_at);
    assert_eq!(stored.audit.updated_at, saved.audit.updated_at);
}

#[tokio::test]
async fn test_update_ignores_tampered_created_at() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let commodity = create_test_commodity(db.pool(), &clock, "Steel", "STL").await;
    let original_created_at = commodity.audit.created_at;

    clock.advance_seconds(5);

    let mut tampered = commodity.clone();
    tampered.audit.created_at = chrono::DateTime::from_timestamp(1, 0).unwrap();
    let saved = persist_audited(db.pool(), &clock, tampered, false).await.unwrap();

    // Both the returned entity and the stored row keep the original value
    assert_eq!(saved.audit.created_at, original_created_at);
    let stored = commodities::get_by_id(db.pool(), commodity.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.audit.created_at, original_created_at);
}

#[tokio::test]
async fn test_updated_at_never_decreases_across_updates() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let mut commodity = create_test_commodity(db.pool(), &clock, "Steel", "STL").await;
    let mut previous = commodity.audit.updated_at;

    for step in 0..3 {
        clock.advance_seconds(1);
        commodity.code = format!("STL{step}");
        commodity = persist_audited(db.pool(), &clock, commodity, false)
            .await
            .unwrap();
        assert!(commodity.audit.updated_at >= previous);
        previous = commodity.audit.updated_at;
    }
}

#[tokio::test]
async fn test_unit_of_work_shares_one_instant_across_entity_kinds() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let existing = create_test_commodity(db.pool(), &clock, "Steel", "STL").await;
    clock.advance_seconds(60);

    let mut new_commodity = Commodity::new("Copper", "CPR");
    let mut identity = Identity::new("A B", "a@b.com", "$2b$04$abcdefghijklmnopqrstuv");
    let mut carrier = Carrier::new("Oceanic", "https://cdn.example.com/oceanic.png", existing.id);
    let mut edited = existing.clone();
    edited.name = "Structural Steel".to_string();

    let mut uow = UnitOfWork::new();
    uow.add(&mut new_commodity)
        .add(&mut identity)
        .add(&mut carrier)
        .modify(&mut edited);
    assert_eq!(uow.len(), 4);

    let written = uow.save(db.pool(), &clock).await.unwrap();
    assert_eq!(written, 4);

    let now = AuditStamp::storage_precision(clock.utc());
    for stamp in [new_commodity.audit, identity.audit, carrier.audit] {
        assert_eq!(stamp.created_at, now);
        assert_eq!(stamp.updated_at, now);
    }
    assert_eq!(edited.audit.updated_at, now);
    assert_eq!(edited.audit.created_at, existing.audit.created_at);

    let stored_identity = users::get_by_id(db.pool(), identity.id).await.unwrap().unwrap();
    let stored_carrier = carriers::get_by_id(db.pool(), carrier.id).await.unwrap().unwrap();
    assert_eq!(stored_identity.audit.created_at, now);
    assert_eq!(stored_carrier.audit.created_at, now);
}

#[tokio::test]
async fn test_empty_unit_of_work_writes_nothing() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let uow = UnitOfWork::new();
    assert!(uow.is_empty());
    assert_eq!(uow.save(db.pool(), &clock).await.unwrap(), 0);
}

#[tokio::test]
async fn test_failed_unit_of_work_rolls_back() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let mut first = Commodity::new("Copper", "CPR");
    let mut missing = Commodity::new("Ghost", "GHO");
    missing.id = 9_999;
    let yesterday = AuditStamp::storage_precision(clock.utc() - chrono::Duration::days(1));
    let earlier = AuditStamp::restored(yesterday, yesterday);
    missing.audit = earlier;

    let mut uow = UnitOfWork::new();
    uow.add(&mut first).modify(&mut missing);
    let err = uow.save(db.pool(), &clock).await.unwrap_err();
    assert!(err.is_not_found());

    assert!(commodities::get_all(db.pool()).await.unwrap().is_empty());

    // The rolled-back insert leaves no id or stamp behind
    assert_eq!(first.id, 0);
    assert_eq!(first.audit, AuditStamp::unstamped());
    assert_eq!(missing.id, 9_999);
    assert_eq!(missing.audit, earlier);
}

#[tokio::test]
async fn test_entity_from_failed_save_can_be_saved_again() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let mut copper = Commodity::new("Copper", "CPR");
    let mut missing = Commodity::new("Ghost", "GHO");
    missing.id = 9_999;

    let mut uow = UnitOfWork::new();
    uow.add(&mut copper).modify(&mut missing);
    assert!(uow.save(db.pool(), &clock).await.is_err());

    clock.advance_seconds(30);
    let mut uow = UnitOfWork::new();
    uow.add(&mut copper);
    assert_eq!(uow.save(db.pool(), &clock).await.unwrap(), 1);

    let stored = commodities::get_by_id(db.pool(), copper.id).await.unwrap().unwrap();
    assert_eq!(stored.code, "CPR");
    assert_eq!(stored.audit, copper.audit);
    assert_eq!(copper.audit.created_at, copper.audit.updated_at);
}

#[tokio::test]
async fn test_update_of_missing_row_is_not_found() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let mut carrier = Carrier::new("Nowhere", "https://cdn.example.com/x.png", 1);
    carrier.id = 404;

    let err = persist_audited(db.pool(), &clock, carrier, false)
        .await
        .unwrap_err();
    match err {
        StorageError::NotFound { entity, id } => {
            assert_eq!(entity, EntityKind::Carrier.display_name());
            assert_eq!(id, "404");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_password_hash_is_not_rewritten_on_update() {
    let db = TestDb::new().await;
    let clock = MutableClock::fixture();

    let identity = persist_audited(
        db.pool(),
        &clock,
        Identity::new("A B", "a@b.com", "$2b$04$originalhashoriginalhash"),
        true,
    )
    .await
    .unwrap();

    let mut edited = identity.clone();
    edited.full_name = "A. B.".to_string();
    edited.avatar_url = Some("https://cdn.example.com/ab.png".to_string());
    edited.password_hash = "tampered".to_string();
    persist_audited(db.pool(), &clock, edited, false).await.unwrap();

    let stored = users::get_by_id(db.pool(), identity.id).await.unwrap().unwrap();
    assert_eq!(stored.full_name, "A. B.");
    assert_eq!(stored.avatar_url.as_deref(), Some("https://cdn.example.com/ab.png"));
    assert_eq!(stored.password_hash, "$2b$04$originalhashoriginalhash");
}
