// Integration tests for customer demographic persistence
//
// These tests verify:
// 1. Identifiers round-trip unchanged and the store enforces length/uniqueness
// 2. Linked customers are loaded by explicit query, exactly N for N links
// 3. Deleting a linked demographic is deterministic under both delete policies

mod helpers;

use demographics::errors::StoreError;
use demographics::settings::DeletePolicy;
use demographics::storage::{self, CustomerDemographic};
use helpers::{DemographicBuilder, TestDb};

#[tokio::test]
async fn test_round_trip_preserves_identity_and_description() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    let created = DemographicBuilder::new("0123456789")
        .with_desc("Ten character identifier")
        .create(db)
        .await;

    let loaded = storage::get_demographic(db, "0123456789")
        .await
        .expect("Query failed")
        .expect("Demographic not found");

    assert_eq!(loaded, created);
    assert_eq!(loaded.customer_desc(), Some("Ten character identifier"));
}

#[tokio::test]
async fn test_unicode_identifier_counts_characters() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    // Ten characters, more than ten bytes
    DemographicBuilder::new("ÄÖÜäöüßéèê").without_desc().create(db).await;

    let loaded = storage::get_demographic(db, "ÄÖÜäöüßéèê")
        .await
        .expect("Query failed");

    assert!(loaded.is_some());
}

#[tokio::test]
async fn test_store_rejects_eleven_character_identifier() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    let result =
        storage::create_demographic(db, &CustomerDemographic::with_id("01234567890")).await;

    assert!(result.is_err());
    assert!(storage::list_demographics(db)
        .await
        .expect("Failed to list demographics")
        .is_empty());
}

#[tokio::test]
async fn test_store_rejects_duplicate_identifier() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    DemographicBuilder::new("FAMILY").create(db).await;

    let result = storage::create_demographic(db, &CustomerDemographic::with_id("FAMILY")).await;

    assert!(matches!(result, Err(StoreError::Duplicate(_))));
}

#[tokio::test]
async fn test_fresh_record_collection_is_initialized() {
    let record = CustomerDemographic::new();

    assert!(record.customer_customer_demos().is_empty());

    // Serialized form always carries the collection
    let json = serde_json::to_value(&record).expect("Failed to serialize record");
    assert_eq!(json["customer_customer_demos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_loaded_collection_has_exactly_n_links() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    for n in [0usize, 1, 7] {
        let id = format!("N{}", n);
        DemographicBuilder::new(&id).with_customers(n).create(db).await;

        let loaded = storage::get_demographic_with_demos(db, &id)
            .await
            .expect("Query failed")
            .expect("Demographic not found");

        assert_eq!(loaded.customer_customer_demos().len(), n);
        assert!(loaded
            .customer_customer_demos()
            .iter()
            .all(|d| d.customer_type_id == id));
    }
}

#[tokio::test]
async fn test_plain_load_does_not_fetch_links() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    DemographicBuilder::new("FAMILY")
        .with_customer("ALFKI")
        .create(db)
        .await;

    let loaded = storage::get_demographic(db, "FAMILY")
        .await
        .expect("Query failed")
        .expect("Demographic not found");

    assert!(loaded.customer_customer_demos().is_empty());
}

#[tokio::test]
async fn test_restrict_policy_refuses_delete_of_linked_demographic() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    DemographicBuilder::new("FAMILY")
        .with_customers(3)
        .create(db)
        .await;

    let err = storage::delete_demographic(db, "FAMILY", DeletePolicy::Restrict)
        .await
        .expect_err("Delete should be refused");

    match err {
        StoreError::StillReferenced {
            customer_type_id,
            links,
        } => {
            assert_eq!(customer_type_id, "FAMILY");
            assert_eq!(links, 3);
        }
        other => panic!("unexpected error: {}", other),
    }

    // Refusal is repeatable and leaves every row in place
    assert!(storage::delete_demographic(db, "FAMILY", DeletePolicy::Restrict)
        .await
        .is_err());
    assert_eq!(
        storage::count_demos_by_type(db, "FAMILY")
            .await
            .expect("Count failed"),
        3
    );
}

#[tokio::test]
async fn test_restrict_policy_allows_delete_after_unlinking() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    DemographicBuilder::new("FAMILY")
        .with_customer("ALFKI")
        .create(db)
        .await;

    storage::unlink_customer(db, "ALFKI", "FAMILY")
        .await
        .expect("Failed to unlink customer");

    let removed = storage::delete_demographic(db, "FAMILY", DeletePolicy::Restrict)
        .await
        .expect("Failed to delete demographic");

    assert_eq!(removed, 0);
}

#[tokio::test]
async fn test_cascade_policy_removes_demographic_and_links() {
    let test_db = TestDb::new().await;
    let db = test_db.connection();

    DemographicBuilder::new("FAMILY")
        .with_customers(4)
        .create(db)
        .await;
    DemographicBuilder::new("SENIOR")
        .with_customer("CUST0000")
        .create(db)
        .await;

    let removed = storage::delete_demographic(db, "FAMILY", DeletePolicy::Cascade)
        .await
        .expect("Failed to delete demographic");

    assert_eq!(removed, 4);
    assert!(storage::get_demographic(db, "FAMILY")
        .await
        .expect("Query failed")
        .is_none());

    // The customer keeps its link to the other category
    let remaining = storage::get_demos_by_customer(db, "CUST0000")
        .await
        .expect("Query failed");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].customer_type_id, "SENIOR");
}
