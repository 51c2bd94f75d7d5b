//! Unit tests for the donation request registry.

use std::sync::Arc;

use blood_donation_api::models::{DonationRequest, DonationStatus};
use blood_donation_api::services::{DonationRequestRegistry, RegistryError};
use blood_donation_api::storage::{Document, MemoryDocumentStore, StorageError};
use serde_json::json;
use uuid::Uuid;

fn registry() -> DonationRequestRegistry {
    DonationRequestRegistry::new(Arc::new(MemoryDocumentStore::new()))
}

fn doc(value: serde_json::Value) -> Document {
    value.as_object().expect("test doc must be an object").clone()
}

fn request_payload(email: &str, status: &str, date: &str) -> Document {
    doc(json!({
        "requester_email": email,
        "donation_status": status,
        "selectedDate": date,
        "recipient_name": "Jamil",
        "blood_group": "O+",
        "district": "Dhaka",
    }))
}

#[tokio::test]
async fn create_then_get_returns_payload_plus_identifier() {
    let registry = registry();
    let payload = request_payload("a@x.com", "pending", "2024-01-01");

    let id = registry.create(payload.clone()).await.unwrap().inserted_id;
    let record = registry.get_by_id(&id.to_string()).await.unwrap();

    for (key, value) in &payload {
        assert_eq!(record.get(key), Some(value), "field {key} must round-trip");
    }
    assert_eq!(
        record.get("id").and_then(|v| v.as_str()),
        Some(id.to_string().as_str())
    );

    // The stored document is a valid typed record
    let typed: DonationRequest =
        serde_json::from_value(serde_json::Value::Object(record)).unwrap();
    assert_eq!(typed.id, id);
    assert_eq!(typed.requester_email, "a@x.com");
    assert_eq!(typed.donation_status, DonationStatus::Pending);
    assert_eq!(typed.extra.get("blood_group"), Some(&json!("O+")));
}

#[tokio::test]
async fn create_defaults_missing_status_to_pending() {
    let registry = registry();
    let mut payload = request_payload("a@x.com", "pending", "2024-01-01");
    payload.remove("donation_status");

    let id = registry.create(payload).await.unwrap().inserted_id;
    let record = registry.get_by_id(&id.to_string()).await.unwrap();
    assert_eq!(record.get("donation_status"), Some(&json!("pending")));
}

#[tokio::test]
async fn create_rejects_unrecognised_status() {
    let registry = registry();
    let err = registry
        .create(request_payload("a@x.com", "archived", "2024-01-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));
}

#[tokio::test]
async fn find_by_owner_is_conjunctive_with_status() {
    let registry = registry();
    registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap();
    registry
        .create(request_payload("a@x.com", "done", "2024-01-02"))
        .await
        .unwrap();
    registry
        .create(request_payload("b@x.com", "pending", "2024-01-03"))
        .await
        .unwrap();

    let all_a = registry.find_by_owner("a@x.com", None).await.unwrap();
    assert_eq!(all_a.len(), 2);

    let done_a = registry.find_by_owner("a@x.com", Some("done")).await.unwrap();
    assert_eq!(done_a.len(), 1);
    assert_eq!(done_a[0].get("donation_status"), Some(&json!("done")));
    assert_eq!(done_a[0].get("requester_email"), Some(&json!("a@x.com")));
}

#[tokio::test]
async fn find_by_owner_returns_empty_for_unknown_owner() {
    let registry = registry();
    assert!(registry
        .find_by_owner("missing@x.com", None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn find_by_owner_returns_empty_for_blank_email() {
    let registry = registry();
    registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap();
    assert!(registry.find_by_owner("", None).await.unwrap().is_empty());
    assert!(registry.find_by_owner("   ", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn find_by_owner_rejects_unrecognised_status_filter() {
    let registry = registry();
    let err = registry
        .find_by_owner("a@x.com", Some("archived"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));
}

#[tokio::test]
async fn recent_by_owner_is_limited_and_most_recent_first() {
    let registry = registry();
    for date in ["2024-01-01", "2024-04-01", "2024-02-01", "2024-03-01"] {
        registry
            .create(request_payload("a@x.com", "pending", date))
            .await
            .unwrap();
    }
    registry
        .create(request_payload("b@x.com", "pending", "2024-12-01"))
        .await
        .unwrap();

    let recent = registry.recent_by_owner("a@x.com", 3).await.unwrap();
    assert_eq!(recent.len(), 3);
    let dates: Vec<_> = recent
        .iter()
        .map(|d| d["selectedDate"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2024-04-01", "2024-03-01", "2024-02-01"]);
}

#[tokio::test]
async fn update_changes_only_the_supplied_field() {
    let registry = registry();
    let id = registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap()
        .inserted_id;
    let before = registry.get_by_id(&id.to_string()).await.unwrap();

    registry
        .update(&id.to_string(), doc(json!({"district": "Chittagong"})))
        .await
        .unwrap();

    let after = registry.get_by_id(&id.to_string()).await.unwrap();
    assert_eq!(after.get("district"), Some(&json!("Chittagong")));
    for (key, value) in &before {
        if key != "district" {
            assert_eq!(after.get(key), Some(value), "field {key} must be untouched");
        }
    }
}

#[tokio::test]
async fn update_strips_immutable_fields() {
    let registry = registry();
    let id = registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap()
        .inserted_id;

    registry
        .update(
            &id.to_string(),
            doc(json!({
                "id": Uuid::new_v4().to_string(),
                "requester_email": "hijacker@x.com",
                "district": "Sylhet",
            })),
        )
        .await
        .unwrap();

    let after = registry.get_by_id(&id.to_string()).await.unwrap();
    assert_eq!(after.get("requester_email"), Some(&json!("a@x.com")));
    assert_eq!(
        after.get("id").and_then(|v| v.as_str()),
        Some(id.to_string().as_str())
    );
    assert_eq!(after.get("district"), Some(&json!("Sylhet")));
}

#[tokio::test]
async fn generic_update_merges_status_unvalidated() {
    // Status validation is scoped to update_status; the generic merge
    // endpoint is a trusted full-document edit and writes any value.
    let registry = registry();
    let id = registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap()
        .inserted_id;

    registry
        .update(&id.to_string(), doc(json!({"donation_status": "archived"})))
        .await
        .unwrap();

    let record = registry.get_by_id(&id.to_string()).await.unwrap();
    assert_eq!(record.get("donation_status"), Some(&json!("archived")));
}

#[tokio::test]
async fn update_of_absent_id_is_a_noop_ack() {
    let registry = registry();
    let result = registry
        .update(&Uuid::new_v4().to_string(), doc(json!({"district": "Dhaka"})))
        .await
        .unwrap();
    assert_eq!(result.matched_count, 0);
    assert_eq!(result.modified_count, 0);
}

#[tokio::test]
async fn update_status_accepts_legal_transitions() {
    let registry = registry();
    let id = registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap()
        .inserted_id;

    registry
        .update_status(&id.to_string(), doc(json!({"donation_status": "in-progress"})))
        .await
        .unwrap();
    registry
        .update_status(&id.to_string(), doc(json!({"donation_status": "done"})))
        .await
        .unwrap();

    let record = registry.get_by_id(&id.to_string()).await.unwrap();
    assert_eq!(record.get("donation_status"), Some(&json!("done")));
}

#[tokio::test]
async fn update_status_rejects_leaving_a_terminal_state() {
    let registry = registry();
    let id = registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap()
        .inserted_id;

    registry
        .update_status(&id.to_string(), doc(json!({"donation_status": "done"})))
        .await
        .unwrap();

    let err = registry
        .update_status(&id.to_string(), doc(json!({"donation_status": "pending"})))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));

    let record = registry.get_by_id(&id.to_string()).await.unwrap();
    assert_eq!(record.get("donation_status"), Some(&json!("done")));
}

#[tokio::test]
async fn update_status_rejects_unrecognised_value() {
    let registry = registry();
    let id = registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap()
        .inserted_id;

    let err = registry
        .update_status(&id.to_string(), doc(json!({"donation_status": "archived"})))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));
}

#[tokio::test]
async fn update_status_of_absent_record_is_a_noop_ack() {
    let registry = registry();
    let result = registry
        .update_status(
            &Uuid::new_v4().to_string(),
            doc(json!({"donation_status": "done"})),
        )
        .await
        .unwrap();
    assert_eq!(result.matched_count, 0);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let registry = registry();
    let id = registry
        .create(request_payload("a@x.com", "pending", "2024-01-01"))
        .await
        .unwrap()
        .inserted_id;

    assert_eq!(
        registry.delete_by_id(&id.to_string()).await.unwrap().deleted_count,
        1
    );
    assert_eq!(
        registry.delete_by_id(&id.to_string()).await.unwrap().deleted_count,
        0
    );
}

#[tokio::test]
async fn malformed_identifier_is_rejected() {
    let registry = registry();
    for op_err in [
        registry.get_by_id("not-a-uuid").await.unwrap_err(),
        registry
            .update("not-a-uuid", doc(json!({"a": 1})))
            .await
            .unwrap_err(),
        registry.delete_by_id("not-a-uuid").await.unwrap_err(),
    ] {
        assert!(matches!(
            op_err,
            RegistryError::Storage(StorageError::InvalidIdentifier(_))
        ));
    }
}

#[tokio::test]
async fn get_by_id_of_absent_record_is_not_found() {
    let registry = registry();
    let err = registry
        .get_by_id(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Storage(StorageError::NotFound { .. })
    ));
}
