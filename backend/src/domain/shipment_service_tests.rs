//! Tests for the shipment command and query services.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockShipmentRepository, ShipmentPersistenceError};
use crate::domain::{ErrorCode, Pagination, ShipmentDetails, ShipmentFilter, ShipmentStatus};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::MutableClock;

struct Harness {
    store: Arc<InMemoryStore>,
    clock: Arc<MutableClock>,
    commands: ShipmentCommandService<InMemoryStore>,
    queries: ShipmentQueryService<InMemoryStore>,
}

#[fixture]
fn harness() -> Harness {
    let start = Utc
        .with_ymd_and_hms(2026, 5, 4, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    let store = Arc::new(InMemoryStore::default());
    let clock = Arc::new(MutableClock::new(start));
    let commands = ShipmentCommandService::new(Arc::clone(&store), clock.clone());
    let queries = ShipmentQueryService::new(Arc::clone(&store));
    Harness {
        store,
        clock,
        commands,
        queries,
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

fn details(tracking_id: &str, status: ShipmentStatus, express: bool) -> ShipmentDetails {
    ShipmentDetails {
        tracking_id: TrackingId::new(tracking_id).expect("valid tracking id"),
        status,
        express_delivery: express,
    }
}

fn create_request(owner: &str, tracking_id: &str) -> CreateShipmentRequest {
    CreateShipmentRequest {
        user_id: user(owner),
        details: details(tracking_id, ShipmentStatus::Pending, false),
    }
}

fn detail_code(error: &Error) -> Option<&str> {
    error.details().and_then(|details| details["code"].as_str())
}

fn list_all(owner: &str) -> ShipmentListQuery {
    ShipmentListQuery {
        user_id: user(owner),
        filter: ShipmentFilter::default(),
        pagination: Pagination::new(1, 100).expect("valid pagination"),
    }
}

#[rstest]
#[tokio::test]
async fn create_stamps_equal_timestamps_and_generates_id(harness: Harness) {
    let shipment = harness
        .commands
        .create(create_request("u1", "TRK1"))
        .await
        .expect("create succeeds");

    assert_eq!(shipment.created_at(), shipment.updated_at());
    assert_eq!(shipment.created_at(), harness.clock.utc());
    assert!(!shipment.id().as_ref().is_empty());
}

#[rstest]
#[case("TRK1")]
#[case("trk1")]
#[tokio::test]
async fn create_rejects_duplicate_tracking_id_for_same_owner(
    harness: Harness,
    #[case] duplicate: &str,
) {
    harness
        .commands
        .create(create_request("u1", "TRK1"))
        .await
        .expect("first create succeeds");

    let error = harness
        .commands
        .create(create_request("u1", duplicate))
        .await
        .expect_err("duplicate must fail");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(detail_code(&error), Some("duplicate_tracking_id"));
}

#[rstest]
#[tokio::test]
async fn same_tracking_id_is_allowed_for_other_owner(harness: Harness) {
    harness
        .commands
        .create(create_request("u1", "TRK1"))
        .await
        .expect("first create succeeds");
    harness
        .commands
        .create(create_request("u2", "TRK1"))
        .await
        .expect("other owner may reuse tracking id");
}

#[rstest]
#[tokio::test]
async fn creates_are_listed_newest_first(harness: Harness) {
    for tracking_id in ["A", "B", "C"] {
        harness
            .commands
            .create(create_request("u1", tracking_id))
            .await
            .expect("create succeeds");
    }

    let page = harness.queries.list(&list_all("u1")).await.expect("list");
    let order: Vec<&str> = page
        .shipments
        .iter()
        .map(|shipment| shipment.tracking_id().as_ref())
        .collect();
    assert_eq!(order, vec!["C", "B", "A"]);
}

#[rstest]
#[tokio::test]
async fn update_advances_updated_at_and_keeps_position(harness: Harness) {
    let first = harness
        .commands
        .create(create_request("u1", "TRK1"))
        .await
        .expect("create");
    harness
        .commands
        .create(create_request("u1", "TRK2"))
        .await
        .expect("create");
    harness.clock.advance_seconds(90);

    let updated = harness
        .commands
        .update(UpdateShipmentRequest {
            id: first.id().clone(),
            user_id: user("u1"),
            details: details("TRK1", ShipmentStatus::Delivered, true),
        })
        .await
        .expect("update succeeds");

    assert_eq!(updated.created_at(), first.created_at());
    assert!(updated.updated_at() > first.updated_at());
    assert_eq!(updated.status(), ShipmentStatus::Delivered);
    assert!(updated.express_delivery());

    let page = harness.queries.list(&list_all("u1")).await.expect("list");
    let ids: Vec<&ShipmentId> = page.shipments.iter().map(Shipment::id).collect();
    assert_eq!(ids.last(), Some(&first.id()));
}

#[rstest]
#[tokio::test]
async fn update_rejects_tracking_id_of_sibling(harness: Harness) {
    let first = harness
        .commands
        .create(create_request("u1", "TRK1"))
        .await
        .expect("create");
    harness
        .commands
        .create(create_request("u1", "TRK2"))
        .await
        .expect("create");

    let error = harness
        .commands
        .update(UpdateShipmentRequest {
            id: first.id().clone(),
            user_id: user("u1"),
            details: details("trk2", ShipmentStatus::Pending, false),
        })
        .await
        .expect_err("clash must fail");

    assert_eq!(detail_code(&error), Some("duplicate_tracking_id"));
}

#[rstest]
#[tokio::test]
async fn update_of_foreign_shipment_is_not_found(harness: Harness) {
    let theirs = harness
        .commands
        .create(create_request("u2", "TRK1"))
        .await
        .expect("create");

    let error = harness
        .commands
        .update(UpdateShipmentRequest {
            id: theirs.id().clone(),
            user_id: user("u1"),
            details: details("TRK9", ShipmentStatus::Cancelled, false),
        })
        .await
        .expect_err("wrong owner must fail");

    assert_eq!(error.code(), ErrorCode::NotFound);
    let stored = harness
        .store
        .find_by_id(theirs.id())
        .await
        .expect("lookup")
        .expect("record kept");
    assert_eq!(stored, theirs);
}

#[rstest]
#[tokio::test]
async fn delete_by_wrong_owner_keeps_record(harness: Harness) {
    let theirs = harness
        .commands
        .create(create_request("b", "TRK1"))
        .await
        .expect("create");

    let error = harness
        .commands
        .delete(DeleteShipmentRequest {
            id: theirs.id().clone(),
            user_id: user("a"),
        })
        .await
        .expect_err("wrong owner must fail");
    assert_eq!(error.code(), ErrorCode::NotFound);

    let page = harness.queries.list(&list_all("b")).await.expect("list");
    assert_eq!(page.total_shipments, 1);
}

#[rstest]
#[tokio::test]
async fn delete_removes_owned_shipment(harness: Harness) {
    let mine = harness
        .commands
        .create(create_request("u1", "TRK1"))
        .await
        .expect("create");

    harness
        .commands
        .delete(DeleteShipmentRequest {
            id: mine.id().clone(),
            user_id: user("u1"),
        })
        .await
        .expect("delete succeeds");

    let page = harness.queries.list(&list_all("u1")).await.expect("list");
    assert_eq!(page.total_shipments, 0);
}

#[rstest]
#[tokio::test]
async fn stats_summarise_owner_shipments(harness: Harness) {
    let seeds = [
        ("u1", "A", ShipmentStatus::Pending, true),
        ("u1", "B", ShipmentStatus::InTransit, true),
        ("u1", "C", ShipmentStatus::Cancelled, false),
        ("u2", "D", ShipmentStatus::Delivered, true),
    ];
    for (owner, tracking_id, status, express) in seeds {
        harness
            .commands
            .create(CreateShipmentRequest {
                user_id: user(owner),
                details: details(tracking_id, status, express),
            })
            .await
            .expect("create");
    }

    let stats = harness.queries.stats(&user("u1")).await.expect("stats");
    assert_eq!(
        stats,
        ShipmentStats {
            total: 3,
            pending: 1,
            in_transit: 1,
            delivered: 0,
            cancelled: 1,
            express: 2,
        }
    );
}

#[tokio::test]
async fn repository_failure_maps_to_redacted_internal_error() {
    let mut repo = MockShipmentRepository::new();
    repo.expect_list_for_user()
        .times(1)
        .return_once(|_| Err(ShipmentPersistenceError::load("/var/lib/db.json: denied")));

    let clock = Arc::new(MutableClock::new(Utc::now()));
    let service = ShipmentCommandService::new(Arc::new(repo), clock);
    let error = service
        .create(create_request("u1", "TRK1"))
        .await
        .expect_err("load failure must surface");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(!error.message().contains("/var/lib"));
}

#[tokio::test]
async fn missing_shipment_is_not_found_without_listing() {
    let mut repo = MockShipmentRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_list_for_user().never();

    let clock = Arc::new(MutableClock::new(Utc::now()));
    let service = ShipmentCommandService::new(Arc::new(repo), clock);
    let error = service
        .update(UpdateShipmentRequest {
            id: ShipmentId::new("missing").expect("valid id"),
            user_id: user("u1"),
            details: details("TRK1", ShipmentStatus::Pending, false),
        })
        .await
        .expect_err("missing must fail");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn concurrent_duplicate_creates_admit_exactly_one() {
    let store = Arc::new(InMemoryStore::default());
    let clock = Arc::new(MutableClock::new(Utc::now()));
    let service = Arc::new(ShipmentCommandService::new(Arc::clone(&store), clock));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.create(create_request("u1", "RACE")).await })
        })
        .collect();
    let mut successes = 0;
    for handle in handles {
        if handle.await.expect("task joins").is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    let owned = store.list_for_user(&user("u1")).await.expect("list");
    assert_eq!(owned.len(), 1);
}

#[tokio::test]
async fn create_stamps_both_timestamps_from_one_clock_reading() {
    let fixed = Utc
        .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .expect("valid fixture timestamp");
    let mut clock = mockable::MockClock::new();
    clock.expect_utc().times(1).return_const(fixed);
    let service = ShipmentCommandService::new(Arc::new(InMemoryStore::default()), Arc::new(clock));

    let shipment = service
        .create(create_request("u1", "TRK1"))
        .await
        .expect("create succeeds");

    assert_eq!(shipment.created_at(), fixed);
    assert_eq!(shipment.updated_at(), fixed);
}
