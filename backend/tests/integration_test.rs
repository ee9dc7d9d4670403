mod helpers;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use helpers::*;
use osusu_backend::allocator::AllocationError;
use osusu_backend::models::*;
use osusu_backend::services::PaymentSubmission;
use osusu_backend::{create_router, AppError};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

async fn send(app: axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Group → join (auto and manual) → full → payment → approval
#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_join_flow(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let state = db.app_state();
    let fixtures = TestFixtures::create(&db).await;
    let group_id = fixtures.group.id;
    let user = fixtures.member.id;
    let memberships = &state.membership_service;

    seat(&db, group_id, fixtures.admin.id, 1).await;
    seat(&db, group_id, fixtures.admin.id, 2).await;
    seat(&db, group_id, fixtures.admin.id, 4).await;

    // Smallest gap
    let auto = memberships.join_group(group_id, user, None).await.unwrap();
    assert_eq!(auto.slot_number, 3);

    // Manual pick
    let err = memberships.join_group(group_id, user, Some(4)).await.unwrap_err();
    assert!(matches!(err, AppError::Allocation(AllocationError::SlotTaken { requested: 4 })));
    let err = memberships.join_group(group_id, user, Some(6)).await.unwrap_err();
    assert!(matches!(err, AppError::Allocation(AllocationError::OutOfRange { requested: 6, capacity: 5 })));
    let manual = memberships.join_group(group_id, user, Some(5)).await.unwrap();
    assert_eq!(manual.slot_number, 5);

    let err = memberships.join_group(group_id, user, None).await.unwrap_err();
    assert!(matches!(err, AppError::Allocation(AllocationError::CapacityExceeded { capacity: 5 })));

    let seating = memberships.seating(group_id).await.unwrap();
    assert_eq!(seating.taken_slots, vec![1, 2, 3, 4, 5]);
    assert!(seating.free_slots.is_empty());

    // Contribution against the auto-assigned seat
    let payment = state
        .payment_service
        .submit_payment(PaymentSubmission {
            group_member_id: auto.id,
            amount: Decimal::new(10_000, 0),
            screenshot_url: "https://files/transfer.png".to_string(),
            due_date: None,
        })
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::AwaitingApproval);

    let approved = state.payment_service.approve(payment.payment.id).await.unwrap();
    assert_eq!(approved.status, PaymentStatus::Paid);

    let by_member = state.payment_service.group_payments(group_id).await.unwrap();
    assert_eq!(by_member.len(), 5);
    let third = by_member.iter().find(|m| m.membership.slot_number == 3).unwrap();
    assert_eq!(third.payments.len(), 1);

    assert_eq!(state.payment_service.payments_of_user(user).await.unwrap().len(), 1);
    assert_eq!(memberships.memberships_of(user).await.unwrap().len(), 2);
}

/// Two joins racing for the last seat: exactly one wins
#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_concurrent_joins_never_overbook(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let state = db.app_state();
    let first = create_test_profile(&db, "first@example.com").await;
    let second = create_test_profile(&db, "second@example.com").await;
    let group = create_test_group(&db, "Last Seat", 3).await;
    seat(&db, group.id, first.id, 1).await;
    seat(&db, group.id, first.id, 2).await;

    let service = state.membership_service.clone();
    let (a, b) = tokio::join!(
        service.join_group(group.id, first.id, None),
        service.join_group(group.id, second.id, None),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    for result in outcomes.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            matches!(
                result,
                AppError::Allocation(AllocationError::SlotTaken { .. })
                    | AppError::Allocation(AllocationError::CapacityExceeded { .. })
            ),
            "unexpected error: {result:?}"
        );
    }
    assert_eq!(db.membership_repo.slot_numbers(group.id).await.unwrap().len(), 3);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_http_join_and_conflicts(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let state = db.app_state();
    let fixtures = TestFixtures::create(&db).await;
    let uri = format!("/api/groups/{}/members", fixtures.group.id);
    let app = create_router(&state);

    let (status, body) = send(
        app.clone(),
        "POST",
        &uri,
        Some(json!({ "user_id": fixtures.member.id, "slot_number": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["slot_number"], 2);

    let (status, body) = send(
        app.clone(),
        "POST",
        &uri,
        Some(json!({ "user_id": fixtures.admin.id, "slot_number": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 409);

    let (status, _) = send(
        app.clone(),
        "POST",
        &uri,
        Some(json!({ "user_id": fixtures.admin.id, "slot_number": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(app.clone(), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        app.clone(),
        "GET",
        &format!("/api/groups/{}/seating", fixtures.group.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["free_slots"], json!([1, 3, 4, 5]));

    let (status, _) = send(
        app,
        "GET",
        &format!("/api/groups/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_http_profiles_accounts_and_overview(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let state = db.app_state();
    let app = create_router(&state);

    let (status, profile) = send(
        app.clone(),
        "POST",
        "/api/profiles",
        Some(serde_json::to_value(new_profile("tolu@example.com", "22233344455")).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = profile["id"].as_str().unwrap().to_string();

    let (status, account) = send(
        app.clone(),
        "POST",
        &format!("/api/profiles/{user_id}/accounts"),
        Some(json!({ "account_number": "0011223344", "bank_name": "UBA" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(account["status"], "active");

    let (status, account) = send(
        app.clone(),
        "PUT",
        &format!("/api/accounts/{}/status", account["id"].as_str().unwrap()),
        Some(json!({ "status": "inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["status"], "inactive");

    let (status, overview) = send(app.clone(), "GET", "/api/overview?days=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["total_profiles"], 1);
    assert_eq!(overview["recent_registrations"], 1);
    assert_eq!(overview["account_status"]["inactive"], 1);
    assert_eq!(overview["window_days"], 7);

    let (status, body) = send(app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "up");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn test_http_account_listing_and_edit(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let state = db.app_state();
    let app = create_router(&state);

    let (_, profile) = send(
        app.clone(),
        "POST",
        "/api/profiles",
        Some(serde_json::to_value(new_profile("femi@example.com", "33344455566")).unwrap()),
    )
    .await;
    let user_id = profile["id"].as_str().unwrap().to_string();
    let accounts_uri = format!("/api/profiles/{user_id}/accounts");

    let (status, accounts) = send(app.clone(), "GET", &accounts_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accounts, json!([]));

    let (_, account) = send(
        app.clone(),
        "POST",
        &accounts_uri,
        Some(json!({ "account_number": "0011223344", "bank_name": "UBA" })),
    )
    .await;
    let account_uri = format!("/api/accounts/{}", account["id"].as_str().unwrap());

    let (status, edited) = send(
        app.clone(),
        "PUT",
        &account_uri,
        Some(json!({
            "account_number": "9988776655",
            "bank_name": "Wema Bank",
            "status": "deceased"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["id"], account["id"]);
    assert_eq!(edited["account_number"], "9988776655");
    assert_eq!(edited["bank_name"], "Wema Bank");
    assert_eq!(edited["status"], "deceased");

    let (status, accounts) = send(app.clone(), "GET", &accounts_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accounts.as_array().unwrap().len(), 1);
    assert_eq!(accounts[0]["bank_name"], "Wema Bank");

    let (status, _) = send(
        app.clone(),
        "PUT",
        &format!("/api/accounts/{}", uuid::Uuid::new_v4()),
        Some(json!({ "account_number": "1", "bank_name": "UBA", "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        app,
        "GET",
        &format!("/api/profiles/{}/accounts", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
}
