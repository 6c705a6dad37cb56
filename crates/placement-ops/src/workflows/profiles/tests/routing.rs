use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::profiles::router::{
    self, profile_admin_router, BulkStatusRequest, SingleActionRequest,
};
use crate::workflows::profiles::service::ProfileStateService;

fn bulk_request(action: &str, ids: &[&str]) -> BulkStatusRequest {
    BulkStatusRequest {
        action: action.to_string(),
        student_ids: ids.iter().map(|id| student_id(id)).collect(),
        acting_admin: admin(),
    }
}

#[tokio::test]
async fn bulk_handler_rejects_unknown_actions_without_updating() {
    let (service, store) = build_service();
    let id = student_id("u-300");
    seed_eligible(&store, &id, "CS-2021-030", "Aman Gupta");
    let service = Arc::new(service);

    let response = router::bulk_status_handler::<MemoryStore>(
        State(service),
        axum::Json(bulk_request("archive", &["u-300"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("message"), Some(&json!("invalid action 'archive'")));
    assert!(store.frozen_updates().is_empty());
    assert!(store.locked_updates().is_empty());
}

#[tokio::test]
async fn bulk_handler_rejects_empty_selections() {
    let (service, _store) = build_service();
    let service = Arc::new(service);

    let response = router::bulk_status_handler::<MemoryStore>(
        State(service),
        axum::Json(bulk_request("freeze", &[])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("message"), Some(&json!("No students selected.")));
}

#[tokio::test]
async fn bulk_route_returns_the_partial_success_report() {
    let (service, store) = build_service();
    let a = student_id("u-301");
    let b = student_id("u-302");
    seed_eligible(&store, &a, "CS-2021-031", "Nidhi Saxena");
    seed_eligible(&store, &b, "CS-2021-032", "Harsh Vardhan");
    store.set_pending(&b, 1);
    let router = profile_admin_router(Arc::new(service));

    let body = serde_json::to_vec(&json!({
        "action": "freeze",
        "student_ids": ["u-301", "u-302"],
        "acting_admin": "admin-007",
    }))
    .expect("request serializes");

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/admin/students/bulk-status")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("successCount"), Some(&json!(1)));
    let failures = payload
        .get("failures")
        .and_then(serde_json::Value::as_array)
        .expect("failures array");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].get("roll_no"), Some(&json!("CS-2021-032")));
    assert_eq!(
        failures[0].get("reason"),
        Some(&json!("Has 1 pending placement application(s)."))
    );
}

#[tokio::test]
async fn eligibility_handler_reports_eligible_students() {
    let (service, store) = build_service();
    let id = student_id("u-303");
    seed_eligible(&store, &id, "CS-2021-033", "Rhea Thomas");

    let response = router::eligibility_handler::<MemoryStore>(
        State(Arc::new(service)),
        Path("u-303".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("eligible"), Some(&json!(true)));
}

#[tokio::test]
async fn eligibility_handler_distinguishes_missing_students() {
    let (service, _store) = build_service();

    let response = router::eligibility_handler::<MemoryStore>(
        State(Arc::new(service)),
        Path("u-ghost".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("eligible"), Some(&json!(false)));
    assert_eq!(
        payload.get("reason"),
        Some(&json!("Student profile not found."))
    );
}

#[tokio::test]
async fn freeze_handler_maps_rule_refusals_to_bad_request() {
    let (service, store) = build_service();
    let id = student_id("u-304");
    seed_eligible(&store, &id, "CS-2021-034", "Kabir Bedi");
    store.set_pending(&id, 2);

    let response = router::freeze_handler::<MemoryStore>(
        State(Arc::new(service)),
        Path("u-304".to_string()),
        axum::Json(SingleActionRequest {
            acting_admin: admin(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("message"),
        Some(&json!(
            "Cannot freeze: Has 2 pending placement application(s)."
        ))
    );
}

#[tokio::test]
async fn unfreeze_handler_maps_unknown_students_to_not_found() {
    let (service, _store) = build_service();

    let response = router::unfreeze_handler::<MemoryStore>(
        State(Arc::new(service)),
        Path("u-ghost".to_string()),
        axum::Json(SingleActionRequest {
            acting_admin: admin(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("message"), Some(&json!("Student not found.")));
}

#[tokio::test]
async fn lock_route_applies_and_confirms() {
    let (service, store) = build_service();
    let id = student_id("u-305");
    seed_eligible(&store, &id, "CS-2021-035", "Mira Pandey");
    let router = profile_admin_router(Arc::new(service));

    let body = serde_json::to_vec(&json!({ "acting_admin": "admin-007" })).expect("serializes");
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/admin/students/u-305/lock")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("message"),
        Some(&json!("Student profile has been locked."))
    );
    assert_eq!(
        store.locked_state(&id),
        Some(crate::workflows::profiles::domain::LockState::Locked)
    );
}
