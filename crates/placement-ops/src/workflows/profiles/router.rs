use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AdminId, BulkAction, StudentId};
use super::eligibility::{Eligibility, FreezeRefusal};
use super::service::{ProfileServiceError, ProfileStateService};
use super::store::StudentStore;

/// Router builder exposing the administrative profile endpoints.
///
/// The acting administrator arrives as an explicit request field; the
/// upstream auth layer is assumed to have verified it.
pub fn profile_admin_router<S>(service: Arc<ProfileStateService<S>>) -> Router
where
    S: StudentStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/admin/students/bulk-status",
            post(bulk_status_handler::<S>),
        )
        .route(
            "/api/v1/admin/students/:student_id/freeze-eligibility",
            get(eligibility_handler::<S>),
        )
        .route(
            "/api/v1/admin/students/:student_id/freeze",
            post(freeze_handler::<S>),
        )
        .route(
            "/api/v1/admin/students/:student_id/unfreeze",
            post(unfreeze_handler::<S>),
        )
        .route(
            "/api/v1/admin/students/:student_id/lock",
            post(lock_handler::<S>),
        )
        .route(
            "/api/v1/admin/students/:student_id/unlock",
            post(unlock_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct BulkStatusRequest {
    pub action: String,
    pub student_ids: Vec<StudentId>,
    pub acting_admin: AdminId,
}

#[derive(Debug, Deserialize)]
pub struct SingleActionRequest {
    pub acting_admin: AdminId,
}

pub(crate) async fn bulk_status_handler<S>(
    State(service): State<Arc<ProfileStateService<S>>>,
    axum::Json(request): axum::Json<BulkStatusRequest>,
) -> Response
where
    S: StudentStore + 'static,
{
    let action: BulkAction = match request.action.parse() {
        Ok(action) => action,
        Err(unknown) => {
            let payload = json!({ "message": unknown.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.apply_bulk_action(action, &request.student_ids, &request.acting_admin) {
        Ok(report) => {
            let payload = json!({
                "message": report.message(),
                "successCount": report.success_count,
                "failures": report.failures,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ProfileServiceError::EmptySelection) => {
            let payload = json!({ "message": "No students selected." });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "message": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn eligibility_handler<S>(
    State(service): State<Arc<ProfileStateService<S>>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: StudentStore + 'static,
{
    let student = StudentId(student_id);
    match service.check_freeze_eligibility(&student) {
        Eligibility::Eligible => {
            let payload = json!({ "eligible": true });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Eligibility::Ineligible(FreezeRefusal::ProfileNotFound) => {
            let payload = json!({
                "eligible": false,
                "reason": FreezeRefusal::ProfileNotFound.summary(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Eligibility::Ineligible(refusal) => {
            let payload = json!({
                "eligible": false,
                "reason": refusal.summary(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn freeze_handler<S>(
    State(service): State<Arc<ProfileStateService<S>>>,
    Path(student_id): Path<String>,
    axum::Json(request): axum::Json<SingleActionRequest>,
) -> Response
where
    S: StudentStore + 'static,
{
    let student = StudentId(student_id);
    match service.freeze_student(&student, &request.acting_admin) {
        Ok(()) => {
            let payload = json!({ "message": "Student profile has been frozen." });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ProfileServiceError::FreezeRefused(FreezeRefusal::ProfileNotFound)) => {
            let payload = json!({ "message": "Student not found." });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(ProfileServiceError::FreezeRefused(refusal)) => {
            let payload = json!({ "message": format!("Cannot freeze: {}", refusal.summary()) });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "message": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn unfreeze_handler<S>(
    State(service): State<Arc<ProfileStateService<S>>>,
    Path(student_id): Path<String>,
    axum::Json(request): axum::Json<SingleActionRequest>,
) -> Response
where
    S: StudentStore + 'static,
{
    let student = StudentId(student_id);
    match service.unfreeze_student(&student, &request.acting_admin) {
        Ok(()) => {
            let payload = json!({ "message": "Student profile has been unfrozen." });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ProfileServiceError::StudentNotFound(_)) => {
            let payload = json!({ "message": "Student not found." });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "message": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn lock_handler<S>(
    State(service): State<Arc<ProfileStateService<S>>>,
    Path(student_id): Path<String>,
    axum::Json(request): axum::Json<SingleActionRequest>,
) -> Response
where
    S: StudentStore + 'static,
{
    let student = StudentId(student_id);
    match service.lock_student(&student, &request.acting_admin) {
        Ok(()) => {
            let payload = json!({ "message": "Student profile has been locked." });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "message": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn unlock_handler<S>(
    State(service): State<Arc<ProfileStateService<S>>>,
    Path(student_id): Path<String>,
    axum::Json(request): axum::Json<SingleActionRequest>,
) -> Response
where
    S: StudentStore + 'static,
{
    let student = StudentId(student_id);
    match service.unlock_student(&student, &request.acting_admin) {
        Ok(()) => {
            let payload = json!({ "message": "Student profile has been unlocked." });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "message": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
