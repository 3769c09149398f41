//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer in [`crate::db::services`].

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Form, Json,
};

use super::dto::{
    AvailabilityEntry, CreateAvailabilityForm, DeleteConfirmation, HealthResponse, OnCallEntry,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{EntryId, NewAvailabilityEntry};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Where `GET /` sends the browser.
pub const INDEX_PATH: &str = "/static/index.html";

// =============================================================================
// Health Check & Frontend
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            "error".to_string()
        }
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: db_status,
    }))
}

/// GET /
///
/// Redirect to the frontend entry point with a 302.
pub async fn root_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, INDEX_PATH)])
}

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

// =============================================================================
// Availability
// =============================================================================

/// POST /api/availability
///
/// Create an entry from form fields `user_id`, `day` and `time_slot`.
pub async fn create_availability(
    State(state): State<AppState>,
    form: Result<Form<CreateAvailabilityForm>, FormRejection>,
) -> HandlerResult<AvailabilityEntry> {
    let Form(form) = form?;
    let entry = NewAvailabilityEntry::from(form);

    let created = db_services::create_entry(state.repository.as_ref(), &entry).await?;
    Ok(Json(created))
}

/// GET /api/availability/{user_id}
///
/// List a user's entries sorted by day, then time slot. Never 404s.
pub async fn get_user_availability(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<Vec<AvailabilityEntry>> {
    let entries = db_services::list_user_availability(state.repository.as_ref(), &user_id).await?;
    Ok(Json(entries))
}

/// GET /api/availability/{day}/{time_slot}
///
/// Who is on call for a shift. 404 "Shift is unoccupied" when nobody is.
pub async fn get_on_call(
    State(state): State<AppState>,
    Path((day, time_slot)): Path<(String, String)>,
) -> HandlerResult<Vec<OnCallEntry>> {
    let entries = db_services::find_on_call(state.repository.as_ref(), &day, &time_slot).await?;
    Ok(Json(entries.into_iter().map(OnCallEntry::from).collect()))
}

/// DELETE /api/availability/{entry_id}
///
/// Remove an entry by integer id. 404 "Shift not found" when it does not exist.
pub async fn delete_availability(
    State(state): State<AppState>,
    entry_id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<DeleteConfirmation> {
    let Path(entry_id) = entry_id?;
    let id = EntryId::new(entry_id);

    db_services::delete_entry(state.repository.as_ref(), id).await?;
    Ok(Json(DeleteConfirmation::deleted(id)))
}
