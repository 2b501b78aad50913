use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use hrdesk_core::staff::{validate_new_vacation, NewVacation, Vacation, VacationRequest};
use hrdesk_core::storage::{Page, RepositoryError, VacationFilter};

use crate::{handlers::AppError, state::AppState};

/// Query parameters for the approval endpoint.
#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    pub approved: bool,
}

/// List vacations, optionally filtered by approval (GET /api/vacations).
pub async fn list_vacations(
    State(state): State<AppState>,
    Query(filter): Query<VacationFilter>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Vacation>>, AppError> {
    let vacations = state.vacations.list_vacations(filter, page).await?;
    Ok(Json(vacations))
}

/// List vacations awaiting a decision (GET /api/vacations/pending).
pub async fn list_pending_vacations(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Vacation>>, AppError> {
    let vacations = state.vacations.list_pending_vacations(page).await?;
    Ok(Json(vacations))
}

/// Get a single vacation (GET /api/vacations/{id}).
pub async fn get_vacation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vacation>, AppError> {
    let vacation = state
        .vacations
        .get_vacation(id)
        .await?
        .ok_or_else(|| RepositoryError::vacation_not_found(id))?;
    Ok(Json(vacation))
}

/// Create a vacation with any approval state (POST /api/vacations).
pub async fn create_vacation(
    State(state): State<AppState>,
    Json(payload): Json<NewVacation>,
) -> Result<impl IntoResponse, AppError> {
    store_vacation(&state, payload).await
}

/// Request time off; the vacation starts pending (POST /api/vacations/requests).
pub async fn request_vacation(
    State(state): State<AppState>,
    Json(payload): Json<VacationRequest>,
) -> Result<impl IntoResponse, AppError> {
    store_vacation(&state, NewVacation::from(payload)).await
}

async fn store_vacation(
    state: &AppState,
    payload: NewVacation,
) -> Result<(StatusCode, Json<Vacation>), AppError> {
    validate_new_vacation(&payload)?;

    let vacation = state.vacations.create_vacation(&payload).await?;

    tracing::info!(
        vacation_id = vacation.id,
        employee_id = vacation.employee_id,
        status = ?vacation.status(),
        "Created vacation"
    );

    Ok((StatusCode::CREATED, Json(vacation)))
}

/// Approve or reject a vacation (PUT /api/vacations/{id}/approval?approved=bool).
pub async fn set_vacation_approval(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ApprovalQuery>,
) -> Result<Json<Vacation>, AppError> {
    let vacation = state
        .vacations
        .set_vacation_approval(id, query.approved)
        .await?;

    tracing::info!(vacation_id = id, approved = query.approved, "Decided vacation");

    Ok(Json(vacation))
}

/// Delete a vacation (DELETE /api/vacations/{id}).
pub async fn delete_vacation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.vacations.delete_vacation(id).await?;

    tracing::info!(vacation_id = id, "Deleted vacation");

    Ok(StatusCode::NO_CONTENT)
}
