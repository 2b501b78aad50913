use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use hrdesk_core::staff::{
    validate_employee_update, validate_new_employee, Employee, EmployeeUpdate, NewEmployee,
    Vacation,
};
use hrdesk_core::storage::{Page, RepositoryError};

use crate::{handlers::AppError, state::AppState};

/// List employees one page at a time (GET /api/employees).
pub async fn list_employees(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.employees.list_employees(page).await?;
    Ok(Json(employees))
}

/// Create a new employee (POST /api/employees).
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<NewEmployee>,
) -> Result<impl IntoResponse, AppError> {
    validate_new_employee(&payload)?;

    let employee = state.employees.create_employee(&payload).await?;

    tracing::info!(employee_id = employee.id, name = %employee.name, "Created employee");

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Get a single employee with their vacations (GET /api/employees/{id}).
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, AppError> {
    let employee = state
        .employees
        .get_employee(id)
        .await?
        .ok_or_else(|| RepositoryError::employee_not_found(id))?;
    Ok(Json(employee))
}

/// Partially update an employee (PATCH /api/employees/{id}).
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> Result<Json<Employee>, AppError> {
    validate_employee_update(&payload)?;

    let employee = state.employees.update_employee(id, &payload).await?;

    tracing::info!(employee_id = id, "Updated employee");

    Ok(Json(employee))
}

/// Delete an employee (DELETE /api/employees/{id}).
///
/// Their vacations go with them.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.employees.delete_employee(id).await?;

    tracing::info!(employee_id = id, "Deleted employee and their vacations");

    Ok(StatusCode::NO_CONTENT)
}

/// List one employee's vacations (GET /api/employees/{id}/vacations).
pub async fn list_employee_vacations(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Vacation>>, AppError> {
    let vacations = state.employees.list_vacations_for_employee(id, page).await?;
    Ok(Json(vacations))
}
