use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};

use crate::app::AppState;
use crate::database::Employee;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /employee - List all employees in creation order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    let employees = state.employees.list_employees().await?;
    Ok(ApiResponse::success(employees))
}

/// POST /employee - Create an employee; the id is assigned by storage
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult<Employee> {
    let Json(employee) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let created = state.employees.create_employee(employee).await?;
    Ok(ApiResponse::success(created))
}

/// PUT /employee - Update the employee identified by the body's id
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult<Employee> {
    let Json(employee) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let updated = state.employees.update_employee(employee).await?;
    Ok(ApiResponse::success(updated))
}
