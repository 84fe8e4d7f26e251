//! Department endpoints: branch listing, service catalogues and free slots

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::department::Department,
};

/// Query parameters for the free-slot listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotsQuery {
    /// Target date (YYYY-MM-DD)
    pub date: String,
}

/// List all departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "departments",
    responses(
        (status = 200, description = "Departments list", body = Vec<Department>)
    )
)]
pub async fn list_departments(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = state.services.departments.list().await?;
    Ok(Json(departments))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "departments",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Department>> {
    let department = state.services.departments.get_by_id(id).await?;
    Ok(Json(department))
}

/// List services offered by a department
#[utoipa::path(
    get,
    path = "/departments/{id}/services",
    tag = "departments",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Service catalogue for the branch kind", body = Vec<String>),
        (status = 404, description = "Department not found")
    )
)]
pub async fn list_services(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<String>>> {
    let services = state.services.departments.services_for(id).await?;
    Ok(Json(services))
}

/// List free slots for a department on a date
#[utoipa::path(
    get,
    path = "/departments/{id}/slots",
    tag = "departments",
    params(
        ("id" = i32, Path, description = "Department ID"),
        SlotsQuery
    ),
    responses(
        (status = 200, description = "Free slots, ascending", body = Vec<NaiveDateTime>),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn list_available_slots(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<SlotsQuery>,
) -> AppResult<Json<Vec<NaiveDateTime>>> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", query.date)))?;

    let slots = state.services.appointments.available_slots(id, date).await?;
    Ok(Json(slots))
}
