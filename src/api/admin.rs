//! Administrator-only endpoints: appointment listing, statistics and the
//! tabular report export

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    models::appointment::AppointmentDetails,
    services::stats::Statistics,
};

use super::AuthenticatedAdmin;

/// List all appointments with department details
#[utoipa::path(
    get,
    path = "/admin/appointments",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All appointments", body = Vec<AppointmentDetails>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_appointments(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
) -> AppResult<Json<Vec<AppointmentDetails>>> {
    let appointments = state.services.appointments.list_all().await?;
    Ok(Json(appointments))
}

/// Booking statistics overview
#[utoipa::path(
    get,
    path = "/admin/statistics",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregated statistics", body = Statistics),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_statistics(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
) -> AppResult<Json<Statistics>> {
    let statistics = state.services.stats.overview().await?;
    Ok(Json(statistics))
}

/// Export all appointments as a CSV report
#[utoipa::path(
    get,
    path = "/admin/reports/appointments.csv",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV report", body = String, content_type = "text/csv"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn export_appointments(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
) -> AppResult<impl IntoResponse> {
    let csv = state.services.reports.appointments_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"appointments.csv\"",
            ),
        ],
        csv,
    ))
}
