//! Appointment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::appointment::{Appointment, AppointmentDetails, CreateAppointment},
};

/// Create a new appointment
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "appointments",
    request_body = CreateAppointment,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Slot off the grid, outside working hours or malformed IIN"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Slot already booked"),
        (status = 422, description = "Service not offered by the branch kind")
    )
)]
pub async fn create_appointment(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateAppointment>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let appointment = state.services.appointments.create(request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Get appointment by ID
#[utoipa::path(
    get,
    path = "/appointments/{id}",
    tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment with department details", body = AppointmentDetails),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn get_appointment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AppointmentDetails>> {
    let appointment = state.services.appointments.get_by_id(id).await?;
    Ok(Json(appointment))
}

/// Cancel an appointment, freeing its slot for rebooking
#[utoipa::path(
    post,
    path = "/appointments/{id}/cancel",
    tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = Appointment),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Already cancelled")
    )
)]
pub async fn cancel_appointment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Appointment>> {
    let appointment = state.services.appointments.cancel(id).await?;
    Ok(Json(appointment))
}
