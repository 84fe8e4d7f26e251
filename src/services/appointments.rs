//! Appointment booking service: availability resolution, validation and
//! creation

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    booking::WorkingHours,
    error::{AppError, AppResult},
    models::appointment::{Appointment, AppointmentDetails, CreateAppointment},
    repository::Repository,
};

#[derive(Clone)]
pub struct AppointmentsService {
    repository: Repository,
    working_hours: WorkingHours,
}

impl AppointmentsService {
    pub fn new(repository: Repository, working_hours: WorkingHours) -> Self {
        Self {
            repository,
            working_hours,
        }
    }

    /// Get appointment by ID with department details joined in
    pub async fn get_by_id(&self, id: i32) -> AppResult<AppointmentDetails> {
        self.repository.appointments.get_by_id(id).await
    }

    /// Free slots for a department on a given date: the full working-day
    /// sequence minus the actively booked instants.
    ///
    /// A read-only projection with no freshness guarantee; a slot reported
    /// free here may still be taken by a concurrent booking, in which case
    /// the booking call fails with a conflict.
    pub async fn available_slots(
        &self,
        department_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<NaiveDateTime>> {
        // Unknown departments get NotFound rather than an empty day
        self.repository.departments.get_by_id(department_id).await?;

        let booked = self
            .repository
            .appointments
            .booked_slots_for_date(department_id, date)
            .await?;

        Ok(self
            .working_hours
            .slots_for_date(date)
            .into_iter()
            .filter(|slot| !booked.contains(slot))
            .collect())
    }

    /// Validate and create an appointment.
    ///
    /// Validation happens entirely before the write attempt, in order:
    /// department existence, working-hour and grid membership, IIN shape,
    /// service catalogue membership, then the fail-fast slot pre-check.
    /// The storage unique constraint remains the authoritative guard
    /// against concurrent bookings of the same slot.
    pub async fn create(&self, data: CreateAppointment) -> AppResult<Appointment> {
        let department = self
            .repository
            .departments
            .get_by_id(data.department_id)
            .await?;

        if !self.working_hours.is_bookable(data.time_slot) {
            return Err(AppError::Validation(format!(
                "Slot {} is outside working hours ({}:00-{}:00) or off the {}-minute grid",
                data.time_slot,
                self.working_hours.opening_hour,
                self.working_hours.closing_hour,
                self.working_hours.slot_minutes,
            )));
        }

        if !data.iin_is_valid() {
            return Err(AppError::Validation(
                "IIN must be exactly 12 decimal digits".to_string(),
            ));
        }

        if !department.kind.offers(&data.service) {
            return Err(AppError::InvalidService(format!(
                "Service '{}' is not offered at {} branches",
                data.service, department.kind,
            )));
        }

        if self
            .repository
            .appointments
            .slot_is_taken(data.department_id, data.time_slot)
            .await?
        {
            return Err(AppError::Conflict(
                "This time slot is already booked".to_string(),
            ));
        }

        let appointment = self.repository.appointments.create(&data).await?;

        tracing::info!(
            appointment_id = appointment.id,
            department_id = appointment.department_id,
            slot = %appointment.time_slot,
            "Appointment booked"
        );

        Ok(appointment)
    }

    /// Cancel an active appointment, freeing its slot for rebooking
    pub async fn cancel(&self, id: i32) -> AppResult<Appointment> {
        let appointment = self.repository.appointments.cancel(id).await?;

        tracing::info!(
            appointment_id = appointment.id,
            department_id = appointment.department_id,
            slot = %appointment.time_slot,
            "Appointment cancelled"
        );

        Ok(appointment)
    }

    /// List all appointments with department details (administrator view)
    pub async fn list_all(&self) -> AppResult<Vec<AppointmentDetails>> {
        self.repository.appointments.list_all().await
    }
}
