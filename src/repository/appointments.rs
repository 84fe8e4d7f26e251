//! Appointments repository for database operations

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::appointment::{Appointment, AppointmentDetails, CreateAppointment},
};

/// Count of appointments grouped by department
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DepartmentCount {
    pub department_id: i32,
    pub department_name: String,
    pub count: i64,
}

#[derive(Clone)]
pub struct AppointmentsRepository {
    pool: Pool<Postgres>,
}

impl AppointmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get appointment by ID with department details joined in
    pub async fn get_by_id(&self, id: i32) -> AppResult<AppointmentDetails> {
        sqlx::query_as::<_, AppointmentDetails>(
            r#"
            SELECT a.id, a.department_id, d.name AS department_name,
                   d.address AS department_address, a.time_slot, a.user_name,
                   a.phone_number, a.iin, a.service, a.status, a.created_at
            FROM appointments a
            JOIN departments d ON a.department_id = d.id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))
    }

    /// Slots actively booked for a department on a given civil day,
    /// i.e. time_slot within [date 00:00, date+1 00:00)
    pub async fn booked_slots_for_date(
        &self,
        department_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<NaiveDateTime>> {
        let start = date.and_time(NaiveTime::MIN);
        let end = start + Duration::days(1);

        let slots: Vec<NaiveDateTime> = sqlx::query_scalar(
            r#"
            SELECT time_slot FROM appointments
            WHERE department_id = $1
              AND status = 'active'
              AND time_slot >= $2
              AND time_slot < $3
            ORDER BY time_slot
            "#,
        )
        .bind(department_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    /// Fail-fast pre-check: is the slot already actively booked?
    ///
    /// Only an optimization; the partial unique index on
    /// (department_id, time_slot) is the authoritative guard.
    pub async fn slot_is_taken(
        &self,
        department_id: i32,
        time_slot: NaiveDateTime,
    ) -> AppResult<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM appointments
                WHERE department_id = $1 AND time_slot = $2 AND status = 'active'
            )
            "#,
        )
        .bind(department_id)
        .bind(time_slot)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    /// Insert a new appointment.
    ///
    /// A unique-constraint rejection means a concurrent writer won the race
    /// for the same slot; it is translated to `Conflict` rather than
    /// surfaced as a storage error.
    pub async fn create(&self, data: &CreateAppointment) -> AppResult<Appointment> {
        let result = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments
                (department_id, time_slot, user_name, phone_number, iin, service, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'active')
            RETURNING id, department_id, time_slot, user_name, phone_number,
                      iin, service, status, created_at
            "#,
        )
        .bind(data.department_id)
        .bind(data.time_slot)
        .bind(&data.user_name)
        .bind(&data.phone_number)
        .bind(&data.iin)
        .bind(&data.service)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(appointment) => Ok(appointment),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                "This time slot is already booked".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Cancel an active appointment; frees the slot for rebooking
    pub async fn cancel(&self, id: i32) -> AppResult<Appointment> {
        // Make sure the appointment exists so a cancelled one yields
        // Conflict rather than NotFound
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM appointments WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!("Appointment {} not found", id)));
        }

        sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments SET status = 'cancelled'
            WHERE id = $1 AND status = 'active'
            RETURNING id, department_id, time_slot, user_name, phone_number,
                      iin, service, status, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Appointment {} is already cancelled", id)))
    }

    /// List all appointments with department details, newest slot first
    pub async fn list_all(&self) -> AppResult<Vec<AppointmentDetails>> {
        let rows = sqlx::query_as::<_, AppointmentDetails>(
            r#"
            SELECT a.id, a.department_id, d.name AS department_name,
                   d.address AS department_address, a.time_slot, a.user_name,
                   a.phone_number, a.iin, a.service, a.status, a.created_at
            FROM appointments a
            JOIN departments d ON a.department_id = d.id
            ORDER BY a.time_slot DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count all appointments (any status)
    pub async fn count_total(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count active appointments
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count active appointments whose slot falls on a given civil day
    pub async fn count_active_for_date(&self, date: NaiveDate) -> AppResult<i64> {
        let start = date.and_time(NaiveTime::MIN);
        let end = start + Duration::days(1);

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM appointments
            WHERE status = 'active' AND time_slot >= $1 AND time_slot < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Active appointment counts grouped by department, including
    /// departments with no appointments
    pub async fn count_by_department(&self) -> AppResult<Vec<DepartmentCount>> {
        let rows = sqlx::query_as::<_, DepartmentCount>(
            r#"
            SELECT d.id AS department_id, d.name AS department_name,
                   COUNT(a.id) AS count
            FROM departments d
            LEFT JOIN appointments a
                   ON a.department_id = d.id AND a.status = 'active'
            GROUP BY d.id, d.name
            ORDER BY d.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
