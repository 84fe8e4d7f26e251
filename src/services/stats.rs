//! Statistics service: read-only aggregations over appointments and
//! departments

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

/// One-hour-equivalent slots assumed bookable per department per day when
/// computing the load percentage
const DAILY_CAPACITY_PER_DEPARTMENT: i64 = 8;

/// Per-department appointment count
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentStat {
    pub department_id: i32,
    pub department_name: String,
    pub appointments: i64,
}

/// Aggregated booking statistics
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Statistics {
    /// All appointments ever created, any status
    pub total_appointments: i64,
    /// Appointments currently active
    pub active_appointments: i64,
    /// Active appointments with a slot on the current civil day
    pub appointments_today: i64,
    /// Active appointments with a slot on the previous civil day
    pub appointments_yesterday: i64,
    /// Today's active appointments relative to the assumed daily capacity
    /// (departments x 8), in percent
    pub load_percentage: f64,
    /// Active appointment counts per department
    pub by_department: Vec<DepartmentStat>,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Compute the overview statistics as of the current local day
    pub async fn overview(&self) -> AppResult<Statistics> {
        self.overview_for_date(Local::now().date_naive()).await
    }

    /// Compute the overview statistics relative to a reference day
    pub async fn overview_for_date(&self, today: NaiveDate) -> AppResult<Statistics> {
        let yesterday = today - Duration::days(1);

        let total_appointments = self.repository.appointments.count_total().await?;
        let active_appointments = self.repository.appointments.count_active().await?;
        let appointments_today = self
            .repository
            .appointments
            .count_active_for_date(today)
            .await?;
        let appointments_yesterday = self
            .repository
            .appointments
            .count_active_for_date(yesterday)
            .await?;

        let departments = self.repository.departments.count().await?;
        let load_percentage = load_percentage(appointments_today, departments);

        let by_department = self
            .repository
            .appointments
            .count_by_department()
            .await?
            .into_iter()
            .map(|row| DepartmentStat {
                department_id: row.department_id,
                department_name: row.department_name,
                appointments: row.count,
            })
            .collect();

        Ok(Statistics {
            total_appointments,
            active_appointments,
            appointments_today,
            appointments_yesterday,
            load_percentage,
            by_department,
        })
    }
}

/// Today's bookings against the assumed capacity of
/// `departments x 8` one-hour-equivalent slots
fn load_percentage(appointments_today: i64, departments: i64) -> f64 {
    let capacity = departments * DAILY_CAPACITY_PER_DEPARTMENT;
    if capacity == 0 {
        return 0.0;
    }
    appointments_today as f64 / capacity as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_percentage() {
        // 5 departments x 8 = 40 slot capacity
        assert_eq!(load_percentage(20, 5), 50.0);
        assert_eq!(load_percentage(40, 5), 100.0);
        assert_eq!(load_percentage(0, 5), 0.0);
    }

    #[test]
    fn test_load_percentage_no_departments() {
        assert_eq!(load_percentage(10, 0), 0.0);
    }
}
