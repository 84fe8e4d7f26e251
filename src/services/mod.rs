//! Business logic services

pub mod appointments;
pub mod auth;
pub mod departments;
pub mod reports;
pub mod stats;

use crate::{
    booking::WorkingHours,
    config::{AuthConfig, BookingConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub departments: departments::DepartmentsService,
    pub appointments: appointments::AppointmentsService,
    pub stats: stats::StatsService,
    pub reports: reports::ReportsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository and configuration
    pub fn new(repository: Repository, auth_config: AuthConfig, booking_config: &BookingConfig) -> Self {
        let working_hours = WorkingHours::from(booking_config);
        Self {
            auth: auth::AuthService::new(auth_config),
            departments: departments::DepartmentsService::new(repository.clone()),
            appointments: appointments::AppointmentsService::new(repository.clone(), working_hours),
            stats: stats::StatsService::new(repository.clone()),
            reports: reports::ReportsService::new(repository.clone()),
            repository,
        }
    }

    /// Verify the database answers queries
    pub async fn ping_database(&self) -> crate::AppResult<()> {
        self.repository.ping().await?;
        Ok(())
    }
}
