//! Repository layer for database operations

pub mod appointments;
pub mod departments;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub departments: departments::DepartmentsRepository,
    pub appointments: appointments::AppointmentsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            departments: departments::DepartmentsRepository::new(pool.clone()),
            appointments: appointments::AppointmentsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip a trivial query, used by the readiness probe
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
