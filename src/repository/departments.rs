//! Departments repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::department::Department,
};

#[derive(Clone)]
pub struct DepartmentsRepository {
    pool: Pool<Postgres>,
}

impl DepartmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all departments
    pub async fn list(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, Department>(
            "SELECT id, name, address, kind FROM departments ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get department by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "SELECT id, name, address, kind FROM departments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    /// Count all departments
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
