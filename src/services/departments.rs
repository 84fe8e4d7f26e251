//! Departments service

use crate::{error::AppResult, models::department::Department, repository::Repository};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
}

impl DepartmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all departments
    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.repository.departments.list().await
    }

    /// Get department by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Department> {
        self.repository.departments.get_by_id(id).await
    }

    /// Service catalogue for a department, decided by its kind
    pub async fn services_for(&self, id: i32) -> AppResult<Vec<String>> {
        let department = self.repository.departments.get_by_id(id).await?;
        Ok(department
            .kind
            .services()
            .iter()
            .map(|s| s.to_string())
            .collect())
    }
}
