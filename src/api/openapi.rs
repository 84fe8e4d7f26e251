//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, appointments, auth, departments, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TSON API",
        version = "1.0.0",
        description = "Online appointment booking API for public service centers",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Departments
        departments::list_departments,
        departments::get_department,
        departments::list_services,
        departments::list_available_slots,
        // Appointments
        appointments::create_appointment,
        appointments::get_appointment,
        appointments::cancel_appointment,
        // Admin
        admin::list_appointments,
        admin::get_statistics,
        admin::export_appointments,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Departments
            crate::models::department::Department,
            crate::models::department::DepartmentKind,
            // Appointments
            crate::models::appointment::Appointment,
            crate::models::appointment::AppointmentDetails,
            crate::models::appointment::AppointmentStatus,
            crate::models::appointment::CreateAppointment,
            // Stats
            crate::services::stats::Statistics,
            crate::services::stats::DepartmentStat,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Administrator authentication"),
        (name = "departments", description = "Branches, service catalogues and free slots"),
        (name = "appointments", description = "Appointment booking"),
        (name = "admin", description = "Administrator statistics and reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
