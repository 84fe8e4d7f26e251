//! Data models for the TSON server

pub mod appointment;
pub mod department;

// Re-export commonly used types
pub use appointment::{Appointment, AppointmentDetails, AppointmentStatus, CreateAppointment};
pub use department::{Department, DepartmentKind};
