//! TSON Appointment Booking Server
//!
//! A Rust REST API backend for online appointment booking at public
//! service center branches: branch and service listing, free-slot
//! computation, conflict-safe booking, and administrator statistics.

use std::sync::Arc;

pub mod api;
pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
