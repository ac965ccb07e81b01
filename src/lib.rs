//! Bookshelf
//!
//! A small REST JSON API over PostgreSQL managing books and the users
//! that reference them.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod migration;
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
