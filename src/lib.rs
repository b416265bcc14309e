//! Librarium Library Catalog Server
//!
//! A Rust REST API server exposing a catalog of authors and their books,
//! with field shaping, sortable property mapping and paged collections.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;
pub mod shaping;
pub mod sorting;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
