//! Libmini Library Management
//!
//! An in-process library catalog and loan engine: books, members, and the
//! borrow/return transitions that keep availability, member loans and the
//! loan register consistent.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared by every caller
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build a fresh, empty catalog and the services around it
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let repository = repository::Repository::new(&config.catalog);
        let services = services::Services::new(repository, &config)?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
