//! Profile Core - user profile and project bindings over a REST backend
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Opaque backend values (User, Project, ErrorPayload) and the view bindings
//! - **ports**: Trait definitions for external dependencies (ProfileBackend)
//! - **services**: The profile controller and the local event log
//! - **adapters**: Concrete implementations (reqwest HTTP backend)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use domain::result::Result;

use adapters::http::HttpProfileBackend;
use config::Config;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{ErrorPayload, Project, User, ViewState};
pub use services::{
    ActivationOutcome, EntryFilter, EntryPoint, LoadOutcome, LogEvent, LoggingService,
    LogoutOutcome, ProfileController,
};

/// Main context for profile operations
///
/// Holds the effective configuration and a controller wired to the
/// configured HTTP backend.
pub struct ProfileContext {
    pub config: Config,
    pub controller: ProfileController<HttpProfileBackend>,
}

impl ProfileContext {
    /// Create a context from the settings in `profile_dir`
    pub fn new(profile_dir: &Path) -> Result<Self> {
        let config = Config::load(profile_dir)?;
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let backend = HttpProfileBackend::new(&config.base_url)?;
        let controller = ProfileController::new(Arc::new(backend));

        Ok(Self { config, controller })
    }
}
