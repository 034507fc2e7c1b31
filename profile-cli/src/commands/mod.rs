//! CLI command implementations

pub mod config;
pub mod logout;
pub mod logs;
pub mod select;
pub mod show;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use profile_core::services::events::activation_events;
use profile_core::{ActivationOutcome, EntryPoint, LogEvent, LoggingService, ProfileContext};

/// Get the event log for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let profile_dir = get_profile_dir().ok()?;
    std::fs::create_dir_all(&profile_dir).ok()?;
    LoggingService::new(&profile_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Write events, ignoring any errors (logging should never break the app)
pub fn log_events(logger: &Option<LoggingService>, events: impl IntoIterator<Item = LogEvent>) {
    if let Some(l) = logger {
        if let Err(e) = l.log_all(events) {
            tracing::debug!(error = %e, "failed to write event log");
        }
    }
}

/// Activate the controller and record what happened
pub fn activate(ctx: &mut ProfileContext, command: &str) -> Result<ActivationOutcome> {
    let outcome = block_on(ctx.controller.activate())?;
    let events = activation_events(&outcome, ctx.controller.state(), command);
    log_events(&get_logger(), events);
    Ok(outcome)
}

/// Get the profile directory from environment or default
pub fn get_profile_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PROFILE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".profile-console"))
        .context("Could not find home directory; set PROFILE_DIR")
}

/// Build the profile context from the profile directory
pub fn get_context() -> Result<ProfileContext> {
    let profile_dir = get_profile_dir()?;

    std::fs::create_dir_all(&profile_dir)
        .with_context(|| format!("Failed to create profile directory: {:?}", profile_dir))?;

    ProfileContext::new(&profile_dir).context("Failed to initialize profile context")
}

/// Drive a controller future on a single-threaded runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
