//! Service layer
//!
//! The profile controller drives the backend port; the logging service
//! keeps the local event history.

pub mod events;
pub mod logging;
mod profile;

pub use logging::{EntryFilter, EntryPoint, LogEntry, LogEvent, LoggingService};
pub use profile::{ActivationOutcome, LoadOutcome, LogoutOutcome, ProfileController};
