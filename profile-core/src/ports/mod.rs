//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The controller
//! depends only on these traits, not on concrete implementations.

mod profile_backend;

pub use profile_backend::{BackendResult, ProfileBackend};
