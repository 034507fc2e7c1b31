//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the ProfileBackend port

pub mod http;

#[cfg(test)]
pub mod mock_backend;
