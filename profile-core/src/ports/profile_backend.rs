//! Profile backend port
//!
//! Defines the three endpoints the controller talks to. The controller only
//! sees this trait; the HTTP adapter and test fakes implement it.

use async_trait::async_trait;

use crate::domain::{ErrorPayload, Project, User};

/// Outcome of a single backend call
pub type BackendResult<T> = std::result::Result<T, ErrorPayload>;

/// Backend serving the current user, their projects and logout
///
/// Failures come back as [`ErrorPayload`] and are never classified;
/// implementations must not retry.
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    /// Backend name for logs (e.g., "http")
    fn name(&self) -> &str;

    /// `GET /user`
    async fn fetch_user(&self) -> BackendResult<User>;

    /// `GET /project`
    async fn fetch_projects(&self) -> BackendResult<Vec<Project>>;

    /// `POST /logout`
    async fn logout(&self) -> BackendResult<()>;
}
