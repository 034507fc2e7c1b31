//! Core domain values
//!
//! Everything the backend returns stays opaque JSON; these wrappers only
//! give it names and a few display helpers. No I/O happens here.

mod error_payload;
mod project;
mod user;
mod view_state;
pub mod result;

pub use error_payload::ErrorPayload;
pub use project::Project;
pub use user::User;
pub use view_state::ViewState;
