//! Event log entries for controller outcomes
//!
//! Events carry the endpoint and an error summary, never the user or
//! project payloads.

use crate::adapters::http::{LOGOUT_PATH, PROJECT_PATH, USER_PATH};
use crate::domain::ViewState;

use super::logging::LogEvent;
use super::profile::{ActivationOutcome, LogoutOutcome};

/// Events describing what `activate` did, in request order
pub fn activation_events(
    outcome: &ActivationOutcome,
    state: &ViewState,
    command: &str,
) -> Vec<LogEvent> {
    let error = state.error.as_ref().map(|e| e.summary()).unwrap_or_default();
    let user_loaded = || {
        LogEvent::new("user_loaded")
            .with_endpoint(USER_PATH)
            .with_command(command)
    };

    match outcome {
        ActivationOutcome::Ready => vec![
            user_loaded(),
            LogEvent::new("projects_loaded").with_endpoint(PROJECT_PATH).with_command(command),
        ],
        ActivationOutcome::UserLoadFailed => vec![LogEvent::new("user_load_failed")
            .with_endpoint(USER_PATH)
            .with_command(command)
            .with_error(error)],
        ActivationOutcome::ProjectsLoadFailed => vec![
            user_loaded(),
            LogEvent::new("projects_load_failed")
                .with_endpoint(PROJECT_PATH)
                .with_command(command)
                .with_error(error),
        ],
    }
}

pub fn logout_event(outcome: &LogoutOutcome, command: &str) -> LogEvent {
    match outcome {
        LogoutOutcome::LoggedOut => LogEvent::new("logout_completed"),
        LogoutOutcome::Failed(payload) => {
            LogEvent::new("logout_failed").with_error(payload.summary())
        }
    }
    .with_endpoint(LOGOUT_PATH)
    .with_command(command)
}

pub fn project_changed_event(command: &str) -> LogEvent {
    LogEvent::new("project_changed").with_command(command)
}
