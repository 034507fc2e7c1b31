//! Profile controller - binds the user, their projects and errors for a view
//!
//! Activation loads `/user` and, only if that succeeds, `/project`. Every
//! failure lands in the single error slot. Logout clears the user on success
//! and leaves the state alone on failure.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{ErrorPayload, Project, User, ViewState};
use crate::ports::ProfileBackend;

/// What `activate` ended up doing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationOutcome {
    /// User and projects are bound
    Ready,
    /// `/user` failed; `/project` was not requested
    UserLoadFailed,
    /// User is bound but `/project` failed
    ProjectsLoadFailed,
}

/// Result of `load_projects`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded { count: usize },
    Failed,
}

/// Result of `logout`
///
/// A failed logout is not bound to the error slot, so the payload is handed
/// back here for the caller to report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutOutcome {
    LoggedOut,
    Failed(ErrorPayload),
}

/// Controller owning the view bindings
pub struct ProfileController<B: ProfileBackend> {
    backend: Arc<B>,
    state: ViewState,
}

impl<B: ProfileBackend> ProfileController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: ViewState::default(),
        }
    }

    /// Current bindings
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Load the current user, then their projects
    pub async fn activate(&mut self) -> ActivationOutcome {
        tracing::debug!(backend = self.backend.name(), "activating profile controller");

        match self.backend.fetch_user().await {
            Ok(user) => {
                tracing::info!("user loaded");
                self.state.user = Some(user);
                match self.load_projects().await {
                    LoadOutcome::Loaded { .. } => ActivationOutcome::Ready,
                    LoadOutcome::Failed => ActivationOutcome::ProjectsLoadFailed,
                }
            }
            Err(payload) => {
                tracing::warn!(error = %payload, "failed to load user");
                self.state.error = Some(payload);
                ActivationOutcome::UserLoadFailed
            }
        }
    }

    /// Fetch the project list into the list binding
    pub async fn load_projects(&mut self) -> LoadOutcome {
        match self.backend.fetch_projects().await {
            Ok(projects) => {
                let count = projects.len();
                tracing::info!(count, "projects loaded");
                self.state.projects = projects;
                LoadOutcome::Loaded { count }
            }
            Err(payload) => {
                tracing::warn!(error = %payload, "failed to load projects");
                self.state.error = Some(payload);
                LoadOutcome::Failed
            }
        }
    }

    /// End the backend session and clear the bound user
    pub async fn logout(&mut self) -> LogoutOutcome {
        match self.backend.logout().await {
            Ok(()) => {
                tracing::info!("logged out");
                self.state.user = Some(User::empty());
                LogoutOutcome::LoggedOut
            }
            Err(payload) => {
                tracing::warn!(error = %payload, "logout failed");
                LogoutOutcome::Failed(payload)
            }
        }
    }

    /// Inbound binding from the view: store the selection and report it
    pub fn select_project(&mut self, project: Option<Project>) -> Option<&Project> {
        self.state.selected_project = project;
        self.project_changed()
    }

    /// Emit the currently selected project as diagnostic output
    ///
    /// Never touches the backend.
    pub fn project_changed(&self) -> Option<&Project> {
        match &self.state.selected_project {
            Some(project) => tracing::info!(project = %project.raw(), "project changed"),
            None => tracing::info!("project changed: none selected"),
        }
        self.state.selected_project.as_ref()
    }
}
