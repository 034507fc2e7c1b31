//! Values bound to the view

use serde::Serialize;

use super::{ErrorPayload, Project, User};

/// Controller-owned bindings rendered by the view
///
/// `error` is a single slot shared by every request; the latest failure
/// wins. `selected_project` is the only inbound binding. A user that was
/// never loaded is omitted when serialized; a logged-out user is `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub projects: Vec<Project>,
    pub error: Option<ErrorPayload>,
    pub selected_project: Option<Project>,
}

impl ViewState {
    /// Whether a non-empty user is bound
    pub fn is_signed_in(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.is_empty())
    }

    pub fn find_project(&self, key: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.matches(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_state_is_blank() {
        let state = ViewState::default();
        assert!(!state.is_signed_in());
        assert!(state.projects.is_empty());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_empty_user_is_not_signed_in() {
        let state = ViewState {
            user: Some(User::empty()),
            ..Default::default()
        };
        assert!(!state.is_signed_in());
    }

    #[test]
    fn test_find_project() {
        let state = ViewState {
            projects: vec![
                Project::new(json!({"projectId": "a", "name": "Alpha"})),
                Project::new(json!({"projectId": "b", "name": "Beta"})),
            ],
            ..Default::default()
        };
        assert_eq!(state.find_project("Beta").and_then(|p| p.id()), Some("b".to_string()));
        assert!(state.find_project("gamma").is_none());
    }

    #[test]
    fn test_unloaded_and_logged_out_users_serialize_differently() {
        let unloaded = serde_json::to_value(ViewState::default()).unwrap();
        assert!(unloaded.get("user").is_none());

        let logged_out = serde_json::to_value(ViewState {
            user: Some(User::empty()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(logged_out.get("user"), Some(&serde_json::Value::Null));
    }
}
