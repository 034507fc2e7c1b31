//! Project domain model

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One element of the `GET /project` list
///
/// Opaque like [`User`](super::User); the accessors only read well-known
/// keys for display and never reject a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project(JsonValue);

impl Project {
    pub fn new(raw: JsonValue) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &JsonValue {
        &self.0
    }

    /// Project identifier (`projectId`, falling back to `id`)
    pub fn id(&self) -> Option<String> {
        ["projectId", "id"]
            .iter()
            .find_map(|key| scalar_to_string(self.0.get(key)?))
    }

    pub fn name(&self) -> Option<String> {
        self.0.get("name").and_then(scalar_to_string)
    }

    /// Whether `key` names this project by id or by name
    pub fn matches(&self, key: &str) -> bool {
        self.id().as_deref() == Some(key) || self.name().as_deref() == Some(key)
    }

    /// Turn a `/project` response body into a list
    ///
    /// Arrays map element by element. Any other body is kept as a
    /// single project so nothing the backend sent is dropped.
    pub fn list_from_json(body: JsonValue) -> Vec<Project> {
        match body {
            JsonValue::Array(items) => items.into_iter().map(Project::new).collect(),
            JsonValue::Null => Vec::new(),
            other => vec![Project::new(other)],
        }
    }
}

impl From<JsonValue> for Project {
    fn from(raw: JsonValue) -> Self {
        Self::new(raw)
    }
}

fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
