//! User domain model

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The signed-in user as returned by `GET /user`
///
/// The backend owns the shape of this object, so the raw JSON is kept
/// untouched. A logged-out user is represented by JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(JsonValue);

impl User {
    pub fn new(raw: JsonValue) -> Self {
        Self(raw)
    }

    /// The value bound after a successful logout
    pub fn empty() -> Self {
        Self(JsonValue::Null)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }

    pub fn raw(&self) -> &JsonValue {
        &self.0
    }

    /// Best-effort display label: `name`, then `email`, then `id`
    pub fn display_name(&self) -> Option<String> {
        ["name", "email", "id"]
            .iter()
            .find_map(|key| match self.0.get(key)? {
                JsonValue::String(s) => Some(s.clone()),
                JsonValue::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

impl From<JsonValue> for User {
    fn from(raw: JsonValue) -> Self {
        Self::new(raw)
    }
}
