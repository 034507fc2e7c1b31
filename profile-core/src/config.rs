//! Configuration management
//!
//! Settings live in settings.json inside the profile directory:
//! ```json
//! {
//!   "backend": { "baseUrl": "http://localhost:8080" }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::result::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::http::validate_base_url;

/// Backend used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the stored backend URL
pub const BACKEND_URL_ENV: &str = "PROFILE_BACKEND_URL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    backend: BackendSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Where a configured value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Default,
    Settings,
    Env,
}

/// Effective configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub base_url_source: Source,
    // Value stored in settings.json, kept separate from env overrides
    stored_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_url_source: Source::Default,
            stored_base_url: None,
        }
    }
}

impl Config {
    /// Load config from the profile directory
    ///
    /// A malformed settings file falls back to defaults;
    /// `PROFILE_BACKEND_URL` wins over the stored URL.
    pub fn load(profile_dir: &Path) -> Result<Self> {
        let raw = read_settings(profile_dir)?;
        let env_url = std::env::var(BACKEND_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        Ok(Self::resolve(raw.backend.base_url, env_url))
    }

    fn resolve(stored: Option<String>, env_url: Option<String>) -> Self {
        let (base_url, base_url_source) = match (&env_url, &stored) {
            (Some(url), _) => (url.clone(), Source::Env),
            (None, Some(url)) => (url.clone(), Source::Settings),
            (None, None) => (DEFAULT_BASE_URL.to_string(), Source::Default),
        };

        Self {
            base_url,
            base_url_source,
            stored_base_url: stored,
        }
    }

    /// Save the stored backend URL, leaving other settings untouched
    pub fn save(&self, profile_dir: &Path) -> Result<()> {
        let settings_path = profile_dir.join("settings.json");

        let mut settings = read_settings(profile_dir)?;
        settings.backend.base_url = self.stored_base_url.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Validate and store a new backend URL
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = validate_base_url(url)?;
        self.stored_base_url = Some(url.clone());
        if self.base_url_source != Source::Env {
            self.base_url = url;
            self.base_url_source = Source::Settings;
        }
        Ok(())
    }

    pub fn stored_base_url(&self) -> Option<&str> {
        self.stored_base_url.as_deref()
    }
}

fn read_settings(profile_dir: &Path) -> Result<SettingsFile> {
    let settings_path = profile_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings() {
        let config = Config::resolve(None, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.base_url_source, Source::Default);
    }

    #[test]
    fn test_env_overrides_settings() {
        let config = Config::resolve(
            Some("http://stored:1".to_string()),
            Some("http://env:2".to_string()),
        );
        assert_eq!(config.base_url, "http://env:2");
        assert_eq!(config.base_url_source, Source::Env);
        assert_eq!(config.stored_base_url(), Some("http://stored:1"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.set_base_url("https://api.example.com/").unwrap();
        config.save(dir.path()).unwrap();

        let raw = read_settings(dir.path()).unwrap();
        assert_eq!(raw.backend.base_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"theme": "dark", "backend": {"baseUrl": "http://old", "proxy": "none"}}"#,
        )
        .unwrap();

        let mut config = Config::resolve(read_settings(dir.path()).unwrap().backend.base_url, None);
        config.set_base_url("http://new:9000").unwrap();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["backend"]["proxy"], "none");
        assert_eq!(saved["backend"]["baseUrl"], "http://new:9000");
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();

        let raw = read_settings(dir.path()).unwrap();
        assert!(raw.backend.base_url.is_none());
    }

    #[test]
    fn test_set_base_url_rejects_bad_scheme() {
        let mut config = Config::default();
        assert!(config.set_base_url("file:///etc/passwd").is_err());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_set_base_url_does_not_mask_env() {
        let mut config = Config::resolve(None, Some("http://env:2".to_string()));
        config.set_base_url("http://stored:1").unwrap();
        assert_eq!(config.base_url, "http://env:2");
        assert_eq!(config.stored_base_url(), Some("http://stored:1"));
    }
}
