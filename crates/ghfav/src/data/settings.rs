//! Application settings management
//!
//! User preferences for the lookup client and storage location.

use crate::config::network::{
    CONNECT_TIMEOUT_SECS, GITHUB_API_DEFAULT, MAX_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS,
};
use crate::data::storage;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings data file name
const SETTINGS_FILE: &str = "settings.json";

/// Settings file format version for migrations
const SETTINGS_VERSION: u32 = 1;

/// Environment variable consulted when no token is configured
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    // === Lookup ===
    /// GitHub REST API root
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Personal access token (raises the anonymous rate limit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    // === Storage ===
    /// Where favorites are kept (defaults to the config directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    // === UI ===
    /// Ask before removing a favorite in the interactive view
    #[serde(default)]
    pub confirm_remove: bool,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_api_base_url() -> String {
    GITHUB_API_DEFAULT.to_string()
}

fn default_connect_timeout() -> u64 {
    CONNECT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    REQUEST_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            api_base_url: default_api_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            token: None,
            data_dir: None,
            confirm_remove: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from default storage location
    pub fn load() -> Result<Self> {
        Self::load_from(&storage::data_path(SETTINGS_FILE)?)
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields defaults. Loaded values are validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = storage::load_from::<Settings>(path)?.unwrap_or_default();
        settings.validate();
        Ok(settings)
    }

    /// Clamp out-of-range values and tidy strings
    pub fn validate(&mut self) {
        self.connect_timeout_secs = self.connect_timeout_secs.clamp(1, MAX_TIMEOUT_SECS);
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, MAX_TIMEOUT_SECS);

        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            default_api_base_url()
        } else {
            trimmed.to_string()
        };

        if self.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.token = None;
        }
    }

    /// Configured token, falling back to `GITHUB_TOKEN`
    pub fn effective_token(&self) -> Option<String> {
        self.token.clone().or_else(|| {
            std::env::var(TOKEN_ENV)
                .ok()
                .filter(|t| !t.trim().is_empty())
        })
    }

    /// Directory holding the favorites file
    pub fn favorites_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => storage::config_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("ghfav_settings_test_{}.json", id))
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "https://api.github.com");
        assert_eq!(settings.connect_timeout_secs, 10);
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(settings.token.is_none());
        assert!(settings.data_dir.is_none());
        assert!(!settings.confirm_remove);
    }

    #[test]
    fn test_validate_clamps_timeouts() {
        let mut settings = Settings::new();
        settings.connect_timeout_secs = 0;
        settings.request_timeout_secs = 100_000;
        settings.validate();

        assert_eq!(settings.connect_timeout_secs, 1);
        assert_eq!(settings.request_timeout_secs, MAX_TIMEOUT_SECS);
    }

    #[test]
    fn test_validate_tidies_url_and_token() {
        let mut settings = Settings::new();
        settings.api_base_url = " http://localhost:8080/ ".to_string();
        settings.token = Some("   ".to_string());
        settings.validate();

        assert_eq!(settings.api_base_url, "http://localhost:8080");
        assert!(settings.token.is_none());

        settings.api_base_url = "/".to_string();
        settings.validate();
        assert_eq!(settings.api_base_url, "https://api.github.com");
    }

    #[test]
    fn test_configured_token_wins() {
        let mut settings = Settings::new();
        settings.token = Some("abc".to_string());
        assert_eq!(settings.effective_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_favorites_dir_override() {
        let mut settings = Settings::new();
        settings.data_dir = Some(PathBuf::from("/tmp/ghfav-data"));
        assert_eq!(settings.favorites_dir().unwrap(), PathBuf::from("/tmp/ghfav-data"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path();

        let mut settings = Settings::new();
        settings.api_base_url = "http://127.0.0.1:9000".to_string();
        settings.request_timeout_secs = 5;
        settings.token = Some("secret".to_string());
        settings.data_dir = Some(PathBuf::from("/var/lib/ghfav"));
        settings.confirm_remove = true;
        storage::save_to(&path, &settings).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let path = temp_path();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path();
        fs::write(&path, r#"{"request_timeout_secs": 0}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.request_timeout_secs, 1);
        assert_eq!(settings.api_base_url, "https://api.github.com");
        assert_eq!(settings.version, 1);

        let _ = fs::remove_file(&path);
    }
}
