//! Common data types for persistence
//!
//! Shared types used across the data module.

use serde::{Deserialize, Serialize};

/// Normalize a login for comparison
///
/// GitHub logins are case-insensitive, so `Octocat` and `octocat` name the
/// same account.
pub fn normalize_login(login: &str) -> String {
    login.trim().to_ascii_lowercase()
}

// =============================================================================
// UserRecord - A favorited GitHub profile
// =============================================================================

/// A favorited GitHub user
///
/// This is exactly what gets persisted under the favorites key, one JSON
/// object per user: `{ "name", "login", "bio", "avatar" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Display name (empty when the profile has none)
    #[serde(default)]
    pub name: String,
    /// GitHub login, the natural identifier
    pub login: String,
    /// Profile bio (empty when the profile has none)
    #[serde(default)]
    pub bio: String,
    /// Avatar image URL
    #[serde(default)]
    pub avatar: String,
}

impl UserRecord {
    /// Create a record with just a name and login
    pub fn new(name: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            login: login.into(),
            bio: String::new(),
            avatar: String::new(),
        }
    }

    /// Set bio
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Set avatar URL
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Whether this record belongs to `login` (case-insensitive)
    pub fn has_login(&self, login: &str) -> bool {
        normalize_login(&self.login) == normalize_login(login)
    }

    /// Name to show in lists and titles, falling back to the login
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.login
        } else {
            &self.name
        }
    }

    /// Public profile page
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.login)
    }
}
