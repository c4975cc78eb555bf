//! Lookup response types

use crate::data::types::UserRecord;
use serde::{Deserialize, Serialize};

/// A GitHub user profile as returned by `GET /users/{login}`
///
/// Only the fields the app shows are decoded; GitHub sends `null` for an
/// unset name or bio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
}

impl GithubProfile {
    /// Profile with only a login set
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: None,
            bio: None,
            avatar_url: String::new(),
            html_url: String::new(),
            public_repos: 0,
            followers: 0,
            following: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = avatar_url.into();
        self
    }
}

impl From<GithubProfile> for UserRecord {
    fn from(profile: GithubProfile) -> Self {
        UserRecord::new(profile.name.unwrap_or_default(), profile.login)
            .with_bio(profile.bio.unwrap_or_default())
            .with_avatar(profile.avatar_url)
    }
}
