//! GitHub REST API lookup
//!
//! Implementation of `UserLookup` against `GET /users/{login}`
//! (<https://docs.github.com/rest/users/users>).

use crate::config::network::GITHUB_ACCEPT;
use crate::data::Settings;
use crate::error::{AppError, Result};
use crate::network::{ClientOptions, HttpClient};

use super::traits::UserLookup;
use super::types::GithubProfile;

/// Longest login GitHub accepts
const MAX_LOGIN_LEN: usize = 39;

/// Whether `login` could name a GitHub account
///
/// Anything else can't exist upstream, and must not be spliced into the
/// request path.
fn is_plausible_login(login: &str) -> bool {
    !login.is_empty()
        && login.len() <= MAX_LOGIN_LEN
        && !login.starts_with('-')
        && login
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// GitHub user lookup
pub struct GithubLookup {
    client: HttpClient,
    base_url: String,
}

impl GithubLookup {
    /// Create a lookup from user settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_base_url(
            settings.api_base_url.clone(),
            ClientOptions::from_settings(settings),
        )
    }

    /// Create a lookup with a custom base URL (for testing or GitHub Enterprise)
    pub fn with_base_url(base_url: impl Into<String>, options: ClientOptions) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: HttpClient::with_options(options.with_accept(GITHUB_ACCEPT))?,
            base_url,
        })
    }

    /// Full URL of a user resource
    fn user_url(&self, login: &str) -> String {
        format!("{}/users/{}", self.base_url, login)
    }
}

impl UserLookup for GithubLookup {
    fn get(&self, login: &str) -> Result<GithubProfile> {
        let login = login.trim();
        if !is_plausible_login(login) {
            return Err(AppError::NotFound(login.to_string()));
        }

        self.client
            .get_json(&self.user_url(login))
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(login.to_string()),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_logins() {
        assert!(is_plausible_login("octocat"));
        assert!(is_plausible_login("mona-lisa"));
        assert!(is_plausible_login("a"));
        assert!(is_plausible_login(&"x".repeat(39)));
    }

    #[test]
    fn test_implausible_logins() {
        assert!(!is_plausible_login(""));
        assert!(!is_plausible_login("-leading"));
        assert!(!is_plausible_login("has space"));
        assert!(!is_plausible_login("../repos"));
        assert!(!is_plausible_login("a?b=c"));
        assert!(!is_plausible_login(&"x".repeat(40)));
    }

    #[test]
    fn test_user_url_trims_trailing_slash() {
        let lookup =
            GithubLookup::with_base_url("http://localhost:1/", ClientOptions::default()).unwrap();
        assert_eq!(lookup.user_url("octocat"), "http://localhost:1/users/octocat");
    }

    #[test]
    fn test_implausible_login_fails_without_request() {
        // Base URL is unreachable: a request would fail with a network error
        let lookup =
            GithubLookup::with_base_url("http://invalid.invalid.invalid", ClientOptions::default())
                .unwrap();
        assert!(matches!(lookup.get("no/such user"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_unreachable_server_is_error() {
        let lookup =
            GithubLookup::with_base_url("http://invalid.invalid.invalid", ClientOptions::default())
                .unwrap();
        assert!(lookup.get("octocat").is_err());
    }
}
