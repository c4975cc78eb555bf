//! In-memory lookup for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{AppError, Result};

use super::traits::UserLookup;
use super::types::GithubProfile;

/// Answers from a fixed set of profiles and counts calls
#[derive(Clone, Default)]
pub struct MockLookup {
    profiles: Vec<GithubProfile>,
    calls: Arc<AtomicUsize>,
}

impl MockLookup {
    pub fn new(profiles: Vec<GithubProfile>) -> Self {
        Self {
            profiles,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `get` calls so far (shared across clones)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl UserLookup for MockLookup {
    fn get(&self, login: &str) -> Result<GithubProfile> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profiles
            .iter()
            .find(|p| p.login.eq_ignore_ascii_case(login))
            .cloned()
            .ok_or_else(|| AppError::NotFound(login.to_string()))
    }
}

/// The profile used throughout the scenario tests
pub fn octocat() -> GithubProfile {
    GithubProfile::new("octocat")
        .with_name("The Octocat")
        .with_bio("")
        .with_avatar_url("http://x/a.png")
}
