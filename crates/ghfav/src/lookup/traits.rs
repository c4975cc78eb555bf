//! User lookup trait
//!
//! Defines the interface the favorites session resolves logins through.

use crate::error::Result;

use super::types::GithubProfile;

/// A source of GitHub user profiles
///
/// Implementations block the calling thread until the profile is resolved
/// or the lookup fails; callers that must stay responsive run them on a
/// worker thread.
pub trait UserLookup: Send + Sync {
    /// Resolve a login to a profile
    ///
    /// Unknown users fail with `AppError::NotFound`.
    fn get(&self, login: &str) -> Result<GithubProfile>;
}
