//! User lookup
//!
//! Resolves a login to a GitHub profile.

pub mod github;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

// Re-exports
pub use github::GithubLookup;
pub use traits::UserLookup;
pub use types::GithubProfile;
