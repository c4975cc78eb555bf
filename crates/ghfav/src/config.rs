//! Configuration constants for ghfav

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "ghfav";
}

/// Storage-related configuration
pub mod storage {
    /// Key holding the serialized favorites list
    pub const USERS_KEY: &str = "users";

    /// Extension appended to every key by the file-backed store
    pub const FILE_EXTENSION: &str = "json";
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("ghfav/", env!("CARGO_PKG_VERSION"));

    /// Default GitHub REST API root
    pub const GITHUB_API_DEFAULT: &str = "https://api.github.com";

    /// Media type requested from the GitHub API
    pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Upper bound accepted for either timeout setting
    pub const MAX_TIMEOUT_SECS: u64 = 300;
}

/// UI-related configuration
pub mod ui {
    /// Title of the lookup failure notice
    pub const LOOKUP_FAILED_TITLE: &str = "Search failed";

    /// Body of the lookup failure notice
    pub const LOOKUP_FAILED_MESSAGE: &str = "This user does not exist on GitHub.";

    /// How often front ends poll the shared snapshot (milliseconds)
    pub const TICK_MS: u64 = 50;
}
