//! Shared application state and commands
//!
//! `AppCommand` is the unified command type sent by any front end.
//! `AppSnapshot` is the shared state front ends render from.

use std::borrow::Cow;

use crate::data::UserRecord;
use crate::error::Result;
use crate::lookup::GithubProfile;

use super::session::Notice;

/// Commands sent by any front end
pub enum AppCommand {
    // Input field
    SetInput(String),
    /// Look up the current input and add it to favorites
    Submit,

    // Favorites
    Remove(UserRecord),
    RemoveLogin(String),

    // Navigation
    /// Show the detail view for a favorite
    Open(String),
    /// Back to the list
    Close,

    /// Acknowledge the current notice
    DismissNotice,

    // Shutdown the app
    Shutdown,

    // Internal: lookup finished on a worker thread (not sent by front ends)
    InternalLookupResolved {
        login: String,
        result: Result<GithubProfile>,
    },
}

/// Snapshot of app state, shared between the controller and front ends
#[derive(Clone, Debug)]
pub struct AppSnapshot {
    /// Favorites in display order
    pub users: Vec<UserRecord>,
    /// Login input contents
    pub input: String,
    /// True while a lookup is in flight
    pub loading: bool,
    /// `Submit` commands handled so far
    pub submits: u64,
    /// Notice waiting to be shown and dismissed
    pub notice: Option<Notice>,
    /// Favorite shown in the detail view
    pub selected: Option<UserRecord>,
    pub status_text: Cow<'static, str>,
}

impl AppSnapshot {
    /// Whether a notice is waiting for acknowledgement
    pub fn has_notice(&self) -> bool {
        self.notice.is_some()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

impl Default for AppSnapshot {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            input: String::new(),
            loading: false,
            submits: 0,
            notice: None,
            selected: None,
            status_text: Cow::Borrowed("Ready"),
        }
    }
}
