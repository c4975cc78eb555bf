//! Favorites session
//!
//! The state a favorites screen binds to: the store, the login input,
//! the loading flag and a one-shot notice. Lookups are split into
//! `begin_lookup` / `finish_lookup` so the network call can run anywhere
//! while every mutation stays with the session owner.

use std::fmt;

use tracing::{debug, warn};

use crate::config::ui::{LOOKUP_FAILED_MESSAGE, LOOKUP_FAILED_TITLE};
use crate::data::{FavoritesStore, UserRecord};
use crate::error::{AppError, Result};
use crate::lookup::{GithubProfile, UserLookup};

/// One-shot message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The login could not be resolved (unknown user or request error)
    LookupFailed { login: String, reason: String },
    /// The login is already in the list
    AlreadyFavorite { login: String },
    /// The list changed but could not be written
    SaveFailed { reason: String },
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::LookupFailed { .. } => LOOKUP_FAILED_TITLE,
            Notice::AlreadyFavorite { .. } => "Already saved",
            Notice::SaveFailed { .. } => "Could not save favorites",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::LookupFailed { .. } => LOOKUP_FAILED_MESSAGE.to_string(),
            Notice::AlreadyFavorite { login } => format!("{login} is already in your favorites."),
            Notice::SaveFailed { reason } => reason.clone(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// Favorites plus the transient UI state around them
pub struct FavoritesSession {
    store: FavoritesStore,
    input: String,
    loading: bool,
    notice: Option<Notice>,
}

impl FavoritesSession {
    pub fn new(store: FavoritesStore) -> Self {
        Self {
            store,
            input: String::new(),
            loading: false,
            notice: None,
        }
    }

    pub fn store(&self) -> &FavoritesStore {
        &self.store
    }

    /// Favorites in display order
    pub fn users(&self) -> &[UserRecord] {
        self.store.users()
    }

    /// Current contents of the login input
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// True while a lookup is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Pending notice, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Hand the pending notice to the caller; it is shown once
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Start a lookup for the current input
    ///
    /// Returns the login to resolve and sets `loading`. Returns `None`
    /// (and starts nothing) while another lookup is in flight, when the
    /// input is blank, or when the login is already a favorite; the last
    /// two clear the input.
    pub fn begin_lookup(&mut self) -> Option<String> {
        if self.loading {
            debug!("lookup already in flight, ignoring submit");
            return None;
        }

        let login = self.input.trim().to_string();
        if login.is_empty() {
            self.input.clear();
            return None;
        }

        if self.store.contains_login(&login) {
            self.notice = Some(Notice::AlreadyFavorite { login });
            self.input.clear();
            return None;
        }

        self.loading = true;
        Some(login)
    }

    /// Apply the result of a lookup started by `begin_lookup`
    ///
    /// On success the profile is appended and persisted. On failure the
    /// list is untouched and a `LookupFailed` notice is raised. Either
    /// way the input is cleared and `loading` reset. Returns the appended
    /// record.
    pub fn finish_lookup(
        &mut self,
        login: &str,
        result: Result<GithubProfile>,
    ) -> Option<UserRecord> {
        let added = match result {
            Ok(profile) => self.append(profile.into()),
            Err(e) => {
                warn!(%login, "lookup failed: {e}");
                self.notice = Some(Notice::LookupFailed {
                    login: login.to_string(),
                    reason: e.to_string(),
                });
                None
            }
        };

        self.input.clear();
        self.loading = false;
        added
    }

    /// Look up `login` on the calling thread and append the profile
    pub fn add_from_login(&mut self, lookup: &dyn UserLookup, login: &str) -> Option<UserRecord> {
        self.input = login.to_string();
        let login = self.begin_lookup()?;
        let result = lookup.get(&login);
        self.finish_lookup(&login, result)
    }

    /// Remove the first favorite equal to `record`
    ///
    /// Removing a record that is not in the list does nothing and returns
    /// `false`.
    pub fn remove(&mut self, record: &UserRecord) -> bool {
        match self.store.remove(record) {
            Ok(removed) => removed,
            Err(e) => {
                self.save_failed(e);
                true
            }
        }
    }

    /// Remove the favorite with `login` (case-insensitive)
    pub fn remove_login(&mut self, login: &str) -> Option<UserRecord> {
        let record = self.store.get(login).cloned()?;
        self.remove(&record);
        Some(record)
    }

    fn append(&mut self, record: UserRecord) -> Option<UserRecord> {
        match self.store.add(record.clone()) {
            Ok(()) => Some(record),
            // GitHub answered with a login that differs from what was typed
            Err(AppError::Duplicate(login)) => {
                self.notice = Some(Notice::AlreadyFavorite { login });
                None
            }
            Err(e) => {
                self.save_failed(e);
                Some(record)
            }
        }
    }

    fn save_failed(&mut self, e: AppError) {
        warn!("favorites not saved: {e}");
        self.notice = Some(Notice::SaveFailed {
            reason: e.to_string(),
        });
    }
}
