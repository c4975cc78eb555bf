//! Favorites management
//!
//! Ordered list of favorited users mirrored into a key-value store.
//! Every mutation rewrites the whole list; an empty list removes the key.

use crate::config::storage::USERS_KEY;
use crate::data::storage::KeyValueStore;
use crate::data::types::UserRecord;
use crate::error::{AppError, Result};
use tracing::{debug, warn};

/// Serialize a favorites list the way it is persisted
pub fn encode(users: &[UserRecord]) -> Result<String> {
    Ok(serde_json::to_string(users)?)
}

/// Parse a persisted favorites list
pub fn decode(raw: &str) -> Result<Vec<UserRecord>> {
    Ok(serde_json::from_str(raw)?)
}

/// Favorites list plus the storage it is persisted to
///
/// Insertion order is display order. Logins are unique (case-insensitive).
pub struct FavoritesStore {
    users: Vec<UserRecord>,
    storage: Box<dyn KeyValueStore>,
}

impl FavoritesStore {
    /// Load the persisted list
    ///
    /// A missing key, a read error or unparsable contents all start the
    /// store empty; only the latter two are logged.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let users = match storage.get_item(USERS_KEY) {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(users) => users,
                Err(e) => {
                    warn!("ignoring unreadable favorites: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("could not read favorites: {e}");
                Vec::new()
            }
        };

        debug!(count = users.len(), "favorites loaded");
        Self { users, storage }
    }

    /// All favorites in display order
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// Get number of favorites
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Find a favorite by login (case-insensitive)
    pub fn get(&self, login: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.has_login(login))
    }

    /// Check if a login is already a favorite
    pub fn contains_login(&self, login: &str) -> bool {
        self.get(login).is_some()
    }

    /// Append a favorite and persist
    ///
    /// Fails with `Duplicate` (and changes nothing) if the login is already
    /// present. A storage error is returned after the in-memory append, so
    /// the list and what is on disk may differ until the next write.
    pub fn add(&mut self, record: UserRecord) -> Result<()> {
        if self.contains_login(&record.login) {
            return Err(AppError::Duplicate(record.login));
        }

        debug!(login = %record.login, "adding favorite");
        self.users.push(record);
        self.persist()
    }

    /// Remove the first favorite equal to `record` and persist
    ///
    /// Returns `false` without touching storage when nothing matched.
    pub fn remove(&mut self, record: &UserRecord) -> Result<bool> {
        match self.users.iter().position(|u| u == record) {
            Some(index) => {
                self.users.remove(index);
                debug!(login = %record.login, "removed favorite");
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the favorite with `login` and persist
    pub fn remove_login(&mut self, login: &str) -> Result<Option<UserRecord>> {
        match self.users.iter().position(|u| u.has_login(login)) {
            Some(index) => {
                let removed = self.users.remove(index);
                debug!(login = %removed.login, "removed favorite");
                self.persist()?;
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }

    /// Remove every favorite and delete the persisted key
    pub fn clear(&mut self) -> Result<()> {
        self.users.clear();
        self.persist()
    }

    /// Write the whole list, or delete the key when the list is empty
    fn persist(&self) -> Result<()> {
        if self.users.is_empty() {
            self.storage.remove_item(USERS_KEY)
        } else {
            self.storage.set_item(USERS_KEY, &encode(&self.users)?)
        }
    }
}
