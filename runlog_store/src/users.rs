use runlog_core::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::error::DirectoryError;
use crate::persist::JsonFile;

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserDocument {
    #[serde(default)]
    users: BTreeMap<UserId, String>,
}

/// Registered users and their display names.
///
/// Presence in the directory is what grants access to workout commands; the
/// shared-password check happens before `register` is called.
pub struct UserDirectory {
    file: JsonFile,
    users: Mutex<BTreeMap<UserId, String>>,
}

impl UserDirectory {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DirectoryError> {
        let file = JsonFile::new(path.into());
        let document: UserDocument = file.load_or_create()?;
        info!(
            "Loaded {} registered users from {}",
            document.users.len(),
            file.path().display()
        );
        Ok(Self {
            file,
            users: Mutex::new(document.users),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<UserId, String>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `user_id` once. An existing id is never overwritten.
    pub fn register(&self, user_id: UserId, display_name: &str) -> Result<(), DirectoryError> {
        let mut users = self.lock();
        if users.contains_key(&user_id) {
            warn!("User already exists: {user_id}");
            return Err(DirectoryError::AlreadyExists(user_id));
        }

        users.insert(user_id, display_name.to_string());
        let document = UserDocument {
            users: users.clone(),
        };
        if let Err(e) = self.file.save(&document) {
            users.remove(&user_id);
            return Err(e.into());
        }

        info!("Registered user {user_id} as {display_name}");
        Ok(())
    }

    pub fn resolve(&self, user_id: UserId) -> Result<String, DirectoryError> {
        self.lock()
            .get(&user_id)
            .cloned()
            .ok_or(DirectoryError::NotFound(user_id))
    }

    #[must_use]
    pub fn is_authorized(&self, user_id: UserId) -> bool {
        let authorized = self.lock().contains_key(&user_id);
        if !authorized {
            warn!("User not authorized: {user_id}");
        }
        authorized
    }
}
