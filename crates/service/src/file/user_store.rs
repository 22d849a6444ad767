use std::collections::BTreeMap;
use std::path::PathBuf;

use common::utils::{fs::check_file, time::timestamp_to_string};
use configs::DomainConfig;
use models::user::{self, NewUser, UserRecord, UserView, RESERVED_FIELDS};
use tracing::info;

use crate::errors::StoreError;
use crate::storage::json_map_store::JsonMapStore;
use crate::validation::{check_role, require};

/// File-backed user accounts.
/// Keeps a map of `username -> UserRecord` persisted as JSON; every call re-reads the file.
#[derive(Debug, Clone)]
pub struct UserStore {
    store: JsonMapStore<String, UserRecord>,
    domains: DomainConfig,
}

impl UserStore {
    /// Bind to an existing user file.
    pub fn open<P: Into<PathBuf>>(path: P, domains: DomainConfig) -> Result<Self, StoreError> {
        let path = path.into();
        check_file(&path)?;
        Ok(Self { store: JsonMapStore::new(path), domains })
    }

    /// Insert a new active user with an empty gift ledger.
    pub fn create(&self, input: NewUser) -> Result<UserRecord, StoreError> {
        let username = require("username", input.username.as_deref())?.to_string();
        let role = require("role", input.role.as_deref())?.to_string();
        check_role(&self.domains, &role)?;
        if let Some(key) = input.extra.keys().find(|k| RESERVED_FIELDS.contains(&k.as_str())) {
            return Err(StoreError::ReservedField(key.clone()));
        }

        let created = UserRecord::new(username, role, input.extra, user::now());
        self.store.mutate(|users| {
            if users.contains_key(&created.username) {
                return Err(StoreError::UserExists(created.username.clone()));
            }
            users.insert(created.username.clone(), created.clone());
            Ok(())
        })?;

        info!(event = "user_created", username = %created.username, role = %created.role, "user created");
        Ok(created)
    }

    /// Change a user's role. Returns `false` when the user does not exist.
    pub fn change_role(&self, username: &str, role: &str) -> Result<bool, StoreError> {
        let changed = self.store.update_map(|users| {
            let Some(rec) = users.get_mut(username) else {
                return Ok(None);
            };
            check_role(&self.domains, role)?;
            rec.role = role.to_string();
            rec.touch(user::now());
            Ok(Some(()))
        })?;

        if changed.is_some() {
            info!(event = "user_role_changed", %username, %role, "user role changed");
        }
        Ok(changed.is_some())
    }

    /// Flip the active flag. Returns the new flag, or `None` when the user does not exist.
    pub fn toggle_active(&self, username: &str) -> Result<Option<bool>, StoreError> {
        let active = self.store.update_map(|users| {
            Ok(users.get_mut(username).map(|rec| {
                rec.active = !rec.active;
                rec.touch(user::now());
                rec.active
            }))
        })?;

        if let Some(active) = active {
            info!(event = "user_active_toggled", %username, active, "user active flag toggled");
        }
        Ok(active)
    }

    /// Remove a user, returning the removed record.
    pub fn delete(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let removed = self.store.update_map(|users| Ok(users.remove(username)))?;
        if removed.is_some() {
            info!(event = "user_deleted", %username, "user deleted");
        }
        Ok(removed)
    }

    /// All users keyed by username; timestamps rendered for display when asked.
    pub fn list(&self, format_timestamps: bool) -> Result<BTreeMap<String, UserView>, StoreError> {
        let users = self.store.load()?;
        Ok(users
            .into_iter()
            .map(|(name, rec)| {
                let view = if format_timestamps {
                    UserView::formatted(rec, timestamp_to_string)
                } else {
                    UserView::raw(rec)
                };
                (name, view)
            })
            .collect())
    }

    pub fn get(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.store.load()?.remove(username))
    }
}
