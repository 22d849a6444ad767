use std::path::PathBuf;

use common::utils::fs::check_file;
use configs::DomainConfig;
use models::gift::{normalize_count, GiftEntry, GiftInventory, GiftTier};
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::storage::json_map_store::JsonMapStore;
use crate::validation::{check_levels, require};

/// File-backed tiered gift inventory.
/// Persists `first level -> second level -> gift name -> {name, count}` as JSON.
#[derive(Debug, Clone)]
pub struct GiftStore {
    store: JsonMapStore<String, GiftTier>,
    domains: DomainConfig,
}

impl GiftStore {
    /// Bind to an existing gift file and seed the tier skeleton if it is empty.
    pub fn open<P: Into<PathBuf>>(path: P, domains: DomainConfig) -> Result<Self, StoreError> {
        let path = path.into();
        check_file(&path)?;
        let store = Self { store: JsonMapStore::new(path), domains };
        store.bootstrap()?;
        Ok(store)
    }

    /// Write the empty tier skeleton when the file holds no inventory yet.
    /// Returns whether anything was written; existing inventory is never overwritten.
    pub fn bootstrap(&self) -> Result<bool, StoreError> {
        let seeded = self.store.update_map(|tiers| {
            if !tiers.is_empty() {
                return Ok(None);
            }
            *tiers = GiftInventory::skeleton(&self.domains).into_tiers();
            Ok(Some(tiers.len()))
        })?;

        match seeded {
            Some(first_levels) => {
                info!(event = "gift_skeleton_seeded", path = %self.store.path().display(), first_levels, "seeded gift tier skeleton");
                Ok(true)
            }
            None => {
                debug!(event = "gift_skeleton_present", path = %self.store.path().display(), "gift inventory already initialized");
                Ok(false)
            }
        }
    }

    /// Stock `count` units of `name` in the given cell, adding to any existing count.
    /// Counts below one are stocked as one. Returns the entry after the update.
    pub fn add_gift(&self, first_level: &str, second_level: &str, name: &str, count: i64) -> Result<GiftEntry, StoreError> {
        check_levels(&self.domains, first_level, second_level)?;
        let name = require("gift_name", Some(name))?;
        let count = normalize_count(count);

        let entry = self.store.mutate(|tiers| {
            let mut inventory = GiftInventory::from(std::mem::take(tiers));
            let entry = inventory.add(first_level, second_level, name, count);
            *tiers = inventory.into_tiers();
            Ok(entry)
        })?;

        info!(event = "gift_added", %first_level, %second_level, gift = %name, added = count, total = entry.count, "gift stocked");
        Ok(entry)
    }

    /// Full inventory as currently persisted.
    pub fn inventory(&self) -> Result<GiftInventory, StoreError> {
        Ok(GiftInventory::from(self.store.load()?))
    }
}
