use std::collections::BTreeMap;

use configs::DomainConfig;
use serde::{Deserialize, Serialize};

/// One stocked gift inside a tier cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftEntry {
    pub name: String,
    pub count: u64,
}

/// Gifts of one (first-level, second-level) cell, keyed by gift name.
pub type GiftPool = BTreeMap<String, GiftEntry>;

/// Second-level cells under one first-level key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiftTier {
    cells: BTreeMap<String, GiftPool>,
}

impl GiftTier {
    pub fn pool(&self, second_level: &str) -> Option<&GiftPool> {
        self.cells.get(second_level)
    }
}

/// The full inventory: first-level -> second-level -> gift name -> entry.
///
/// A seeded inventory always holds every first-level x second-level cell, even empty ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiftInventory {
    tiers: BTreeMap<String, GiftTier>,
}

impl GiftInventory {
    /// Every configured first-level x second-level cell, all empty.
    pub fn skeleton(domains: &DomainConfig) -> Self {
        let tiers = domains
            .first_levels
            .iter()
            .map(|first| {
                let cells = domains
                    .second_levels
                    .iter()
                    .map(|second| (second.clone(), GiftPool::new()))
                    .collect();
                (first.clone(), GiftTier { cells })
            })
            .collect();
        Self { tiers }
    }

    pub fn tier(&self, first_level: &str) -> Option<&GiftTier> {
        self.tiers.get(first_level)
    }

    pub fn pool(&self, first_level: &str, second_level: &str) -> Option<&GiftPool> {
        self.tier(first_level).and_then(|t| t.pool(second_level))
    }

    pub fn gift(&self, first_level: &str, second_level: &str, name: &str) -> Option<&GiftEntry> {
        self.pool(first_level, second_level).and_then(|p| p.get(name))
    }

    /// Number of (first-level, second-level) cells present.
    pub fn cell_count(&self) -> usize {
        self.tiers.values().map(|t| t.cells.len()).sum()
    }

    /// Add `count` units of `name` to a cell, creating the cell or entry as needed.
    /// Returns the entry after the update.
    pub fn add(&mut self, first_level: &str, second_level: &str, name: &str, count: u64) -> GiftEntry {
        let pool = self
            .tiers
            .entry(first_level.to_string())
            .or_default()
            .cells
            .entry(second_level.to_string())
            .or_default();
        let entry = pool
            .entry(name.to_string())
            .and_modify(|e| e.count = e.count.saturating_add(count))
            .or_insert_with(|| GiftEntry { name: name.to_string(), count });
        entry.clone()
    }

    pub fn into_tiers(self) -> BTreeMap<String, GiftTier> {
        self.tiers
    }
}

impl From<BTreeMap<String, GiftTier>> for GiftInventory {
    fn from(tiers: BTreeMap<String, GiftTier>) -> Self {
        Self { tiers }
    }
}

/// Requested quantities below one are stocked as a single unit.
pub fn normalize_count(requested: i64) -> u64 {
    if requested <= 0 { 1 } else { requested as u64 }
}
