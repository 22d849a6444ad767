//! File-backed record stores and the facade that opens them together.

pub mod gift_store;
pub mod user_store;

use std::path::PathBuf;

use configs::{AppConfig, DomainConfig};
use tracing::info;

use crate::errors::StoreError;
use gift_store::GiftStore;
use user_store::UserStore;

/// The user and gift stores bound to their two backing files.
#[derive(Debug, Clone)]
pub struct RecordStores {
    pub users: UserStore,
    pub gifts: GiftStore,
}

impl RecordStores {
    /// Check both files exist, then open the stores; the gift skeleton is seeded if needed.
    pub fn open<U, G>(user_file: U, gift_file: G, domains: DomainConfig) -> Result<Self, StoreError>
    where
        U: Into<PathBuf>,
        G: Into<PathBuf>,
    {
        let (user_file, gift_file) = (user_file.into(), gift_file.into());
        // 两个文件都先校验，避免只初始化其中一个
        common::utils::fs::check_file(&user_file)?;
        common::utils::fs::check_file(&gift_file)?;

        let users = UserStore::open(&user_file, domains.clone())?;
        let gifts = GiftStore::open(&gift_file, domains)?;
        info!(event = "stores_opened", user_file = %user_file.display(), gift_file = %gift_file.display(), "record stores ready");
        Ok(Self { users, gifts })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, StoreError> {
        Self::open(&cfg.storage.user_file, &cfg.storage.gift_file, cfg.domains.clone())
    }
}
