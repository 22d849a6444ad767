use std::{collections::BTreeMap, io, marker::PhantomData, path::{Path, PathBuf}};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::errors::StoreError;

/// Generic JSON file-backed map store.
///
/// Holds no data itself: `load` reads the whole file, `store` replaces the whole file.
/// Keys are ordered so identical content always serializes to identical bytes.
#[derive(Debug, Clone)]
pub struct JsonMapStore<K, V> {
    file_path: PathBuf,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Ord + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    /// Bind to a file path. Nothing is read until the first `load`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _entries: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and decode the whole file. Blank content decodes as an empty map.
    pub fn load(&self) -> Result<BTreeMap<K, V>, StoreError> {
        let bytes = std::fs::read(&self.file_path).map_err(|e| self.io_error(e))?;
        debug!(path = %self.file_path.display(), bytes = bytes.len(), event = "load", "read backing file");
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path: self.file_path.clone(), source })
    }

    /// Serialize `map` and overwrite the file with it.
    pub fn store(&self, map: &BTreeMap<K, V>) -> Result<(), StoreError> {
        let data = serde_json::to_vec(map).map_err(|source| StoreError::Encode { path: self.file_path.clone(), source })?;
        std::fs::write(&self.file_path, &data).map_err(|e| self.io_error(e))?;
        debug!(path = %self.file_path.display(), bytes = data.len(), event = "persist", "rewrote backing file");
        Ok(())
    }

    /// Load, apply `f`, and persist when `f` returns `Some`.
    /// On `Ok(None)` or an error the file is left exactly as it was.
    pub fn update_map<F, R>(&self, f: F) -> Result<Option<R>, StoreError>
    where
        F: FnOnce(&mut BTreeMap<K, V>) -> Result<Option<R>, StoreError>,
    {
        let mut map = self.load()?;
        let Some(out) = f(&mut map)? else {
            return Ok(None);
        };
        self.store(&map)?;
        Ok(Some(out))
    }

    /// Load, apply `f`, and always persist unless `f` fails.
    pub fn mutate<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut BTreeMap<K, V>) -> Result<R, StoreError>,
    {
        let mut map = self.load()?;
        let out = f(&mut map)?;
        self.store(&map)?;
        Ok(out)
    }

    fn io_error(&self, e: io::Error) -> StoreError {
        if e.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound(self.file_path.clone())
        } else {
            StoreError::Io { path: self.file_path.clone(), source: e }
        }
    }
}
