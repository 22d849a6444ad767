//! Environment/runtime helpers
//!
//! Startup provisioning so the stores' existence checks pass on a fresh machine.

use std::path::Path;
use tracing::{info, warn};

/// Ensure each data file exists, creating parent directories and an empty file when missing.
/// Existing files are left untouched.
pub fn ensure_data_files<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<()> {
    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            continue;
        }
        if path.exists() {
            warn!(path = %path.display(), "data path exists but is not a regular file");
            continue;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
        std::fs::write(path, b"")
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", path.display()))?;
        info!(path = %path.display(), event = "data_file_created", "created empty data file");
    }
    Ok(())
}
