//! Steam library discovery
//!
//! Uses steamlocate to read the local Steam installation's library folders.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{ExtractError, Result};

/// Every existing library folder known to the local Steam installation, in
/// Steam's own order.
pub fn discover_library_roots() -> Result<Vec<PathBuf>> {
    let steam_dir = steamlocate::SteamDir::locate().map_err(|e| {
        ExtractError::Steam(format!(
            "{e}; use --steamlibrarypath to point at a library folder"
        ))
    })?;
    debug!("Steam installation: {}", steam_dir.path().display());

    let libraries = steam_dir
        .libraries()
        .map_err(|e| ExtractError::Steam(e.to_string()))?;

    let mut roots: Vec<PathBuf> = Vec::new();
    for library in libraries {
        let library = match library {
            Ok(lib) => lib,
            Err(e) => {
                debug!("Skipping unreadable Steam library: {}", e);
                continue;
            }
        };
        let path = library.path().to_path_buf();
        if path.is_dir() && !roots.contains(&path) {
            roots.push(path);
        }
    }
    Ok(roots)
}
