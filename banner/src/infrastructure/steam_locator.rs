//! Steam installation discovery

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("platform not supported: pass the Steam path explicitly")]
    UnsupportedPlatform,

    #[error("Steam installation not found at {0}")]
    NotFound(PathBuf),
}

/// Default install location for the current platform
pub fn default_steam_root() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        std::env::var_os("ProgramFiles(x86)").map(|dir| PathBuf::from(dir).join("Steam"))
    } else if cfg!(target_os = "linux") {
        dirs::home_dir().map(|home| home.join(".steam").join("root"))
    } else if cfg!(target_os = "macos") {
        dirs::home_dir().map(|home| {
            home.join("Library")
                .join("Application Support")
                .join("Steam")
        })
    } else {
        None
    }
}

/// Pick the Steam root: explicit path, then configured path, then the
/// platform default. The chosen directory must exist.
pub fn resolve(explicit: Option<&Path>, configured: Option<&Path>) -> Result<PathBuf, LocateError> {
    let root = match explicit.or(configured) {
        Some(path) => path.to_path_buf(),
        None => default_steam_root().ok_or(LocateError::UnsupportedPlatform)?,
    };

    if root.is_dir() {
        Ok(root)
    } else {
        Err(LocateError::NotFound(root))
    }
}
