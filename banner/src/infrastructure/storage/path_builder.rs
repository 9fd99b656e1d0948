use std::path::{Path, PathBuf};

use crate::domain::value_objects::ArtworkKind;

/// Art directories below `<steam>/appcache`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDir {
    /// Where the client reads library art from
    Library,
    /// Untouched copies of original headers
    Backup,
    /// Freshly encoded headers
    Staging,
}

impl CacheDir {
    pub fn dir_name(self) -> &'static str {
        match self {
            CacheDir::Library => "librarycache",
            CacheDir::Backup => "librarycache_backup",
            CacheDir::Staging => "librarycache_staging",
        }
    }
}

/// Utility for generating paths inside a Steam installation
#[derive(Debug, Clone)]
pub struct PathBuilder {
    appcache: PathBuf,
}

impl PathBuilder {
    pub fn new(steam_root: impl AsRef<Path>) -> Self {
        Self {
            appcache: steam_root.as_ref().join("appcache"),
        }
    }

    /// `<steam>/appcache`
    pub fn appcache(&self) -> &Path {
        &self.appcache
    }

    /// `<steam>/appcache/appinfo.vdf`
    pub fn appinfo(&self) -> PathBuf {
        self.appcache.join("appinfo.vdf")
    }

    pub fn dir(&self, dir: CacheDir) -> PathBuf {
        self.appcache.join(dir.dir_name())
    }

    /// Art file path: `<steam>/appcache/{dir}/{app_id}_{suffix}.{ext}`
    pub fn artwork(&self, dir: CacheDir, app_id: u32, kind: ArtworkKind) -> PathBuf {
        self.dir(dir).join(kind.file_name(app_id))
    }
}
