use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use tracing::{debug, info};

use crate::application::ports::{ArtworkError, ArtworkStore};
use crate::domain::value_objects::ArtworkKind;
use crate::infrastructure::storage::{CacheDir, PathBuilder};

/// Default JPEG quality for generated headers
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Artwork store backed by a Steam `appcache` directory
///
/// Headers are encoded into `librarycache_staging` first and then swapped
/// into `librarycache` with a rename, so the client never sees a half
/// written file. The first time an app's header is replaced the original
/// is copied to `librarycache_backup`; later runs leave that copy alone.
pub struct LibraryCacheStore {
    paths: PathBuilder,
    jpeg_quality: u8,
}

impl LibraryCacheStore {
    pub fn new(steam_root: impl AsRef<Path>) -> Self {
        Self::with_quality(steam_root, DEFAULT_JPEG_QUALITY)
    }

    pub fn with_quality(steam_root: impl AsRef<Path>, jpeg_quality: u8) -> Self {
        Self {
            paths: PathBuilder::new(steam_root),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    /// Create the backup and staging directories
    pub fn init(&self) -> Result<(), ArtworkError> {
        for dir in [CacheDir::Backup, CacheDir::Staging] {
            fs::create_dir_all(self.paths.dir(dir))?;
        }
        Ok(())
    }

    pub fn paths(&self) -> &PathBuilder {
        &self.paths
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Copy the current header aside unless a backup already exists
    fn backup_original(&self, app_id: u32) -> Result<(), ArtworkError> {
        let production = self
            .paths
            .artwork(CacheDir::Library, app_id, ArtworkKind::Header);
        let backup = self
            .paths
            .artwork(CacheDir::Backup, app_id, ArtworkKind::Header);

        if production.exists() && !backup.exists() {
            fs::copy(&production, &backup)?;
            info!(app_id, backup = %backup.display(), "Backed up original header");
        }
        Ok(())
    }

    fn encode_jpeg(&self, path: &Path, banner: &RgbImage) -> Result<(), ArtworkError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        {
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality);
            encoder.encode_image(banner)?;
        }

        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }

    /// Replace `production` with `staged` via a sibling temp file and rename
    fn promote(staged: &Path, production: &Path) -> Result<(), ArtworkError> {
        let temp = production.with_extension("jpg.tmp");

        if let Err(e) = fs::copy(staged, &temp) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, production) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl ArtworkStore for LibraryCacheStore {
    fn exists(&self, app_id: u32, kind: ArtworkKind) -> bool {
        self.paths
            .artwork(CacheDir::Library, app_id, kind)
            .is_file()
    }

    fn load(&self, app_id: u32, kind: ArtworkKind) -> Result<DynamicImage, ArtworkError> {
        let path = self.paths.artwork(CacheDir::Library, app_id, kind);
        if !path.is_file() {
            return Err(ArtworkError::NotFound(path));
        }

        debug!(app_id, path = %path.display(), "Decoding {}", kind);
        Ok(image::open(&path)?)
    }

    fn publish_header(&self, app_id: u32, banner: &RgbImage) -> Result<PathBuf, ArtworkError> {
        self.backup_original(app_id)?;

        let staged = self
            .paths
            .artwork(CacheDir::Staging, app_id, ArtworkKind::Header);
        self.encode_jpeg(&staged, banner)?;

        let production = self
            .paths
            .artwork(CacheDir::Library, app_id, ArtworkKind::Header);
        Self::promote(&staged, &production)?;

        debug!(app_id, staged = %staged.display(), "Header promoted");
        Ok(production)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageFormat, Rgb, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn setup() -> (TempDir, LibraryCacheStore) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("appcache/librarycache")).unwrap();
        let store = LibraryCacheStore::new(temp.path());
        store.init().unwrap();
        (temp, store)
    }

    fn banner() -> RgbImage {
        RgbImage::from_pixel(460, 215, Rgb([120, 40, 200]))
    }

    #[test]
    fn test_init_creates_dirs() {
        let (temp, _store) = setup();
        assert!(temp.path().join("appcache/librarycache_backup").is_dir());
        assert!(temp.path().join("appcache/librarycache_staging").is_dir());
    }

    #[test]
    fn test_exists_and_load() {
        let (_temp, store) = setup();
        assert!(!store.exists(440, ArtworkKind::Logo));

        let logo_path = store
            .paths()
            .artwork(CacheDir::Library, 440, ArtworkKind::Logo);
        RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 0]))
            .save_with_format(&logo_path, ImageFormat::Png)
            .unwrap();

        assert!(store.exists(440, ArtworkKind::Logo));
        let logo = store.load(440, ArtworkKind::Logo).unwrap();
        assert_eq!(logo.dimensions(), (8, 4));
    }

    #[test]
    fn test_load_missing() {
        let (_temp, store) = setup();
        let result = store.load(1, ArtworkKind::Hero);
        assert!(matches!(result, Err(ArtworkError::NotFound(_))));
    }

    #[test]
    fn test_load_corrupt_image() {
        let (_temp, store) = setup();
        let path = store
            .paths()
            .artwork(CacheDir::Library, 5, ArtworkKind::Hero);
        fs::write(&path, b"not a jpeg").unwrap();

        assert!(store.load(5, ArtworkKind::Hero).is_err());
    }

    #[test]
    fn test_publish_writes_staging_and_production() {
        let (_temp, store) = setup();

        let published = store.publish_header(440, &banner()).unwrap();

        let staged = store
            .paths()
            .artwork(CacheDir::Staging, 440, ArtworkKind::Header);
        assert_eq!(
            published,
            store
                .paths()
                .artwork(CacheDir::Library, 440, ArtworkKind::Header)
        );
        assert_eq!(fs::read(&staged).unwrap(), fs::read(&published).unwrap());
        assert_eq!(image::open(&published).unwrap().dimensions(), (460, 215));
        assert!(!published.with_extension("jpg.tmp").exists());
    }

    #[test]
    fn test_backup_taken_once() {
        let (_temp, store) = setup();
        let production = store
            .paths()
            .artwork(CacheDir::Library, 7, ArtworkKind::Header);
        let backup = store
            .paths()
            .artwork(CacheDir::Backup, 7, ArtworkKind::Header);
        fs::write(&production, b"original header").unwrap();

        store.publish_header(7, &banner()).unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"original header");

        // Second run must not overwrite the backup with a generated header
        store.publish_header(7, &banner()).unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"original header");
    }

    #[test]
    fn test_no_backup_without_original() {
        let (_temp, store) = setup();
        store.publish_header(9, &banner()).unwrap();

        let backup = store
            .paths()
            .artwork(CacheDir::Backup, 9, ArtworkKind::Header);
        assert!(!backup.exists());
    }

    #[test]
    fn test_quality_is_clamped() {
        let temp = TempDir::new().unwrap();
        assert_eq!(LibraryCacheStore::with_quality(temp.path(), 0).jpeg_quality(), 1);
        assert_eq!(
            LibraryCacheStore::with_quality(temp.path(), 255).jpeg_quality(),
            100
        );
    }
}
