#[cfg(test)]
use mockall::automock;
use std::path::PathBuf;
use thiserror::Error;

use image::{DynamicImage, RgbImage};

use crate::domain::value_objects::ArtworkKind;

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Artwork not found: {0}")]
    NotFound(PathBuf),
}

/// Port for reading library art and publishing generated headers
#[cfg_attr(test, automock)]
pub trait ArtworkStore: Send + Sync {
    /// Check whether the art for an app is present
    fn exists(&self, app_id: u32, kind: ArtworkKind) -> bool;

    /// Decode the art for an app
    fn load(&self, app_id: u32, kind: ArtworkKind) -> Result<DynamicImage, ArtworkError>;

    /// Replace an app's header with `banner`
    ///
    /// Implementations must never leave a partially written header in
    /// place. Returns the location of the published header.
    fn publish_header(&self, app_id: u32, banner: &RgbImage) -> Result<PathBuf, ArtworkError>;
}
