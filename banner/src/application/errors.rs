//! Error type for per-application banner generation
//!
//! Skips travel through the same channel as failures so the pipeline can use
//! `?` throughout; the driver separates them again when it records the
//! outcome.

use thiserror::Error;

use crate::application::ports::ArtworkError;
use crate::application::results::SkipReason;
use crate::domain::errors::{LayoutError, PlacementError};

#[derive(Debug, Error)]
pub enum BannerError {
    #[error("Skipped: {0}")]
    Skipped(SkipReason),

    #[error("Placement error: {0}")]
    Placement(#[from] PlacementError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Artwork error: {0}")]
    Artwork(#[from] ArtworkError),
}

impl BannerError {
    pub fn is_skip(&self) -> bool {
        matches!(self, BannerError::Skipped(_))
    }
}

impl From<SkipReason> for BannerError {
    fn from(reason: SkipReason) -> Self {
        BannerError::Skipped(reason)
    }
}
