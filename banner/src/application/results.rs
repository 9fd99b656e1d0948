//! Outcome types for a banner generation run
//!
//! Every app in the container ends up in exactly one bucket of a
//! [`RunReport`]: generated, skipped, or failed.

use std::path::PathBuf;

use crate::application::errors::BannerError;

/// Why an app gets no banner; not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `common/type` is not "game"
    NotAGame,
    /// No `common/library_assets/logo_position` block
    NoLogoPosition,
    MissingHero,
    MissingLogo,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAGame => write!(f, "not a game"),
            SkipReason::NoLogoPosition => write!(f, "no logo position"),
            SkipReason::MissingHero => write!(f, "hero image missing"),
            SkipReason::MissingLogo => write!(f, "logo image missing"),
        }
    }
}

/// Result of processing one app
#[derive(Debug)]
pub enum BannerOutcome {
    Generated(PathBuf),
    Skipped(SkipReason),
    Failed(BannerError),
}

impl From<Result<PathBuf, BannerError>> for BannerOutcome {
    fn from(result: Result<PathBuf, BannerError>) -> Self {
        match result {
            Ok(path) => BannerOutcome::Generated(path),
            Err(BannerError::Skipped(reason)) => BannerOutcome::Skipped(reason),
            Err(e) => BannerOutcome::Failed(e),
        }
    }
}

/// Summary of a complete run
#[derive(Debug, Default, Clone)]
pub struct RunReport {
    /// Number of headers written
    pub generated: usize,
    /// Number of apps left untouched by the skip policy
    pub skipped: usize,
    /// Apps that failed, with the error message
    ///
    /// A failure never stops the run; later apps are still processed.
    pub failed: Vec<(u32, String)>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, app_id: u32, outcome: &BannerOutcome) {
        match outcome {
            BannerOutcome::Generated(_) => self.generated += 1,
            BannerOutcome::Skipped(_) => self.skipped += 1,
            BannerOutcome::Failed(e) => self.failed.push((app_id, e.to_string())),
        }
    }

    /// Total number of apps seen
    pub fn total(&self) -> usize {
        self.generated + self.skipped + self.failed.len()
    }

    /// True if no app failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
