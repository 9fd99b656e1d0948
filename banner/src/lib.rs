//! # Steam Banner Gen - Library Header Regeneration
//!
//! Rebuilds the 460x215 style header banner of every game in a Steam
//! installation from the hero and logo art already in the library cache,
//! using the logo placement Steam publishes in `appinfo.vdf`.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Placement value objects and banner geometry
//! - **Application**: Compositor, the batch use case and the artwork port
//! - **Infrastructure**: Library cache adapter and Steam root discovery
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use steam_banner_gen::infrastructure::storage::LibraryCacheStore;
//! use steam_banner_gen::use_cases::GenerateBannersUseCase;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = LibraryCacheStore::new("/home/me/.steam/root");
//! store.init()?;
//! let container = appinfo::Container::open(store.paths().appinfo())?;
//!
//! let report = GenerateBannersUseCase::new(Arc::new(store)).execute(&container);
//! println!("{} headers written", report.generated);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::compositor::BannerCompositor;
pub use application::results::{BannerOutcome, RunReport, SkipReason};
pub use application::{ports, use_cases};
pub use config::{Config, LogFormat};
pub use domain::errors as domain_errors;
pub use domain::value_objects;
