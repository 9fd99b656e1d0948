mod library_cache_store;
mod path_builder;

pub use library_cache_store::{LibraryCacheStore, DEFAULT_JPEG_QUALITY};
pub use path_builder::{CacheDir, PathBuilder};
