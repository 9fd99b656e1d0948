mod artwork_store;

pub use artwork_store::{ArtworkError, ArtworkStore};

#[cfg(test)]
pub use artwork_store::MockArtworkStore;
