mod artwork_kind;
mod pinned_position;
mod placement;

pub use artwork_kind::ArtworkKind;
pub use pinned_position::PinnedPosition;
pub use placement::PlacementSpec;
