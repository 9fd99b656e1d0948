use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("Invalid pinned position: {0:?}")]
    UnknownPinnedPosition(String),

    #[error("Missing logo position field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field} value: {value:?}")]
    InvalidFraction { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{image} image has no area ({width}x{height})")]
    EmptyImage {
        image: &'static str,
        width: u32,
        height: u32,
    },

    #[error("Logo would be resized to {width}x{height}")]
    LogoTooSmall { width: u32, height: u32 },

    #[error("Banner canvas of {width}x{height} is too large")]
    CanvasTooLarge { width: f64, height: u32 },
}
