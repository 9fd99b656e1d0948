use appinfo::Node;

use super::PinnedPosition;
use crate::domain::errors::PlacementError;

/// Logo placement read from an app's `logo_position` block
///
/// Fractions are the store's percentages divided by 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSpec {
    pub pinned_position: PinnedPosition,
    pub width_fraction: f64,
    pub height_fraction: f64,
}

impl PlacementSpec {
    pub fn new(pinned_position: PinnedPosition, width_fraction: f64, height_fraction: f64) -> Self {
        Self {
            pinned_position,
            width_fraction,
            height_fraction,
        }
    }

    /// Parse a `logo_position` node
    ///
    /// Expects `pinned_position`, `width_pct` and `height_pct` leaves.
    pub fn from_logo_position(node: &Node) -> Result<Self, PlacementError> {
        let pinned_position = node["pinned_position"]
            .as_str()
            .ok_or(PlacementError::MissingField("pinned_position"))?
            .parse()?;

        Ok(Self {
            pinned_position,
            width_fraction: parse_percent(node, "width_pct")?,
            height_fraction: parse_percent(node, "height_pct")?,
        })
    }
}

fn parse_percent(node: &Node, field: &'static str) -> Result<f64, PlacementError> {
    let raw = node[field]
        .as_str()
        .ok_or(PlacementError::MissingField(field))?;

    raw.trim()
        .parse::<f64>()
        .map(|pct| pct / 100.0)
        .map_err(|_| PlacementError::InvalidFraction {
            field,
            value: raw.to_string(),
        })
}
