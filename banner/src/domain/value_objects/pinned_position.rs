use crate::domain::errors::PlacementError;

/// Where the store page pins a game's logo over its hero art
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinnedPosition {
    BottomLeft,
    UpperLeft,
    UpperCenter,
    CenterCenter,
    BottomCenter,
}

impl PinnedPosition {
    pub const ALL: [PinnedPosition; 5] = [
        PinnedPosition::BottomLeft,
        PinnedPosition::UpperLeft,
        PinnedPosition::UpperCenter,
        PinnedPosition::CenterCenter,
        PinnedPosition::BottomCenter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PinnedPosition::BottomLeft => "BottomLeft",
            PinnedPosition::UpperLeft => "UpperLeft",
            PinnedPosition::UpperCenter => "UpperCenter",
            PinnedPosition::CenterCenter => "CenterCenter",
            PinnedPosition::BottomCenter => "BottomCenter",
        }
    }

    /// Horizontally centered anchors
    pub fn is_centered(&self) -> bool {
        !matches!(self, PinnedPosition::BottomLeft | PinnedPosition::UpperLeft)
    }
}

impl std::fmt::Display for PinnedPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PinnedPosition {
    type Err = PlacementError;

    /// Accepts the variant name in any case, or its ordinal (`"0"`..`"4"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(ordinal) = trimmed.parse::<usize>() {
            return Self::ALL
                .get(ordinal)
                .copied()
                .ok_or_else(|| PlacementError::UnknownPinnedPosition(s.to_string()));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|position| position.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PlacementError::UnknownPinnedPosition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            PinnedPosition::from_str("bottomleft").unwrap(),
            PinnedPosition::BottomLeft
        );
        assert_eq!(
            PinnedPosition::from_str("UPPERCENTER").unwrap(),
            PinnedPosition::UpperCenter
        );
        assert_eq!(
            PinnedPosition::from_str(" CenterCenter ").unwrap(),
            PinnedPosition::CenterCenter
        );
    }

    #[test]
    fn test_parse_ordinals() {
        assert_eq!(PinnedPosition::from_str("0").unwrap(), PinnedPosition::BottomLeft);
        assert_eq!(PinnedPosition::from_str("4").unwrap(), PinnedPosition::BottomCenter);
        assert!(PinnedPosition::from_str("5").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = PinnedPosition::from_str("TopRight").unwrap_err();
        assert_eq!(err, PlacementError::UnknownPinnedPosition("TopRight".into()));
        assert!(PinnedPosition::from_str("").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for position in PinnedPosition::ALL {
            assert_eq!(
                PinnedPosition::from_str(&position.to_string()).unwrap(),
                position
            );
        }
    }
}
