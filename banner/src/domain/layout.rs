//! Banner geometry
//!
//! Pure placement math for a header banner: canvas size derived from the
//! hero height, hero centering, logo scale clamping and the logo anchor
//! table. No pixels are touched here.

use crate::domain::errors::LayoutError;
use crate::domain::value_objects::{PinnedPosition, PlacementSpec};

/// Width / height of a Steam library header (460x215)
pub const BANNER_ASPECT_RATIO: f64 = 460.0 / 215.0;

/// Smallest logo width, as a fraction of the safe width
pub const MIN_LOGO_SCALE: f64 = 0.33;

/// Largest logo width, as a fraction of the safe width
pub const MAX_LOGO_SCALE: f64 = 0.5;

/// Share of the canvas width a logo may be sized against
pub const SAFE_WIDTH_FACTOR: f64 = 0.9;

/// Margin from the left/top edge for edge-anchored logos
pub const EDGE_MARGIN: f64 = 0.05;

/// Logo scale for the given store fractions, clamped to
/// `[MIN_LOGO_SCALE, MAX_LOGO_SCALE]`
///
/// Only the smaller fraction counts; the logo keeps its own aspect ratio.
pub fn logo_scale(width_fraction: f64, height_fraction: f64) -> f64 {
    // f64::min ignores a single NaN; two NaNs fall back to the minimum
    let pct = width_fraction.min(height_fraction);
    if pct.is_nan() {
        return MIN_LOGO_SCALE;
    }
    pct.clamp(MIN_LOGO_SCALE, MAX_LOGO_SCALE)
}

/// Top-left corner of the logo on the canvas, before rounding
pub fn logo_origin(
    position: PinnedPosition,
    canvas_width: f64,
    canvas_height: f64,
    logo_width: f64,
    logo_height: f64,
) -> (f64, f64) {
    let left = canvas_width * EDGE_MARGIN;
    let top = canvas_height * EDGE_MARGIN;
    let centered_x = (canvas_width - logo_width) / 2.0;
    let centered_y = (canvas_height - logo_height) / 2.0;

    match position {
        PinnedPosition::BottomLeft => (left, centered_y),
        PinnedPosition::UpperLeft => (left, top),
        PinnedPosition::UpperCenter => (centered_x, top),
        PinnedPosition::CenterCenter => (centered_x, centered_y),
        PinnedPosition::BottomCenter => (centered_x, centered_y),
    }
}

/// Resolved positions and sizes for one banner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Where the hero's top-left lands; x is negative when the hero is wider
    /// than the canvas
    pub hero_offset: (i64, i64),
    pub logo_scale: f64,
    pub logo_target_width: f64,
    pub logo_target_height: f64,
    /// Pixel size the logo is resized to
    pub logo_size: (u32, u32),
    pub logo_origin: (f64, f64),
    pub logo_offset: (i64, i64),
}

impl BannerLayout {
    /// Lay out a banner for hero and logo images of the given dimensions
    pub fn compute(
        hero: (u32, u32),
        logo: (u32, u32),
        placement: &PlacementSpec,
    ) -> Result<Self, LayoutError> {
        let (hero_width, hero_height) = hero;
        let (logo_width, logo_height) = logo;

        if hero_width == 0 || hero_height == 0 {
            return Err(LayoutError::EmptyImage {
                image: "hero",
                width: hero_width,
                height: hero_height,
            });
        }
        if logo_width == 0 || logo_height == 0 {
            return Err(LayoutError::EmptyImage {
                image: "logo",
                width: logo_width,
                height: logo_height,
            });
        }

        let canvas_w = (f64::from(hero_height) * BANNER_ASPECT_RATIO).round();
        if canvas_w > f64::from(u32::MAX) {
            return Err(LayoutError::CanvasTooLarge {
                width: canvas_w,
                height: hero_height,
            });
        }
        let canvas_h = f64::from(hero_height);

        let centering = ((f64::from(hero_width) - canvas_w) / 2.0).round();
        let hero_offset = (-(centering as i64), 0);

        let scale = logo_scale(placement.width_fraction, placement.height_fraction);
        let safe_width = canvas_w * SAFE_WIDTH_FACTOR;
        let logo_target_width = safe_width * scale;
        let aspect = f64::from(logo_width) / f64::from(logo_height);
        let logo_target_height = logo_target_width / aspect;

        let logo_size = (
            logo_target_width.round() as u32,
            logo_target_height.round() as u32,
        );
        if logo_size.0 == 0 || logo_size.1 == 0 {
            return Err(LayoutError::LogoTooSmall {
                width: logo_size.0,
                height: logo_size.1,
            });
        }

        let origin = logo_origin(
            placement.pinned_position,
            canvas_w,
            canvas_h,
            logo_target_width,
            logo_target_height,
        );

        Ok(Self {
            canvas_width: canvas_w as u32,
            canvas_height: hero_height,
            hero_offset,
            logo_scale: scale,
            logo_target_width,
            logo_target_height,
            logo_size,
            logo_origin: origin,
            logo_offset: (origin.0.round() as i64, origin.1.round() as i64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn placement(position: PinnedPosition, width: f64, height: f64) -> PlacementSpec {
        PlacementSpec::new(position, width, height)
    }

    #[test]
    fn test_reference_geometry() {
        let layout = BannerLayout::compute(
            (3840, 1000),
            (800, 400),
            &placement(PinnedPosition::UpperCenter, 0.4, 0.6),
        )
        .unwrap();

        assert_eq!(layout.canvas_width, 2140);
        assert_eq!(layout.canvas_height, 1000);
        assert!((layout.logo_scale - 0.4).abs() < EPS);
        assert!((layout.logo_target_width - 770.4).abs() < 1e-6);
        assert!((layout.logo_target_height - 385.2).abs() < 1e-6);
        assert_eq!(layout.logo_size, (770, 385));
    }

    #[test]
    fn test_upper_center_x_is_centered() {
        let layout = BannerLayout::compute(
            (3840, 1000),
            (800, 400),
            &placement(PinnedPosition::UpperCenter, 0.4, 0.6),
        )
        .unwrap();

        let expected_x = (2140.0 - 770.4) / 2.0;
        assert!((layout.logo_origin.0 - expected_x).abs() < 1e-6);
        assert!((layout.logo_offset.0 as f64 - expected_x).abs() <= 1.0);
        assert_eq!(layout.logo_offset, (685, 50));
    }

    #[test]
    fn test_hero_is_centered() {
        let layout = BannerLayout::compute(
            (3840, 1240),
            (640, 360),
            &placement(PinnedPosition::BottomLeft, 0.5, 0.5),
        )
        .unwrap();

        // 1240 * 460 / 215 = 2653.02 -> 2653; (3840 - 2653) / 2 = 593.5 -> 594
        assert_eq!(layout.canvas_width, 2653);
        assert_eq!(layout.hero_offset, (-594, 0));
    }

    #[test]
    fn test_narrow_hero_is_offset_right() {
        let layout = BannerLayout::compute(
            (1000, 1000),
            (100, 100),
            &placement(PinnedPosition::CenterCenter, 0.4, 0.4),
        )
        .unwrap();

        assert_eq!(layout.hero_offset, (570, 0));
    }

    #[test]
    fn test_anchor_table() {
        let (w, h, lw, lh) = (2140.0, 1000.0, 770.4, 385.2);

        assert_eq!(
            logo_origin(PinnedPosition::BottomLeft, w, h, lw, lh),
            (w * 0.05, (h - lh) / 2.0)
        );
        assert_eq!(
            logo_origin(PinnedPosition::UpperLeft, w, h, lw, lh),
            (w * 0.05, h * 0.05)
        );
        assert_eq!(
            logo_origin(PinnedPosition::UpperCenter, w, h, lw, lh),
            ((w - lw) / 2.0, h * 0.05)
        );
        assert_eq!(
            logo_origin(PinnedPosition::CenterCenter, w, h, lw, lh),
            ((w - lw) / 2.0, (h - lh) / 2.0)
        );
        assert_eq!(
            logo_origin(PinnedPosition::BottomCenter, w, h, lw, lh),
            ((w - lw) / 2.0, (h - lh) / 2.0)
        );
    }

    #[test]
    fn test_logo_scale_clamps() {
        assert!((logo_scale(0.4, 0.6) - 0.4).abs() < EPS);
        assert_eq!(logo_scale(0.1, 0.9), MIN_LOGO_SCALE);
        assert_eq!(logo_scale(0.9, 0.8), MAX_LOGO_SCALE);
        assert_eq!(logo_scale(-3.0, 2.0), MIN_LOGO_SCALE);
        assert_eq!(logo_scale(f64::INFINITY, f64::INFINITY), MAX_LOGO_SCALE);
        assert_eq!(logo_scale(f64::NAN, 0.45), 0.45);
        assert_eq!(logo_scale(f64::NAN, f64::NAN), MIN_LOGO_SCALE);
    }

    #[test]
    fn test_height_follows_logo_aspect() {
        // height_pct larger than width_pct must not stretch the logo
        let layout = BannerLayout::compute(
            (3840, 1000),
            (1000, 250),
            &placement(PinnedPosition::BottomLeft, 0.45, 0.9),
        )
        .unwrap();

        let ratio = layout.logo_target_width / layout.logo_target_height;
        assert!((ratio - 4.0).abs() < EPS);
    }

    #[test]
    fn test_empty_images_are_rejected() {
        let spec = placement(PinnedPosition::BottomLeft, 0.4, 0.4);

        assert!(matches!(
            BannerLayout::compute((0, 100), (10, 10), &spec),
            Err(LayoutError::EmptyImage { image: "hero", .. })
        ));
        assert!(matches!(
            BannerLayout::compute((100, 100), (10, 0), &spec),
            Err(LayoutError::EmptyImage { image: "logo", .. })
        ));
    }

    #[test]
    fn test_sliver_logo_is_rejected() {
        let spec = placement(PinnedPosition::BottomLeft, 0.4, 0.4);
        let result = BannerLayout::compute((100, 10), (100_000, 1), &spec);
        assert!(matches!(result, Err(LayoutError::LogoTooSmall { .. })));
    }
}
