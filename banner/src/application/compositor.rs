//! Banner compositing
//!
//! Decides whether an app gets a banner (from its appinfo document) and
//! renders it from decoded hero and logo images. No file I/O happens here.

use appinfo::Document;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage, RgbImage};
use tracing::debug;

use crate::application::errors::BannerError;
use crate::application::results::SkipReason;
use crate::domain::layout::BannerLayout;
use crate::domain::value_objects::PlacementSpec;

/// Renders library header banners
#[derive(Debug, Clone, Copy)]
pub struct BannerCompositor {
    filter: FilterType,
}

impl BannerCompositor {
    pub fn new() -> Self {
        Self {
            filter: FilterType::CatmullRom,
        }
    }

    /// Placement for an app, or the reason it gets no banner
    ///
    /// Non-games and apps without a `logo_position` block are skips;
    /// a malformed `logo_position` block is an error.
    pub fn placement(document: &Document) -> Result<PlacementSpec, BannerError> {
        let common = &document["common"];

        let is_game = common["type"]
            .as_str()
            .is_some_and(|kind| kind.eq_ignore_ascii_case("game"));
        if !is_game {
            return Err(SkipReason::NotAGame.into());
        }

        let logo_position = &common["library_assets"]["logo_position"];
        if logo_position.is_missing() {
            return Err(SkipReason::NoLogoPosition.into());
        }

        Ok(PlacementSpec::from_logo_position(logo_position)?)
    }

    /// Compose a banner: hero centered on a header-ratio canvas, logo on top
    pub fn render(
        &self,
        placement: &PlacementSpec,
        hero: &DynamicImage,
        logo: &DynamicImage,
    ) -> Result<RgbImage, BannerError> {
        let layout = BannerLayout::compute(hero.dimensions(), logo.dimensions(), placement)?;
        debug!(?layout, position = %placement.pinned_position, "Banner layout");

        let mut canvas = RgbaImage::from_pixel(
            layout.canvas_width,
            layout.canvas_height,
            Rgba([0, 0, 0, 255]),
        );

        imageops::overlay(
            &mut canvas,
            &hero.to_rgba8(),
            layout.hero_offset.0,
            layout.hero_offset.1,
        );

        let (logo_width, logo_height) = layout.logo_size;
        let logo = imageops::resize(&logo.to_rgba8(), logo_width, logo_height, self.filter);
        imageops::overlay(&mut canvas, &logo, layout.logo_offset.0, layout.logo_offset.1);

        Ok(DynamicImage::ImageRgba8(canvas).into_rgb8())
    }

    /// [`placement`](Self::placement) followed by [`render`](Self::render)
    pub fn compose(
        &self,
        document: &Document,
        hero: &DynamicImage,
        logo: &DynamicImage,
    ) -> Result<RgbImage, BannerError> {
        let placement = Self::placement(document)?;
        self.render(&placement, hero, logo)
    }
}

impl Default for BannerCompositor {
    fn default() -> Self {
        Self::new()
    }
}
