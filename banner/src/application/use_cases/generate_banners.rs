use std::path::PathBuf;
use std::sync::Arc;

use appinfo::{AppEntry, Container};
use tracing::{debug, info, warn};

use crate::application::compositor::BannerCompositor;
use crate::application::errors::BannerError;
use crate::application::ports::ArtworkStore;
use crate::application::results::{BannerOutcome, RunReport, SkipReason};
use crate::domain::value_objects::ArtworkKind;

/// Use case: regenerate library headers for every app in an appinfo container
pub struct GenerateBannersUseCase {
    store: Arc<dyn ArtworkStore>,
    compositor: BannerCompositor,
}

impl GenerateBannersUseCase {
    pub fn new(store: Arc<dyn ArtworkStore>) -> Self {
        Self::with_compositor(store, BannerCompositor::new())
    }

    pub fn with_compositor(store: Arc<dyn ArtworkStore>, compositor: BannerCompositor) -> Self {
        Self { store, compositor }
    }

    /// Process every app in ascending id order
    ///
    /// A failing app is logged and recorded; it never aborts the run.
    pub fn execute(&self, container: &Container) -> RunReport {
        let mut report = RunReport::new();

        for entry in container {
            let outcome = self.generate(entry);
            report.record(entry.id, &outcome);
        }

        info!(
            generated = report.generated,
            skipped = report.skipped,
            failed = report.failed.len(),
            "Banner generation finished"
        );
        report
    }

    /// Process one app
    pub fn generate(&self, entry: &AppEntry) -> BannerOutcome {
        let outcome = BannerOutcome::from(self.try_generate(entry));

        match &outcome {
            BannerOutcome::Generated(path) => {
                info!(app_id = entry.id, path = %path.display(), "Banner written");
            }
            BannerOutcome::Skipped(reason) => {
                debug!(app_id = entry.id, %reason, "Skipping app");
            }
            BannerOutcome::Failed(e) => {
                warn!(app_id = entry.id, error = %e, "Failed to generate banner");
            }
        }

        outcome
    }

    fn try_generate(&self, entry: &AppEntry) -> Result<PathBuf, BannerError> {
        let app_id = entry.id;

        // 1. Decide from metadata alone
        let placement = BannerCompositor::placement(&entry.document)?;

        // 2. Both pieces of art must be cached
        if !self.store.exists(app_id, ArtworkKind::Hero) {
            return Err(SkipReason::MissingHero.into());
        }
        if !self.store.exists(app_id, ArtworkKind::Logo) {
            return Err(SkipReason::MissingLogo.into());
        }

        // 3. Render
        let hero = self.store.load(app_id, ArtworkKind::Hero)?;
        let logo = self.store.load(app_id, ArtworkKind::Logo)?;

        info!(app_id, position = %placement.pinned_position, "Generating banner");
        let banner = self.compositor.render(&placement, &hero, &logo)?;

        // 4. Publish
        Ok(self.store.publish_header(app_id, &banner)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ArtworkError, MockArtworkStore};
    use appinfo::{ContainerWriter, Document, Node, RecordHeader, RECORD_HEADER_SIZE};
    use image::{DynamicImage, Rgba, RgbaImage};
    use mockall::predicate::eq;

    fn game(position: &str) -> Document {
        Document::new(
            "appinfo",
            Node::object([(
                "common",
                Node::object([
                    ("type", Node::leaf("game")),
                    (
                        "library_assets",
                        Node::object([(
                            "logo_position",
                            Node::object([
                                ("pinned_position", Node::leaf(position)),
                                ("width_pct", Node::leaf("40")),
                                ("height_pct", Node::leaf("60")),
                            ]),
                        )]),
                    ),
                ]),
            )]),
        )
    }

    fn entry(id: u32, document: Document) -> AppEntry {
        AppEntry {
            id,
            header: RecordHeader::from_bytes(&[0u8; RECORD_HEADER_SIZE]),
            document,
        }
    }

    fn image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 255])))
    }

    fn store_with_art() -> MockArtworkStore {
        let mut store = MockArtworkStore::new();
        store.expect_exists().returning(|_, _| true);
        store
            .expect_load()
            .returning(|_, kind| match kind {
                ArtworkKind::Logo => Ok(image(80, 40)),
                _ => Ok(image(640, 215)),
            });
        store
    }

    #[test]
    fn test_generate_happy_path() {
        // Arrange
        let mut store = store_with_art();
        store
            .expect_publish_header()
            .withf(|app_id, banner| *app_id == 440 && banner.dimensions() == (460, 215))
            .times(1)
            .returning(|_, _| Ok(PathBuf::from("440_header.jpg")));

        let use_case = GenerateBannersUseCase::new(Arc::new(store));

        // Act
        let outcome = use_case.generate(&entry(440, game("UpperCenter")));

        // Assert
        assert!(matches!(outcome, BannerOutcome::Generated(_)));
    }

    #[test]
    fn test_missing_hero_is_skipped() {
        let mut store = MockArtworkStore::new();
        store
            .expect_exists()
            .with(eq(10), eq(ArtworkKind::Hero))
            .times(1)
            .returning(|_, _| false);
        store.expect_load().never();
        store.expect_publish_header().never();

        let use_case = GenerateBannersUseCase::new(Arc::new(store));
        let outcome = use_case.generate(&entry(10, game("BottomLeft")));

        assert!(matches!(
            outcome,
            BannerOutcome::Skipped(SkipReason::MissingHero)
        ));
    }

    #[test]
    fn test_missing_logo_is_skipped() {
        let mut store = MockArtworkStore::new();
        store
            .expect_exists()
            .returning(|_, kind| kind == ArtworkKind::Hero);
        store.expect_load().never();

        let use_case = GenerateBannersUseCase::new(Arc::new(store));
        let outcome = use_case.generate(&entry(10, game("BottomLeft")));

        assert!(matches!(
            outcome,
            BannerOutcome::Skipped(SkipReason::MissingLogo)
        ));
    }

    #[test]
    fn test_non_game_never_touches_store() {
        let mut store = MockArtworkStore::new();
        store.expect_exists().never();

        let doc = Document::new(
            "appinfo",
            Node::object([("common", Node::object([("type", Node::leaf("Tool"))]))]),
        );
        let use_case = GenerateBannersUseCase::new(Arc::new(store));

        assert!(matches!(
            use_case.generate(&entry(7, doc)),
            BannerOutcome::Skipped(SkipReason::NotAGame)
        ));
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let mut store = MockArtworkStore::new();
        store.expect_exists().returning(|_, _| true);
        store.expect_load().returning(|_, _| {
            Err(ArtworkError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "truncated png",
            )))
        });
        store.expect_publish_header().never();

        let use_case = GenerateBannersUseCase::new(Arc::new(store));
        let outcome = use_case.generate(&entry(20, game("CenterCenter")));

        assert!(matches!(
            outcome,
            BannerOutcome::Failed(BannerError::Artwork(_))
        ));
    }

    #[test]
    fn test_execute_continues_after_failure() {
        // Arrange: 1 fails on its position, 2 is generated, 3 is not a game
        let mut writer = ContainerWriter::new();
        writer.add_document(1, &game("Sideways")).unwrap();
        writer.add_document(2, &game("UpperLeft")).unwrap();
        writer
            .add_document(
                3,
                &Document::new(
                    "appinfo",
                    Node::object([("common", Node::object([("type", Node::leaf("DLC"))]))]),
                ),
            )
            .unwrap();
        let container = appinfo::parse_slice(&writer.finalize()).unwrap();

        let mut store = store_with_art();
        store
            .expect_publish_header()
            .with(eq(2), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(PathBuf::from("2_header.jpg")));

        let use_case = GenerateBannersUseCase::new(Arc::new(store));

        // Act
        let report = use_case.execute(&container);

        // Assert
        assert_eq!(report.generated, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, 1);
        assert_eq!(report.total(), 3);
    }
}
