// SPDX-License-Identifier: MPL-2.0
//! Per-image load tracking.
//!
//! Each gallery entry owns one [`State`]. The primary source goes
//! `Loading → Ready` or `Loading → Error`; on error an optional fallback source
//! is tried once, and if that fails too a static placeholder is shown.

use crate::application::port::{DecodedImage, LoadError};
use crate::domain::ImageSource;
use iced::widget::image::Handle;
use image_rs::{DynamicImage, RgbaImage};
use std::sync::{Arc, OnceLock};

/// Observable load status of the primary source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Error,
}

/// What the view should draw for this image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Nothing decoded yet (primary or fallback in flight).
    Pending,
    Primary,
    Fallback,
    /// Static "load failed" placeholder.
    Placeholder,
}

/// A decoded image ready for the renderer.
///
/// Mirrored variants are built from the raster on first use and cached, so
/// toggling a flip back and forth reuses the same handles.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    raster: Arc<Vec<u8>>,
    /// Indexed by `flip_x | flip_y << 1`.
    handles: Arc<[OnceLock<Handle>; 4]>,
}

impl LoadedImage {
    #[must_use]
    pub fn from_decoded(image: DecodedImage) -> Self {
        let DecodedImage {
            width,
            height,
            rgba,
        } = image;
        Self {
            width,
            height,
            raster: rgba,
            handles: Arc::new(Default::default()),
        }
    }

    /// Handle for the raster mirrored as requested.
    #[must_use]
    pub fn handle(&self, flip_x: bool, flip_y: bool) -> Handle {
        let slot = usize::from(flip_x) | (usize::from(flip_y) << 1);
        self.handles[slot]
            .get_or_init(|| {
                Handle::from_rgba(self.width, self.height, self.oriented_pixels(flip_x, flip_y))
            })
            .clone()
    }

    /// RGBA bytes mirrored horizontally and/or vertically.
    #[must_use]
    pub fn oriented_pixels(&self, flip_x: bool, flip_y: bool) -> Vec<u8> {
        let pixels = self.raster.as_ref().clone();
        if !flip_x && !flip_y {
            return pixels;
        }
        let Some(buffer) = RgbaImage::from_raw(self.width, self.height, pixels) else {
            return self.raster.as_ref().clone();
        };

        let mut image = DynamicImage::ImageRgba8(buffer);
        if flip_x {
            image = image.fliph();
        }
        if flip_y {
            image = image.flipv();
        }
        image.into_rgba8().into_raw()
    }
}

/// Result reported by the loader for one source.
#[derive(Debug, Clone)]
pub enum Outcome {
    Ready(LoadedImage),
    Error(String),
}

impl From<Result<DecodedImage, LoadError>> for Outcome {
    fn from(result: Result<DecodedImage, LoadError>) -> Self {
        match result {
            Ok(image) => Self::Ready(LoadedImage::from_decoded(image)),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Loading,
    Ready,
    LoadingFallback,
    ShowingFallback,
    Failed,
}

/// Load state of one image.
#[derive(Debug, Clone)]
pub struct State {
    source: ImageSource,
    fallback: Option<ImageSource>,
    stage: Stage,
    image: Option<LoadedImage>,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The primary or fallback image is ready to draw.
    Ready,
    /// The primary source failed. Reported once per source; `fallback` is the
    /// source to request next, if any.
    Failed {
        reason: String,
        fallback: Option<ImageSource>,
    },
}

impl State {
    /// Starts tracking `source` in the Loading state.
    #[must_use]
    pub fn new(source: ImageSource, fallback: Option<ImageSource>) -> Self {
        Self {
            source,
            fallback,
            stage: Stage::Loading,
            image: None,
            error: None,
        }
    }

    /// Applies a loader report. Reports for sources this state is not
    /// waiting on are ignored.
    pub fn handle(&mut self, source: &ImageSource, outcome: Outcome) -> Effect {
        match self.stage {
            Stage::Loading if *source == self.source => match outcome {
                Outcome::Ready(image) => {
                    self.image = Some(image);
                    self.stage = Stage::Ready;
                    Effect::Ready
                }
                Outcome::Error(reason) => {
                    tracing::warn!(source = %self.source, %reason, "image failed to load");
                    self.error = Some(reason.clone());
                    self.stage = if self.fallback.is_some() {
                        Stage::LoadingFallback
                    } else {
                        Stage::Failed
                    };
                    Effect::Failed {
                        reason,
                        fallback: self.fallback.clone(),
                    }
                }
            },
            Stage::LoadingFallback if self.fallback.as_ref() == Some(source) => match outcome {
                Outcome::Ready(image) => {
                    self.image = Some(image);
                    self.stage = Stage::ShowingFallback;
                    Effect::Ready
                }
                Outcome::Error(reason) => {
                    tracing::warn!(fallback = %source, %reason, "fallback image failed to load");
                    self.stage = Stage::Failed;
                    Effect::None
                }
            },
            _ => Effect::None,
        }
    }

    #[must_use]
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Returns true when a report for `source` would be applied.
    #[must_use]
    pub fn awaits(&self, source: &ImageSource) -> bool {
        match self.stage {
            Stage::Loading => self.source == *source,
            Stage::LoadingFallback => self.fallback.as_ref() == Some(source),
            Stage::Ready | Stage::ShowingFallback | Stage::Failed => false,
        }
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        match self.stage {
            Stage::Loading => LoadStatus::Loading,
            Stage::Ready => LoadStatus::Ready,
            Stage::LoadingFallback | Stage::ShowingFallback | Stage::Failed => LoadStatus::Error,
        }
    }

    #[must_use]
    pub fn display(&self) -> Display {
        match self.stage {
            Stage::Loading | Stage::LoadingFallback => Display::Pending,
            Stage::Ready => Display::Primary,
            Stage::ShowingFallback => Display::Fallback,
            Stage::Failed => Display::Placeholder,
        }
    }

    /// The image to draw, if one is decoded.
    #[must_use]
    pub fn image(&self) -> Option<&LoadedImage> {
        match self.stage {
            Stage::Ready | Stage::ShowingFallback => self.image.as_ref(),
            _ => None,
        }
    }

    /// Error message of the primary source, once it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> LoadedImage {
        LoadedImage::from_decoded(
            DecodedImage::new(1, 1, vec![0, 0, 0, 255]).expect("valid raster"),
        )
    }

    /// 2x2 raster with one distinct red value per pixel, row-major.
    fn quad() -> LoadedImage {
        let mut rgba = Vec::new();
        for red in [1u8, 2, 3, 4] {
            rgba.extend_from_slice(&[red, 0, 0, 255]);
        }
        LoadedImage::from_decoded(DecodedImage::new(2, 2, rgba).expect("valid raster"))
    }

    fn reds(pixels: &[u8]) -> Vec<u8> {
        pixels.chunks_exact(4).map(|px| px[0]).collect()
    }

    fn src(s: &str) -> ImageSource {
        ImageSource::new(s)
    }

    #[test]
    fn starts_loading_and_pending() {
        let state = State::new(src("a.png"), None);
        assert_eq!(state.status(), LoadStatus::Loading);
        assert_eq!(state.display(), Display::Pending);
        assert!(state.image().is_none());
    }

    #[test]
    fn ready_shows_primary() {
        let mut state = State::new(src("a.png"), None);
        assert_eq!(state.handle(&src("a.png"), Outcome::Ready(pixel())), Effect::Ready);
        assert_eq!(state.status(), LoadStatus::Ready);
        assert_eq!(state.display(), Display::Primary);
        assert_eq!(state.image().map(|i| i.width), Some(1));
    }

    #[test]
    fn error_without_fallback_shows_placeholder_and_reports_once() {
        let mut state = State::new(src("a.png"), None);
        let effect = state.handle(&src("a.png"), Outcome::Error("boom".into()));
        assert_eq!(
            effect,
            Effect::Failed {
                reason: "boom".into(),
                fallback: None
            }
        );
        assert_eq!(state.status(), LoadStatus::Error);
        assert_eq!(state.display(), Display::Placeholder);
        assert_eq!(state.error(), Some("boom"));

        // A second report for the same source is ignored.
        assert_eq!(
            state.handle(&src("a.png"), Outcome::Error("again".into())),
            Effect::None
        );
    }

    #[test]
    fn error_with_fallback_requests_it_then_shows_it() {
        let mut state = State::new(src("a.png"), Some(src("missing.png")));
        let effect = state.handle(&src("a.png"), Outcome::Error("boom".into()));
        assert!(matches!(
            effect,
            Effect::Failed { fallback: Some(ref f), .. } if *f == src("missing.png")
        ));
        assert_eq!(state.display(), Display::Pending);

        assert_eq!(
            state.handle(&src("missing.png"), Outcome::Ready(pixel())),
            Effect::Ready
        );
        assert_eq!(state.status(), LoadStatus::Error);
        assert_eq!(state.display(), Display::Fallback);
        assert!(state.image().is_some());
    }

    #[test]
    fn fallback_failure_shows_placeholder_without_second_report() {
        let mut state = State::new(src("a.png"), Some(src("missing.png")));
        state.handle(&src("a.png"), Outcome::Error("boom".into()));
        assert_eq!(
            state.handle(&src("missing.png"), Outcome::Error("also".into())),
            Effect::None
        );
        assert_eq!(state.display(), Display::Placeholder);
    }

    #[test]
    fn reports_for_other_sources_are_ignored() {
        let mut state = State::new(src("a.png"), None);
        assert_eq!(state.handle(&src("b.png"), Outcome::Ready(pixel())), Effect::None);
        assert_eq!(state.status(), LoadStatus::Loading);
    }

    #[test]
    fn outcome_from_load_error_uses_display_text() {
        let outcome = Outcome::from(Err(LoadError::NotFound));
        assert!(matches!(outcome, Outcome::Error(ref msg) if msg == "Image not found"));
    }

    #[test]
    fn oriented_pixels_mirror_each_axis() {
        let image = quad();
        assert_eq!(reds(&image.oriented_pixels(false, false)), vec![1, 2, 3, 4]);
        assert_eq!(reds(&image.oriented_pixels(true, false)), vec![2, 1, 4, 3]);
        assert_eq!(reds(&image.oriented_pixels(false, true)), vec![3, 4, 1, 2]);
        assert_eq!(reds(&image.oriented_pixels(true, true)), vec![4, 3, 2, 1]);
    }

    #[test]
    fn mirrored_handles_are_cached_per_orientation() {
        let image = quad();
        let flipped = image.handle(true, false);
        assert_eq!(image.handle(true, false).id(), flipped.id());
        assert_ne!(image.handle(false, false).id(), flipped.id());
        // Clones share the cache.
        assert_eq!(image.clone().handle(true, false).id(), flipped.id());
    }

    #[test]
    fn awaits_tracks_the_pending_source() {
        let mut state = State::new(src("a.png"), Some(src("fallback.png")));
        assert!(state.awaits(&src("a.png")));
        assert!(!state.awaits(&src("fallback.png")));

        state.handle(&src("a.png"), Outcome::Error("boom".into()));
        assert!(!state.awaits(&src("a.png")));
        assert!(state.awaits(&src("fallback.png")));

        state.handle(&src("fallback.png"), Outcome::Ready(pixel()));
        assert!(!state.awaits(&src("fallback.png")));
    }
}
