// SPDX-License-Identifier: MPL-2.0
//! Filesystem image loader.
//!
//! Treats each [`ImageSource`] as a local path and decodes it with the
//! `image` crate into an RGBA raster.

use crate::application::port::{DecodedImage, ImageLoader, LoadError};
use crate::domain::ImageSource;
use image_rs::{GenericImageView, ImageError};
use std::fs;
use std::io;

/// Extensions the loader accepts, lowercase.
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// [`ImageLoader`] reading local files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

impl FsImageLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Quick extension-based check, without touching the file.
    #[must_use]
    pub fn supports(source: &ImageSource) -> bool {
        source
            .as_path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, source: &ImageSource) -> Result<DecodedImage, LoadError> {
        if !Self::supports(source) {
            return Err(LoadError::UnsupportedFormat);
        }

        let bytes = fs::read(source.as_path()).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(err.to_string()),
        })?;

        let img = image_rs::load_from_memory(&bytes).map_err(|err| match err {
            ImageError::Unsupported(_) => LoadError::UnsupportedFormat,
            other => LoadError::Decode(other.to_string()),
        })?;

        let (width, height) = img.dimensions();
        let pixels = img.to_rgba8().into_vec();

        DecodedImage::new(width, height, pixels)
            .ok_or_else(|| LoadError::Decode(format!("empty image {width}x{height}")))
    }
}
