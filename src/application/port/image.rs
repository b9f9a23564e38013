// SPDX-License-Identifier: MPL-2.0
//! Image loading port definition.
//!
//! The preview never fetches pixels itself. It asks an [`ImageLoader`] for a
//! source and records whatever outcome comes back: a decoded raster or a
//! [`LoadError`]. Retrying is the loader's business.

use crate::domain::ImageSource;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// LoadError
// =============================================================================

/// Errors an image loader can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source does not exist.
    NotFound,

    /// The format is not supported by the loader.
    UnsupportedFormat,

    /// The data could not be decoded.
    Decode(String),

    /// The source could not be read.
    Io(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound => write!(f, "Image not found"),
            LoadError::UnsupportedFormat => write!(f, "Unsupported image format"),
            LoadError::Decode(msg) => write!(f, "Decoding failed: {msg}"),
            LoadError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

// =============================================================================
// DecodedImage
// =============================================================================

/// RGBA8 raster produced by a loader.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub rgba: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wraps raw pixels, returning `None` if the buffer length does not match
    /// the dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba.len() == expected && width > 0 && height > 0).then(|| Self {
            width,
            height,
            rgba: Arc::new(rgba),
        })
    }
}

// =============================================================================
// ImageLoader Trait
// =============================================================================

/// Port for loading images.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the component glue calls `load`
/// from tokio's blocking pool.
///
/// # Example
///
/// ```
/// use iced_preview::application::port::{DecodedImage, ImageLoader, LoadError};
/// use iced_preview::domain::ImageSource;
///
/// struct Solid;
///
/// impl ImageLoader for Solid {
///     fn load(&self, _source: &ImageSource) -> Result<DecodedImage, LoadError> {
///         DecodedImage::new(1, 1, vec![255, 0, 0, 255]).ok_or(LoadError::UnsupportedFormat)
///     }
/// }
///
/// assert!(Solid.load(&ImageSource::new("red")).is_ok());
/// ```
pub trait ImageLoader: Send + Sync {
    /// Loads and decodes the image behind `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the source is missing, unreadable or
    /// cannot be decoded.
    fn load(&self, source: &ImageSource) -> Result<DecodedImage, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_display() {
        assert_eq!(format!("{}", LoadError::NotFound), "Image not found");
        assert!(format!("{}", LoadError::Decode("bad header".into())).contains("bad header"));
        assert!(format!("{}", LoadError::Io("denied".into())).contains("denied"));
    }

    #[test]
    fn decoded_image_validates_buffer_length() {
        assert!(DecodedImage::new(2, 2, vec![0; 16]).is_some());
        assert!(DecodedImage::new(2, 2, vec![0; 15]).is_none());
        assert!(DecodedImage::new(0, 2, Vec::new()).is_none());
    }
}
