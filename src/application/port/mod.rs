// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the preview controllers remain
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`image`]: Image loading and decoding
//!
//! # Design Notes
//!
//! - Traits use domain types only (no Iced handles)
//! - Traits are `Send + Sync` so loads can run on a blocking pool
//! - No `async fn` - callers wrap loads in Iced's `Task`

pub mod image;

pub use image::{DecodedImage, ImageLoader, LoadError};
