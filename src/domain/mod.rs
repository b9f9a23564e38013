// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects shared by the preview controllers.
//!
//! Nothing here knows about Iced: these types describe *what* is previewed
//! and *how* it is transformed, leaving rendering to the UI layer.
//!
//! # Modules
//!
//! - [`source`]: Image identifiers ([`ImageSource`](source::ImageSource))
//! - [`transform`]: Transform values ([`TransformState`](transform::TransformState),
//!   [`ScaleBounds`](transform::ScaleBounds), [`ScaleStep`](transform::ScaleStep),
//!   [`CloseDelay`](transform::CloseDelay))

pub mod source;
pub mod transform;

pub use source::ImageSource;
pub use transform::{CloseDelay, PanOffset, ScaleBounds, ScaleStep, TransformState};
