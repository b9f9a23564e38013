// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`fs_loader`]: Local file decoding via the `image` crate (implements [`ImageLoader`])
//!
//! [`ImageLoader`]: crate::application::port::ImageLoader

pub mod fs_loader;

pub use fs_loader::FsImageLoader;
