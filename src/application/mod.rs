// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports the preview controllers depend on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer (`ui::preview`) consumes ports through the component glue
//!
//! # Example
//!
//! ```ignore
//! use iced_preview::application::port::ImageLoader;
//! use iced_preview::infrastructure::FsImageLoader;
//!
//! let loader: std::sync::Arc<dyn ImageLoader> = std::sync::Arc::new(FsImageLoader::new());
//! ```

pub mod port;
