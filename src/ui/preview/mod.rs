// SPDX-License-Identifier: MPL-2.0
//! Image preview and gallery synchronization.
//!
//! The preview is split into small controllers that each own one concern:
//!
//! - [`transform`] - Scale, rotation, flip and pan of the displayed image
//! - [`gesture`] - Translation of pointer, wheel and key input into actions
//! - [`session`] - Open/closing/closed lifecycle and the after-close timer
//! - [`load`] - Per-image load status with fallback handling
//! - [`gallery`] - The image list, active index and navigation
//!
//! [`component`] glues them to Iced (tasks, events) and [`view`] renders
//! the overlay.

pub mod component;
pub mod gallery;
pub mod gesture;
pub mod load;
pub mod session;
pub mod transform;
pub mod view;

pub use component::{Event, Message, Preview};
pub use gallery::{Direction, IndexPolicy, NavigationInfo};
pub use view::ViewContext;
