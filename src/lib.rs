// SPDX-License-Identifier: MPL-2.0
//! `iced_preview` provides a zoomable, rotatable image preview with gallery
//! navigation, built with the Iced GUI framework.
//!
//! The preview controllers in [`ui::preview`] are plain state machines; the
//! [`ui::preview::Preview`] component drives them from Iced and loads images
//! through the [`application::port::ImageLoader`] port.

pub mod app;
pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
