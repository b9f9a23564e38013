// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Follows the Elm-style "state down, messages up" pattern: controllers own
//! their state, handle messages and report effects to the caller.
//!
//! - [`preview`] - Image preview with transforms and gallery navigation
//! - [`slot`] - Text-or-element content slots supplied by the caller

pub mod preview;
pub mod slot;
