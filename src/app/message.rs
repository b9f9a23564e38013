// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and startup flags.

use crate::ui::preview::component;
use std::path::PathBuf;

/// Command-line options passed to [`super::run`].
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Overrides the config directory (`--config-dir`).
    pub config_dir: Option<PathBuf>,
    /// Images to show, in gallery order.
    pub images: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Preview(component::Message),
    /// Copy the diagnostics trail to the clipboard as JSON.
    ExportDiagnostics,
}
