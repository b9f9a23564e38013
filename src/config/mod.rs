// SPDX-License-Identifier: MPL-2.0
//! This module handles the preview configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[preview]` - Session and transform settings (scale bounds, step, movable,
//!   close delay, stacking order)
//! - `[gallery]` - Multi-image behavior (index policy, fallback image)
//!
//! Every field is optional. Missing fields take the values in [`defaults`];
//! out-of-range values are clamped by the domain newtypes when the settings
//! are handed to the controllers.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`/`save_with_override()`
//! 3. Set `ICED_PREVIEW_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_preview::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.preview.max_scale = Some(8.0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::{CloseDelay, ImageSource, ScaleBounds, ScaleStep};
use crate::error::{Error, Result};
use crate::ui::preview::gallery::{self, IndexPolicy};
use crate::ui::preview::{session, transform};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "IcedPreview";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_PREVIEW_CONFIG_DIR";

/// Warning key returned by [`load`] when the file exists but cannot be parsed.
pub const CONFIG_LOAD_ERROR_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Preview session and transform settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewConfig {
    /// Scale added or removed by one zoom action.
    #[serde(default = "default_scale_step", skip_serializing_if = "Option::is_none")]
    pub scale_step: Option<f32>,

    /// Lower scale bound.
    #[serde(default = "default_min_scale", skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f32>,

    /// Upper scale bound.
    #[serde(default = "default_max_scale", skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f32>,

    /// Whether a zoomed image can be panned.
    #[serde(default = "default_movable", skip_serializing_if = "Option::is_none")]
    pub movable: Option<bool>,

    /// Keep the preview content mounted while hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_render: Option<bool>,

    /// Stacking order of the preview surface.
    #[serde(default = "default_z_index", skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,

    /// Delay before the after-close notification (milliseconds).
    #[serde(
        default = "default_close_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub close_delay_ms: Option<u64>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            scale_step: default_scale_step(),
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            movable: default_movable(),
            force_render: Some(false),
            z_index: default_z_index(),
            close_delay_ms: default_close_delay_ms(),
        }
    }
}

/// Gallery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GalleryConfig {
    /// How the active index follows a replaced image list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_policy: Option<IndexPolicy>,

    /// Image shown when a source fails to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Preview configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Session and transform settings.
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Gallery settings.
    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl Config {
    /// Settings for the transform controller.
    #[must_use]
    pub fn transform_settings(&self) -> transform::Settings {
        let p = &self.preview;
        transform::Settings {
            bounds: ScaleBounds::new(
                p.min_scale.unwrap_or(DEFAULT_MIN_SCALE),
                p.max_scale.unwrap_or(DEFAULT_MAX_SCALE),
            ),
            step: ScaleStep::new(p.scale_step.unwrap_or(DEFAULT_SCALE_STEP)),
            movable: p.movable.unwrap_or(true),
        }
    }

    /// Settings for the preview session.
    #[must_use]
    pub fn session_settings(&self) -> session::Settings {
        let p = &self.preview;
        session::Settings {
            close_delay: CloseDelay::from_millis(
                p.close_delay_ms.unwrap_or(DEFAULT_CLOSE_DELAY_MS),
            ),
            force_render: p.force_render.unwrap_or(false),
            z_index: p.z_index.unwrap_or(DEFAULT_Z_INDEX),
        }
    }

    /// Settings for the gallery group.
    #[must_use]
    pub fn gallery_settings(&self) -> gallery::Settings {
        gallery::Settings {
            index_policy: self.gallery.index_policy.unwrap_or_default(),
            fallback: self
                .gallery
                .fallback
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(ImageSource::new),
            transform: self.transform_settings(),
            session: self.session_settings(),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_scale_step() -> Option<f32> {
    Some(DEFAULT_SCALE_STEP)
}

fn default_min_scale() -> Option<f32> {
    Some(DEFAULT_MIN_SCALE)
}

fn default_max_scale() -> Option<f32> {
    Some(DEFAULT_MAX_SCALE)
}

fn default_movable() -> Option<bool> {
    Some(true)
}

fn default_z_index() -> Option<i32> {
    Some(DEFAULT_Z_INDEX)
}

fn default_close_delay_ms() -> Option<u64> {
    Some(DEFAULT_CLOSE_DELAY_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory with an optional override.
///
/// # Resolution Order
///
/// 1. `override_path` parameter (if `Some`) - most specific, for tests
/// 2. `ICED_PREVIEW_CONFIG_DIR` environment variable (if set and non-empty)
/// 3. Platform-specific config directory (with app name appended)
#[must_use]
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
#[must_use]
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(CONFIG_LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            preview: PreviewConfig {
                scale_step: Some(0.25),
                min_scale: Some(0.5),
                max_scale: Some(8.0),
                movable: Some(false),
                force_render: Some(true),
                z_index: Some(42),
                close_delay_ms: Some(150),
            },
            gallery: GalleryConfig {
                index_policy: Some(IndexPolicy::TrackSource),
                fallback: Some("missing.png".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[preview\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_ERROR_KEY));
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_sections_use_field_defaults() {
        let config: Config = toml::from_str("[preview]\nmax_scale = 3.0\n").expect("valid toml");
        assert_eq!(config.preview.max_scale, Some(3.0));
        assert_eq!(config.preview.scale_step, Some(DEFAULT_SCALE_STEP));
        assert_eq!(config.preview.min_scale, Some(DEFAULT_MIN_SCALE));
        assert_eq!(config.gallery, GalleryConfig::default());
    }

    #[test]
    fn index_policy_uses_kebab_case() {
        let config: Config =
            toml::from_str("[gallery]\nindex_policy = \"track-source\"\n").expect("valid toml");
        assert_eq!(config.gallery.index_policy, Some(IndexPolicy::TrackSource));
    }

    #[test]
    fn transform_settings_clamp_out_of_range_values() {
        let config = Config {
            preview: PreviewConfig {
                scale_step: Some(-3.0),
                min_scale: Some(5.0),
                max_scale: Some(2.0),
                ..PreviewConfig::default()
            },
            ..Config::default()
        };

        let settings = config.transform_settings();
        assert_eq!(settings.step.value(), MIN_SCALE_STEP);
        assert_eq!(settings.bounds.min(), 5.0);
        assert_eq!(settings.bounds.max(), 5.0);
    }

    #[test]
    fn gallery_settings_ignore_blank_fallback() {
        let config = Config {
            gallery: GalleryConfig {
                index_policy: None,
                fallback: Some("   ".to_string()),
            },
            ..Config::default()
        };
        let settings = config.gallery_settings();
        assert!(settings.fallback.is_none());
        assert_eq!(settings.index_policy, IndexPolicy::Clamp);
    }

    #[test]
    fn session_settings_use_defaults() {
        let settings = Config::default().session_settings();
        assert_eq!(settings.close_delay.millis(), DEFAULT_CLOSE_DELAY_MS);
        assert_eq!(settings.z_index, DEFAULT_Z_INDEX);
        assert!(!settings.force_render);
    }
}
