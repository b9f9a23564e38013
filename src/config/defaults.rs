// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Scale**: Zoom factor bounds and step
//! - **Session**: Close animation delay and stacking order
//! - **Diagnostics**: Activity buffer capacity

// ==========================================================================
// Scale Defaults
// ==========================================================================

/// Scale of an untransformed image (1.0 = natural size).
pub const IDENTITY_SCALE: f32 = 1.0;

/// Default lower scale bound.
pub const DEFAULT_MIN_SCALE: f32 = 1.0;

/// Default upper scale bound.
pub const DEFAULT_MAX_SCALE: f32 = 50.0;

/// Smallest lower bound a configuration may request.
pub const SCALE_FLOOR: f32 = 0.01;

/// Default scale increment for zoom in/out.
pub const DEFAULT_SCALE_STEP: f32 = 0.5;

/// Minimum allowed scale step.
pub const MIN_SCALE_STEP: f32 = 0.01;

/// Maximum allowed scale step.
pub const MAX_SCALE_STEP: f32 = 10.0;

/// Degrees applied by one rotate action.
pub const ROTATION_STEP_DEGREES: f32 = 90.0;

/// Pixels of wheel scrolling that count as one line.
pub const WHEEL_PIXELS_PER_LINE: f32 = 120.0;

// ==========================================================================
// Session Defaults
// ==========================================================================

/// Default delay between a close request and the after-close notification
/// (milliseconds). Matches the fade-out of the preview mask.
pub const DEFAULT_CLOSE_DELAY_MS: u64 = 300;

/// Minimum close delay (milliseconds).
pub const MIN_CLOSE_DELAY_MS: u64 = 0;

/// Maximum close delay (milliseconds).
pub const MAX_CLOSE_DELAY_MS: u64 = 5_000;

/// Default stacking order of the preview surface.
pub const DEFAULT_Z_INDEX: i32 = 1080;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Scale validation
    assert!(SCALE_FLOOR > 0.0);
    assert!(DEFAULT_MIN_SCALE >= SCALE_FLOOR);
    assert!(DEFAULT_MIN_SCALE <= IDENTITY_SCALE);
    assert!(DEFAULT_MAX_SCALE >= IDENTITY_SCALE);
    assert!(MIN_SCALE_STEP > 0.0);
    assert!(MAX_SCALE_STEP > MIN_SCALE_STEP);
    assert!(DEFAULT_SCALE_STEP >= MIN_SCALE_STEP);
    assert!(DEFAULT_SCALE_STEP <= MAX_SCALE_STEP);

    // Close delay validation
    assert!(MAX_CLOSE_DELAY_MS >= MIN_CLOSE_DELAY_MS);
    assert!(DEFAULT_CLOSE_DELAY_MS >= MIN_CLOSE_DELAY_MS);
    assert!(DEFAULT_CLOSE_DELAY_MS <= MAX_CLOSE_DELAY_MS);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
