// SPDX-License-Identifier: MPL-2.0
//! Transform value objects.
//!
//! [`TransformState`] is the immutable description of how a single previewed
//! image is drawn: zoom scale, rotation, pan offset and flips. The newtypes
//! around it ([`ScaleBounds`], [`ScaleStep`], [`CloseDelay`]) keep configured
//! values valid so controllers never have to re-check them.

use crate::config::defaults::{
    DEFAULT_CLOSE_DELAY_MS, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_SCALE_STEP,
    IDENTITY_SCALE, MAX_CLOSE_DELAY_MS, MAX_SCALE_STEP, MIN_CLOSE_DELAY_MS, MIN_SCALE_STEP,
    SCALE_FLOOR,
};
use std::time::Duration;

// =============================================================================
// ScaleBounds
// =============================================================================

/// Inclusive `[min, max]` range a transform's scale must stay in.
///
/// Construction never fails: non-finite values fall back to the defaults,
/// the lower bound is raised to [`SCALE_FLOOR`], and an upper bound below the
/// lower one collapses onto it.
///
/// # Example
///
/// ```
/// use iced_preview::domain::transform::ScaleBounds;
///
/// let bounds = ScaleBounds::new(1.0, 3.0);
/// assert_eq!(bounds.clamp(4.0), 3.0);
/// assert_eq!(bounds.clamp(0.2), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    min: f32,
    max: f32,
}

impl ScaleBounds {
    /// Creates bounds, repairing invalid input.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        let min = if min.is_finite() {
            min.max(SCALE_FLOOR)
        } else {
            DEFAULT_MIN_SCALE
        };
        let max = if max.is_finite() {
            max.max(min)
        } else {
            DEFAULT_MAX_SCALE.max(min)
        };
        Self { min, max }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(self) -> f32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(self) -> f32 {
        self.max
    }

    /// Clamps a scale into the bounds.
    #[must_use]
    pub fn clamp(self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }

    /// Returns true when `scale` sits at (or below) the lower bound.
    #[must_use]
    pub fn is_at_min(self, scale: f32) -> bool {
        scale <= self.min
    }

    /// Returns true when `scale` sits at (or above) the upper bound.
    #[must_use]
    pub fn is_at_max(self, scale: f32) -> bool {
        scale >= self.max
    }

    /// Scale used by an untransformed image: 1.0 pulled into the bounds.
    #[must_use]
    pub fn identity(self) -> f32 {
        self.clamp(IDENTITY_SCALE)
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SCALE,
            max: DEFAULT_MAX_SCALE,
        }
    }
}

// =============================================================================
// ScaleStep
// =============================================================================

/// Scale increment for one zoom in/out action, clamped to a sane range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleStep(f32);

impl ScaleStep {
    /// Creates a new step, clamping to the valid range.
    #[must_use]
    pub fn new(step: f32) -> Self {
        if step.is_finite() {
            Self(step.clamp(MIN_SCALE_STEP, MAX_SCALE_STEP))
        } else {
            Self::default()
        }
    }

    /// Returns the raw step value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ScaleStep {
    fn default() -> Self {
        Self(DEFAULT_SCALE_STEP)
    }
}

// =============================================================================
// CloseDelay
// =============================================================================

/// Delay between a close request and the after-close notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseDelay(u64);

impl CloseDelay {
    /// Creates a new delay in milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(MIN_CLOSE_DELAY_MS, MAX_CLOSE_DELAY_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for CloseDelay {
    fn default() -> Self {
        Self(DEFAULT_CLOSE_DELAY_MS)
    }
}

// =============================================================================
// TransformState
// =============================================================================

/// Translation of a zoomed image, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanOffset {
    pub x: f32,
    pub y: f32,
}

impl PanOffset {
    /// No translation.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// How one previewed image is drawn.
///
/// Plain data: every mutation goes through the transform controller, which
/// produces a new value. `rotation` accumulates in degrees without wrapping;
/// use [`normalized_rotation`](Self::normalized_rotation) for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub scale: f32,
    pub rotation: f32,
    pub pan: PanOffset,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl TransformState {
    /// Identity transform for the given bounds.
    #[must_use]
    pub fn identity(bounds: ScaleBounds) -> Self {
        Self {
            scale: bounds.identity(),
            rotation: 0.0,
            pan: PanOffset::ZERO,
            flip_x: false,
            flip_y: false,
        }
    }

    /// Rotation folded into `[0, 360)`.
    #[must_use]
    pub fn normalized_rotation(&self) -> f32 {
        self.rotation.rem_euclid(360.0)
    }

    /// Rotation in radians, folded into `[0, 2π)`.
    #[must_use]
    pub fn rotation_radians(&self) -> f32 {
        self.normalized_rotation().to_radians()
    }

    /// Returns true for quarter turns (90° / 270°), where width and height
    /// trade places on screen.
    #[must_use]
    pub fn swaps_dimensions(&self) -> bool {
        let quarter = (self.normalized_rotation() / 90.0).round();
        #[allow(clippy::cast_possible_truncation)]
        let quarter = quarter as i32;
        quarter % 2 == 1
    }

    /// Horizontal and vertical scale factors with flips applied (`-scale`
    /// when mirrored on that axis).
    #[must_use]
    pub fn signed_scale(&self) -> (f32, f32) {
        let sx = if self.flip_x { -self.scale } else { self.scale };
        let sy = if self.flip_y { -self.scale } else { self.scale };
        (sx, sy)
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity(ScaleBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_repair_inverted_range() {
        let bounds = ScaleBounds::new(4.0, 2.0);
        assert_eq!(bounds.min(), 4.0);
        assert_eq!(bounds.max(), 4.0);
    }

    #[test]
    fn bounds_raise_min_to_floor() {
        let bounds = ScaleBounds::new(0.0, 2.0);
        assert_eq!(bounds.min(), SCALE_FLOOR);
    }

    #[test]
    fn bounds_replace_non_finite_values() {
        let bounds = ScaleBounds::new(f32::NAN, f32::INFINITY);
        assert_eq!(bounds, ScaleBounds::default());
    }

    #[test]
    fn identity_scale_is_pulled_into_bounds() {
        assert_eq!(ScaleBounds::default().identity(), 1.0);
        assert_eq!(ScaleBounds::new(2.0, 5.0).identity(), 2.0);
        assert_eq!(ScaleBounds::new(0.1, 0.5).identity(), 0.5);
    }

    #[test]
    fn scale_step_clamps_to_valid_range() {
        assert_eq!(ScaleStep::new(0.0).value(), MIN_SCALE_STEP);
        assert_eq!(ScaleStep::new(100.0).value(), MAX_SCALE_STEP);
        assert_eq!(ScaleStep::new(f32::NAN), ScaleStep::default());
        assert_eq!(ScaleStep::default().value(), 0.5);
    }

    #[test]
    fn close_delay_clamps_and_converts() {
        assert_eq!(CloseDelay::from_millis(60_000).millis(), MAX_CLOSE_DELAY_MS);
        assert_eq!(
            CloseDelay::from_millis(250).as_duration(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn default_transform_is_identity() {
        let state = TransformState::default();
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.pan, PanOffset::ZERO);
        assert!(!state.flip_x);
        assert!(!state.flip_y);
    }

    #[test]
    fn rotation_normalizes_negative_angles() {
        let state = TransformState {
            rotation: -90.0,
            ..TransformState::default()
        };
        assert_eq!(state.normalized_rotation(), 270.0);
        assert!(state.swaps_dimensions());
    }

    #[test]
    fn half_turn_keeps_dimensions() {
        let state = TransformState {
            rotation: 540.0,
            ..TransformState::default()
        };
        assert_eq!(state.normalized_rotation(), 180.0);
        assert!(!state.swaps_dimensions());
    }

    #[test]
    fn signed_scale_reflects_flips() {
        let state = TransformState {
            scale: 2.0,
            flip_x: true,
            ..TransformState::default()
        };
        assert_eq!(state.signed_scale(), (-2.0, 2.0));
    }
}
