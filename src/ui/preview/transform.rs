// SPDX-License-Identifier: MPL-2.0
//! Transform sub-component: zoom, rotation, flips and pan of the active image.
//!
//! Every operation is total. Scale changes are clamped into the configured
//! bounds, and pan is discarded whenever the scale sits at its lower bound.

use crate::config::ROTATION_STEP_DEGREES;
use crate::domain::{PanOffset, ScaleBounds, ScaleStep, TransformState};

/// Per-session transform configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub bounds: ScaleBounds,
    pub step: ScaleStep,
    /// Whether a zoomed image can be panned.
    pub movable: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bounds: ScaleBounds::default(),
            step: ScaleStep::default(),
            movable: true,
        }
    }
}

/// Transform sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    current: TransformState,
    settings: Settings,
    /// Number of resets performed, for observers that need to tell a reset
    /// apart from an ordinary change.
    resets: u64,
}

/// Messages for the transform sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    ZoomIn,
    ZoomOut,
    RotateLeft,
    RotateRight,
    FlipX,
    FlipY,
    /// Translate by a delta in logical pixels.
    Pan { dx: f32, dy: f32 },
    /// Set an absolute scale (clamped).
    SetScale(f32),
    /// Back to the identity transform.
    Reset,
}

/// Effects produced by transform changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// The transform changed.
    Changed,
    /// The transform was reset to identity.
    Reset,
}

impl Default for State {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl State {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            current: TransformState::identity(settings.bounds),
            settings,
            resets: 0,
        }
    }

    /// Handle a transform message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        let bounds = self.settings.bounds;
        let previous = self.current;

        match msg {
            Message::ZoomIn => {
                self.set_scale(previous.scale + self.settings.step.value());
            }
            Message::ZoomOut => {
                self.set_scale(previous.scale - self.settings.step.value());
            }
            Message::SetScale(scale) => {
                if !scale.is_finite() {
                    return Effect::None;
                }
                self.set_scale(scale);
            }
            Message::RotateLeft => self.current.rotation -= ROTATION_STEP_DEGREES,
            Message::RotateRight => self.current.rotation += ROTATION_STEP_DEGREES,
            Message::FlipX => self.current.flip_x = !self.current.flip_x,
            Message::FlipY => self.current.flip_y = !self.current.flip_y,
            Message::Pan { dx, dy } => {
                if !self.can_pan() || !dx.is_finite() || !dy.is_finite() {
                    return Effect::None;
                }
                self.current.pan = previous.pan.translated(dx, dy);
            }
            Message::Reset => {
                self.current = TransformState::identity(bounds);
                self.resets = self.resets.wrapping_add(1);
                return Effect::Reset;
            }
        }

        if self.current == previous {
            Effect::None
        } else {
            Effect::Changed
        }
    }

    fn set_scale(&mut self, scale: f32) {
        let bounds = self.settings.bounds;
        self.current.scale = bounds.clamp(scale);
        if bounds.is_at_min(self.current.scale) {
            self.current.pan = PanOffset::ZERO;
        }
    }

    /// Current transform.
    #[must_use]
    pub fn current(&self) -> TransformState {
        self.current
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Returns true when a pan message would move the image.
    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.settings.movable && !self.settings.bounds.is_at_min(self.current.scale)
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        !self.settings.bounds.is_at_max(self.current.scale)
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        !self.settings.bounds.is_at_min(self.current.scale)
    }

    /// Number of resets performed since creation.
    #[must_use]
    pub fn reset_count(&self) -> u64 {
        self.resets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(min: f32, max: f32, step: f32, movable: bool) -> Settings {
        Settings {
            bounds: ScaleBounds::new(min, max),
            step: ScaleStep::new(step),
            movable,
        }
    }

    #[test]
    fn default_state_is_identity() {
        let state = State::default();
        assert_eq!(state.current(), TransformState::default());
        assert_eq!(state.reset_count(), 0);
    }

    #[test]
    fn zoom_in_adds_step_and_clamps_to_max() {
        let mut state = State::new(settings(1.0, 2.0, 0.5, true));
        assert!(matches!(state.handle(Message::ZoomIn), Effect::Changed));
        assert_eq!(state.current().scale, 1.5);
        assert!(matches!(state.handle(Message::ZoomIn), Effect::Changed));
        assert_eq!(state.current().scale, 2.0);
        assert!(matches!(state.handle(Message::ZoomIn), Effect::None));
        assert_eq!(state.current().scale, 2.0);
        assert!(!state.can_zoom_in());
    }

    #[test]
    fn zoom_out_at_min_is_a_no_op() {
        let mut state = State::default();
        assert!(matches!(state.handle(Message::ZoomOut), Effect::None));
        assert_eq!(state.current().scale, 1.0);
    }

    #[test]
    fn scale_stays_in_bounds_under_any_sequence() {
        let mut state = State::new(settings(0.5, 3.0, 0.7, true));
        let sequence = [
            Message::ZoomIn,
            Message::ZoomIn,
            Message::SetScale(100.0),
            Message::ZoomIn,
            Message::ZoomOut,
            Message::SetScale(-4.0),
            Message::ZoomOut,
            Message::SetScale(f32::NAN),
            Message::SetScale(f32::INFINITY),
            Message::ZoomIn,
        ];
        for msg in sequence {
            state.handle(msg);
            let scale = state.current().scale;
            assert!((0.5..=3.0).contains(&scale), "scale {scale} out of bounds");
        }
    }

    #[test]
    fn set_scale_ignores_non_finite_values() {
        let mut state = State::default();
        assert!(matches!(
            state.handle(Message::SetScale(f32::NAN)),
            Effect::None
        ));
        assert_eq!(state.current().scale, 1.0);
    }

    #[test]
    fn pan_is_ignored_at_min_scale() {
        let mut state = State::default();
        assert!(matches!(
            state.handle(Message::Pan { dx: 10.0, dy: 5.0 }),
            Effect::None
        ));
        assert_eq!(state.current().pan, PanOffset::ZERO);
    }

    #[test]
    fn pan_is_ignored_when_not_movable() {
        let mut state = State::new(settings(1.0, 50.0, 0.5, false));
        state.handle(Message::ZoomIn);
        assert!(matches!(
            state.handle(Message::Pan { dx: 10.0, dy: 5.0 }),
            Effect::None
        ));
        assert_eq!(state.current().pan, PanOffset::ZERO);
    }

    #[test]
    fn pan_accumulates_when_zoomed() {
        let mut state = State::default();
        state.handle(Message::ZoomIn);
        state.handle(Message::Pan { dx: 10.0, dy: 5.0 });
        state.handle(Message::Pan { dx: -4.0, dy: 1.0 });
        assert_eq!(state.current().pan, PanOffset::new(6.0, 6.0));
    }

    #[test]
    fn zooming_back_to_min_clears_pan() {
        let mut state = State::default();
        state.handle(Message::ZoomIn);
        state.handle(Message::Pan { dx: 10.0, dy: 5.0 });
        state.handle(Message::ZoomOut);
        assert_eq!(state.current().scale, 1.0);
        assert_eq!(state.current().pan, PanOffset::ZERO);
    }

    #[test]
    fn rotation_accumulates_without_clamping() {
        let mut state = State::default();
        for _ in 0..5 {
            state.handle(Message::RotateRight);
        }
        assert_eq!(state.current().rotation, 450.0);
        assert_eq!(state.current().normalized_rotation(), 90.0);
        state.handle(Message::RotateLeft);
        state.handle(Message::RotateLeft);
        assert_eq!(state.current().rotation, 270.0);
    }

    #[test]
    fn flips_toggle_independently() {
        let mut state = State::default();
        state.handle(Message::FlipX);
        assert!(state.current().flip_x);
        assert!(!state.current().flip_y);
        state.handle(Message::FlipY);
        state.handle(Message::FlipX);
        assert!(!state.current().flip_x);
        assert!(state.current().flip_y);
    }

    #[test]
    fn reset_restores_identity_and_counts() {
        let mut state = State::default();
        state.handle(Message::ZoomIn);
        state.handle(Message::RotateRight);
        state.handle(Message::FlipY);
        state.handle(Message::Pan { dx: 3.0, dy: 3.0 });

        assert!(matches!(state.handle(Message::Reset), Effect::Reset));
        assert_eq!(state.current(), TransformState::default());
        assert_eq!(state.reset_count(), 1);
    }

    #[test]
    fn identity_scale_respects_raised_min() {
        let mut state = State::new(settings(2.0, 4.0, 0.5, true));
        assert_eq!(state.current().scale, 2.0);
        state.handle(Message::ZoomIn);
        state.handle(Message::Reset);
        assert_eq!(state.current().scale, 2.0);
    }
}
