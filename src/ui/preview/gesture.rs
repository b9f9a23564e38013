// SPDX-License-Identifier: MPL-2.0
//! Gesture reducer: turns pointer, wheel and keyboard input into preview
//! actions.
//!
//! The reducer only translates. It does not check whether the session accepts
//! input or whether a gallery exists; the gallery controller applies those
//! gates to the returned [`Action`].

use super::gallery::Direction;
use super::transform;
use crate::config::WHEEL_PIXELS_PER_LINE;
use iced::keyboard::{self, key::Named};
use iced::{mouse, Event, Point};

/// Keyboard shortcuts understood by the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Close,
    Previous,
    Next,
    ZoomIn,
    ZoomOut,
}

impl KeyCommand {
    /// Maps a key to a command. Unrecognized keys return `None`.
    #[must_use]
    pub fn from_key(key: &keyboard::Key) -> Option<Self> {
        match key {
            keyboard::Key::Named(Named::Escape) => Some(Self::Close),
            keyboard::Key::Named(Named::ArrowLeft) => Some(Self::Previous),
            keyboard::Key::Named(Named::ArrowRight) => Some(Self::Next),
            keyboard::Key::Character(c) => match c.as_str() {
                "+" | "=" => Some(Self::ZoomIn),
                "-" => Some(Self::ZoomOut),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Normalized input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Relative pinch factor (1.0 = unchanged).
    Pinch(f32),
    /// Pan delta in logical pixels.
    Pan { dx: f32, dy: f32 },
    /// Wheel movement in lines; only the sign matters.
    Wheel(f32),
    Key(KeyCommand),
    PointerMoved(Point),
    PointerPressed,
    PointerReleased,
}

impl GestureEvent {
    /// Extracts a gesture from a raw iced event.
    #[must_use]
    pub fn from_iced_event(event: &Event) -> Option<Self> {
        match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                KeyCommand::from_key(key).map(Self::Key)
            }
            Event::Mouse(mouse_event) => match mouse_event {
                mouse::Event::WheelScrolled { delta } => Some(Self::Wheel(scroll_steps(delta))),
                mouse::Event::CursorMoved { position } => Some(Self::PointerMoved(*position)),
                mouse::Event::ButtonPressed(mouse::Button::Left) => Some(Self::PointerPressed),
                mouse::Event::ButtonReleased(mouse::Button::Left) | mouse::Event::CursorLeft => {
                    Some(Self::PointerReleased)
                }
                _ => None,
            },
            _ => None,
        }
    }
}

/// What the gallery should do in response to a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Transform(transform::Message),
    Close,
    Navigate(Direction),
}

/// Pointer tracking for drag-to-pan.
#[derive(Debug, Clone, Default)]
pub struct State {
    cursor: Option<Point>,
    /// Last cursor position seen while the button is held.
    drag_anchor: Option<Point>,
}

impl State {
    /// Reduces one event to an action. `scale` is the active transform's scale,
    /// used to turn a relative pinch into an absolute one.
    pub fn handle(&mut self, event: GestureEvent, scale: f32) -> Action {
        match event {
            GestureEvent::Pinch(factor) => {
                if factor.is_finite() && factor > 0.0 {
                    Action::Transform(transform::Message::SetScale(scale * factor))
                } else {
                    Action::None
                }
            }
            GestureEvent::Pan { dx, dy } => Action::Transform(transform::Message::Pan { dx, dy }),
            GestureEvent::Wheel(steps) => {
                if steps > 0.0 {
                    Action::Transform(transform::Message::ZoomIn)
                } else if steps < 0.0 {
                    Action::Transform(transform::Message::ZoomOut)
                } else {
                    Action::None
                }
            }
            GestureEvent::Key(command) => match command {
                KeyCommand::Close => Action::Close,
                KeyCommand::Previous => Action::Navigate(Direction::Previous),
                KeyCommand::Next => Action::Navigate(Direction::Next),
                KeyCommand::ZoomIn => Action::Transform(transform::Message::ZoomIn),
                KeyCommand::ZoomOut => Action::Transform(transform::Message::ZoomOut),
            },
            GestureEvent::PointerMoved(position) => {
                self.cursor = Some(position);
                match self.drag_anchor {
                    Some(anchor) => {
                        self.drag_anchor = Some(position);
                        Action::Transform(transform::Message::Pan {
                            dx: position.x - anchor.x,
                            dy: position.y - anchor.y,
                        })
                    }
                    None => Action::None,
                }
            }
            GestureEvent::PointerPressed => {
                self.drag_anchor = self.cursor;
                Action::None
            }
            GestureEvent::PointerReleased => {
                self.cancel();
                Action::None
            }
        }
    }

    /// Drops any drag in progress.
    pub fn cancel(&mut self) {
        self.drag_anchor = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }
}

/// Normalizes mouse wheel units (lines vs. pixels) into line steps.
fn scroll_steps(delta: &mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => *y,
        mouse::ScrollDelta::Pixels { y, .. } => *y / WHEEL_PIXELS_PER_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::{Location, Modifiers};

    fn key_event(key: keyboard::Key) -> Event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: key.clone(),
            modified_key: key.clone(),
            physical_key: keyboard::key::Physical::Code(keyboard::key::Code::KeyA),
            location: Location::Standard,
            modifiers: Modifiers::default(),
            text: None,
            repeat: false,
        })
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Named(Named::Escape)),
            Some(KeyCommand::Close)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Named(Named::ArrowLeft)),
            Some(KeyCommand::Previous)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Named(Named::ArrowRight)),
            Some(KeyCommand::Next)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Character("+".into())),
            Some(KeyCommand::ZoomIn)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Character("=".into())),
            Some(KeyCommand::ZoomIn)
        );
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Character("-".into())),
            Some(KeyCommand::ZoomOut)
        );
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        assert_eq!(
            KeyCommand::from_key(&keyboard::Key::Character("q".into())),
            None
        );
        assert_eq!(KeyCommand::from_key(&keyboard::Key::Named(Named::Tab)), None);
        assert_eq!(
            GestureEvent::from_iced_event(&key_event(keyboard::Key::Named(Named::Enter))),
            None
        );
    }

    #[test]
    fn iced_key_press_becomes_key_gesture() {
        assert_eq!(
            GestureEvent::from_iced_event(&key_event(keyboard::Key::Named(Named::Escape))),
            Some(GestureEvent::Key(KeyCommand::Close))
        );
    }

    #[test]
    fn pixel_wheel_is_normalized_to_lines() {
        let event = Event::Mouse(mouse::Event::WheelScrolled {
            delta: mouse::ScrollDelta::Pixels { x: 0.0, y: -240.0 },
        });
        assert_eq!(
            GestureEvent::from_iced_event(&event),
            Some(GestureEvent::Wheel(-2.0))
        );
    }

    #[test]
    fn wheel_zooms_by_sign() {
        let mut state = State::default();
        assert!(matches!(
            state.handle(GestureEvent::Wheel(0.25), 1.0),
            Action::Transform(transform::Message::ZoomIn)
        ));
        assert!(matches!(
            state.handle(GestureEvent::Wheel(-3.0), 1.0),
            Action::Transform(transform::Message::ZoomOut)
        ));
        assert!(matches!(
            state.handle(GestureEvent::Wheel(0.0), 1.0),
            Action::None
        ));
    }

    #[test]
    fn pinch_scales_relative_to_current() {
        let mut state = State::default();
        assert_eq!(
            state.handle(GestureEvent::Pinch(1.5), 2.0),
            Action::Transform(transform::Message::SetScale(3.0))
        );
        assert_eq!(state.handle(GestureEvent::Pinch(0.0), 2.0), Action::None);
        assert_eq!(state.handle(GestureEvent::Pinch(f32::NAN), 2.0), Action::None);
    }

    #[test]
    fn keys_reduce_to_actions() {
        let mut state = State::default();
        assert_eq!(
            state.handle(GestureEvent::Key(KeyCommand::Close), 1.0),
            Action::Close
        );
        assert_eq!(
            state.handle(GestureEvent::Key(KeyCommand::Next), 1.0),
            Action::Navigate(Direction::Next)
        );
        assert_eq!(
            state.handle(GestureEvent::Key(KeyCommand::ZoomOut), 1.0),
            Action::Transform(transform::Message::ZoomOut)
        );
    }

    #[test]
    fn drag_produces_incremental_pan_deltas() {
        let mut state = State::default();
        state.handle(GestureEvent::PointerMoved(Point::new(10.0, 10.0)), 2.0);
        state.handle(GestureEvent::PointerPressed, 2.0);
        assert!(state.is_dragging());

        assert_eq!(
            state.handle(GestureEvent::PointerMoved(Point::new(15.0, 8.0)), 2.0),
            Action::Transform(transform::Message::Pan { dx: 5.0, dy: -2.0 })
        );
        assert_eq!(
            state.handle(GestureEvent::PointerMoved(Point::new(20.0, 8.0)), 2.0),
            Action::Transform(transform::Message::Pan { dx: 5.0, dy: 0.0 })
        );

        state.handle(GestureEvent::PointerReleased, 2.0);
        assert!(!state.is_dragging());
        assert_eq!(
            state.handle(GestureEvent::PointerMoved(Point::new(30.0, 30.0)), 2.0),
            Action::None
        );
    }

    #[test]
    fn cancel_drops_drag_in_progress() {
        let mut state = State::default();
        state.handle(GestureEvent::PointerMoved(Point::new(0.0, 0.0)), 2.0);
        state.handle(GestureEvent::PointerPressed, 2.0);
        state.cancel();
        assert_eq!(
            state.handle(GestureEvent::PointerMoved(Point::new(5.0, 5.0)), 2.0),
            Action::None
        );
    }
}
