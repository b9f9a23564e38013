// SPDX-License-Identifier: MPL-2.0
//! Routing of native events to the preview.

use super::Message;
use crate::ui::preview::component;
use iced::{event, Subscription};

/// Forwards keyboard and pointer events that no widget captured.
///
/// Only subscribed while the preview accepts input, so closed previews never
/// see stray keys.
pub fn create_event_subscription(preview_accepts_input: bool) -> Subscription<Message> {
    if !preview_accepts_input {
        return Subscription::none();
    }

    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }
        if matches!(event, event::Event::Keyboard(_) | event::Event::Mouse(_)) {
            Some(Message::Preview(component::Message::RawEvent(event)))
        } else {
            None
        }
    })
}
