// SPDX-License-Identifier: MPL-2.0
//! Content slots: plain text or a caller-supplied render function.

use iced::widget::Text;
use iced::Element;
use std::fmt;

/// Content a parent can place in a named area of a widget.
pub enum Slot<'a, Message> {
    Text(String),
    Custom(Box<dyn Fn() -> Element<'a, Message> + 'a>),
}

impl<'a, Message: 'a> Slot<'a, Message> {
    /// Wraps a render function.
    pub fn custom(render: impl Fn() -> Element<'a, Message> + 'a) -> Self {
        Self::Custom(Box::new(render))
    }

    #[must_use]
    pub fn render(&self) -> Element<'a, Message> {
        match self {
            Slot::Text(text) => Text::new(text.clone()).into(),
            Slot::Custom(render) => render(),
        }
    }

    /// The text of a `Text` slot.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Slot::Text(text) => Some(text),
            Slot::Custom(_) => None,
        }
    }
}

impl<Message> From<&str> for Slot<'_, Message> {
    fn from(text: &str) -> Self {
        Slot::Text(text.to_string())
    }
}

impl<Message> From<String> for Slot<'_, Message> {
    fn from(text: String) -> Self {
        Slot::Text(text)
    }
}

impl<Message> fmt::Debug for Slot<'_, Message> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Slot::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
