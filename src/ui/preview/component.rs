// SPDX-License-Identifier: MPL-2.0
//! Iced component wrapping the gallery controller.
//!
//! The controllers are synchronous state machines. This layer turns their
//! effects into [`Task`]s (image loads on tokio's blocking pool, the
//! after-close timer) and into [`Event`]s for the parent.

use super::gallery::{self, Direction};
use super::gesture::{GestureEvent, KeyCommand};
use super::{load, transform, view};
use crate::application::port::{ImageLoader, LoadError};
use crate::diagnostics::UserAction;
use crate::domain::ImageSource;
use iced::{Element, Task};
use std::sync::Arc;
use std::time::Duration;

/// Messages for the preview component.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    /// Keyboard or mouse event from the window.
    RawEvent(iced::Event),
}

/// Notifications for the parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Visibility changed, or was requested in controlled mode.
    VisibilityChanged(bool),
    /// The close delay elapsed after a close.
    AfterClose,
    Navigated(usize),
    ImageReady(usize),
    /// A primary source failed to load.
    LoadFailed {
        index: usize,
        source: ImageSource,
        reason: String,
    },
}

impl Message {
    /// The user action this message represents, for the diagnostics trail.
    #[must_use]
    pub fn user_action(&self) -> Option<UserAction> {
        match self {
            Message::Gallery(msg) => match msg {
                gallery::Message::OpenPreview(index) => {
                    Some(UserAction::OpenPreview { index: *index })
                }
                gallery::Message::Next => Some(UserAction::NavigateNext),
                gallery::Message::Previous => Some(UserAction::NavigatePrevious),
                gallery::Message::ClosePreview => Some(UserAction::ClosePreview),
                gallery::Message::SetImages(sources) => Some(UserAction::ReplaceImages {
                    count: sources.len(),
                }),
                gallery::Message::Transform(msg) => transform_action(*msg),
                gallery::Message::Gesture(event) => gesture_action(event),
                gallery::Message::Observe(_)
                | gallery::Message::CloseElapsed(_)
                | gallery::Message::Loaded { .. } => None,
            },
            Message::RawEvent(event) => {
                GestureEvent::from_iced_event(event).and_then(|g| gesture_action(&g))
            }
        }
    }
}

fn transform_action(msg: transform::Message) -> Option<UserAction> {
    match msg {
        transform::Message::ZoomIn => Some(UserAction::ZoomIn),
        transform::Message::ZoomOut => Some(UserAction::ZoomOut),
        transform::Message::RotateLeft => Some(UserAction::RotateLeft),
        transform::Message::RotateRight => Some(UserAction::RotateRight),
        transform::Message::FlipX => Some(UserAction::FlipX),
        transform::Message::FlipY => Some(UserAction::FlipY),
        transform::Message::Reset => Some(UserAction::ResetTransform),
        transform::Message::Pan { .. } | transform::Message::SetScale(_) => None,
    }
}

fn gesture_action(event: &GestureEvent) -> Option<UserAction> {
    match event {
        GestureEvent::Key(command) => Some(match command {
            KeyCommand::Close => UserAction::ClosePreview,
            KeyCommand::Previous => UserAction::NavigatePrevious,
            KeyCommand::Next => UserAction::NavigateNext,
            KeyCommand::ZoomIn => UserAction::ZoomIn,
            KeyCommand::ZoomOut => UserAction::ZoomOut,
        }),
        GestureEvent::Wheel(steps) if *steps > 0.0 => Some(UserAction::ZoomIn),
        GestureEvent::Wheel(steps) if *steps < 0.0 => Some(UserAction::ZoomOut),
        GestureEvent::Pinch(factor) => Some(UserAction::Pinch { factor: *factor }),
        GestureEvent::Pan { .. } => Some(UserAction::Pan),
        _ => None,
    }
}

/// Image preview with optional gallery navigation.
pub struct Preview {
    gallery: gallery::State,
    loader: Arc<dyn ImageLoader>,
}

impl std::fmt::Debug for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preview")
            .field("gallery", &self.gallery)
            .finish_non_exhaustive()
    }
}

impl Preview {
    /// Creates a gallery preview and starts loading every image.
    pub fn new(
        sources: Vec<ImageSource>,
        settings: gallery::Settings,
        loader: Arc<dyn ImageLoader>,
    ) -> (Self, Task<Message>) {
        Self::start(gallery::State::new(sources, settings), loader)
    }

    /// Creates a preview of a single image.
    pub fn single(
        source: ImageSource,
        settings: gallery::Settings,
        loader: Arc<dyn ImageLoader>,
    ) -> (Self, Task<Message>) {
        Self::start(gallery::State::single(source, settings), loader)
    }

    /// Creates a gallery preview whose visibility is owned by the parent.
    pub fn controlled(
        sources: Vec<ImageSource>,
        settings: gallery::Settings,
        visible: bool,
        loader: Arc<dyn ImageLoader>,
    ) -> (Self, Task<Message>) {
        Self::start(gallery::State::controlled(sources, settings, visible), loader)
    }

    fn start(gallery: gallery::State, loader: Arc<dyn ImageLoader>) -> (Self, Task<Message>) {
        let preview = Self { gallery, loader };
        let task = preview.load_all(preview.gallery.pending_loads());
        (preview, task)
    }

    pub fn update(&mut self, message: Message) -> (Event, Task<Message>) {
        let effect = match message {
            Message::Gallery(msg) => self.gallery.handle(msg),
            Message::RawEvent(event) => match GestureEvent::from_iced_event(&event) {
                Some(gesture) => self.gallery.handle(gallery::Message::Gesture(gesture)),
                None => gallery::Effect::None,
            },
        };
        self.apply(effect)
    }

    fn apply(&self, effect: gallery::Effect) -> (Event, Task<Message>) {
        match effect {
            gallery::Effect::None | gallery::Effect::TransformChanged => {
                (Event::None, Task::none())
            }
            gallery::Effect::Navigated(index) => (Event::Navigated(index), Task::none()),
            gallery::Effect::Opened { notify } => {
                let event = if notify {
                    Event::VisibilityChanged(true)
                } else {
                    Event::None
                };
                (event, Task::none())
            }
            gallery::Effect::VisibilityRequested(visible) => {
                (Event::VisibilityChanged(visible), Task::none())
            }
            gallery::Effect::Closing {
                generation,
                delay,
                notify,
            } => {
                let event = if notify {
                    Event::VisibilityChanged(false)
                } else {
                    Event::None
                };
                (event, close_timer(generation, delay))
            }
            gallery::Effect::Closed => (Event::AfterClose, Task::none()),
            gallery::Effect::LoadRequested(loads) => (Event::None, self.load_all(loads)),
            gallery::Effect::ImageReady(index) => (Event::ImageReady(index), Task::none()),
            gallery::Effect::LoadFailed {
                index,
                source,
                reason,
                fallback,
            } => {
                let task = fallback
                    .map(|fallback| load_task(Arc::clone(&self.loader), index, fallback))
                    .unwrap_or_else(Task::none);
                (
                    Event::LoadFailed {
                        index,
                        source,
                        reason,
                    },
                    task,
                )
            }
        }
    }

    fn load_all(&self, loads: Vec<(usize, ImageSource)>) -> Task<Message> {
        Task::batch(
            loads
                .into_iter()
                .map(|(index, source)| load_task(Arc::clone(&self.loader), index, source)),
        )
    }

    /// Shows the preview at `index`.
    pub fn open(&mut self, index: usize) -> (Event, Task<Message>) {
        self.update(Message::Gallery(gallery::Message::OpenPreview(index)))
    }

    /// Starts closing the preview.
    pub fn close(&mut self) -> (Event, Task<Message>) {
        self.update(Message::Gallery(gallery::Message::ClosePreview))
    }

    pub fn navigate(&mut self, direction: Direction) -> (Event, Task<Message>) {
        let msg = match direction {
            Direction::Next => gallery::Message::Next,
            Direction::Previous => gallery::Message::Previous,
        };
        self.update(Message::Gallery(msg))
    }

    #[must_use]
    pub fn gallery(&self) -> &gallery::State {
        &self.gallery
    }

    /// Returns true while keyboard and pointer input should reach the preview.
    #[must_use]
    pub fn wants_input(&self) -> bool {
        self.gallery.session().accepts_input()
    }

    /// Configured stacking order of the preview surface.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.gallery.session().settings().z_index
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext::default(), &self.gallery)
    }

    pub fn view_with<'a>(&'a self, ctx: view::ViewContext<'a>) -> Element<'a, Message> {
        view::view(ctx, &self.gallery)
    }
}

fn load_task(loader: Arc<dyn ImageLoader>, index: usize, source: ImageSource) -> Task<Message> {
    let requested = source.clone();
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || loader.load(&requested))
                .await
                .map_err(|e| LoadError::Io(e.to_string()))?
        },
        move |result| {
            Message::Gallery(gallery::Message::Loaded {
                index,
                source,
                outcome: load::Outcome::from(result),
            })
        },
    )
}

fn close_timer(generation: u64, delay: Duration) -> Task<Message> {
    Task::perform(
        async move {
            tokio::time::sleep(delay).await;
            generation
        },
        |generation| Message::Gallery(gallery::Message::CloseElapsed(generation)),
    )
}
