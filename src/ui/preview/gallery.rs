// SPDX-License-Identifier: MPL-2.0
//! Gallery group controller.
//!
//! Owns the ordered image list, the shared current index, the one preview
//! session and the one active transform. A single previewed image is a group
//! of one that is not `grouped`, so arrow keys do nothing for it.
//!
//! Every change of the active image resets the transform exactly once and
//! cancels any drag in progress before the next gesture is reduced.

use super::gesture::{self, GestureEvent};
use super::load::{self, LoadStatus};
use super::session::{self, Phase};
use super::transform;
use crate::domain::{ImageSource, TransformState};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Navigation direction within the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// How the current index follows a replaced image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexPolicy {
    /// Keep the numeric index, clamped to the new length.
    #[default]
    Clamp,
    /// Follow the previously active source to its new position.
    TrackSource,
}

/// Gallery configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub index_policy: IndexPolicy,
    /// Shown when a source fails to load.
    pub fallback: Option<ImageSource>,
    pub transform: transform::Settings,
    pub session: session::Settings,
}

/// One entry of the group.
#[derive(Debug, Clone)]
pub struct Item {
    pub load: load::State,
}

impl Item {
    fn new(source: ImageSource, fallback: Option<ImageSource>) -> Self {
        Self {
            load: load::State::new(source, fallback),
        }
    }

    #[must_use]
    pub fn source(&self) -> &ImageSource {
        self.load.source()
    }
}

/// Read-only navigation snapshot for the counter and arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationInfo {
    pub has_next: bool,
    pub has_previous: bool,
    /// Zero-based index, `None` for an empty group.
    pub current_index: Option<usize>,
    pub total_count: usize,
}

/// Gallery state.
#[derive(Debug, Clone)]
pub struct State {
    items: Vec<Item>,
    current_index: usize,
    grouped: bool,
    session: session::State,
    transform: transform::State,
    gesture: gesture::State,
    index_policy: IndexPolicy,
    fallback: Option<ImageSource>,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Show the preview at `index`.
    OpenPreview(usize),
    Next,
    Previous,
    ClosePreview,
    /// Replace the image list.
    SetImages(Vec<ImageSource>),
    /// Raw input reduced by the gesture reducer.
    Gesture(GestureEvent),
    /// Toolbar transform command.
    Transform(transform::Message),
    /// Visibility reported by a controlling parent.
    Observe(bool),
    /// After-close timer fired.
    CloseElapsed(u64),
    /// Loader report for the item at `index`.
    Loaded {
        index: usize,
        source: ImageSource,
        outcome: load::Outcome,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    TransformChanged,
    /// The active image changed to `index` (transform already reset).
    Navigated(usize),
    /// The preview became visible.
    Opened { notify: bool },
    /// Controlled mode: ask the parent to change visibility.
    VisibilityRequested(bool),
    /// Schedule `CloseElapsed(generation)` after `delay`.
    Closing {
        generation: u64,
        delay: Duration,
        notify: bool,
    },
    /// After-close notification.
    Closed,
    /// Sources to request from the loader.
    LoadRequested(Vec<(usize, ImageSource)>),
    ImageReady(usize),
    /// The primary source of `index` failed.
    LoadFailed {
        index: usize,
        source: ImageSource,
        reason: String,
        fallback: Option<ImageSource>,
    },
}

impl From<session::Effect> for Effect {
    fn from(effect: session::Effect) -> Self {
        match effect {
            session::Effect::None => Effect::None,
            session::Effect::Opened { notify } => Effect::Opened { notify },
            session::Effect::VisibilityRequested(visible) => Effect::VisibilityRequested(visible),
            session::Effect::Closing {
                generation,
                delay,
                notify,
            } => Effect::Closing {
                generation,
                delay,
                notify,
            },
            session::Effect::Closed => Effect::Closed,
        }
    }
}

impl State {
    /// Creates a group over `sources`. Every item starts Loading.
    #[must_use]
    pub fn new(sources: Vec<ImageSource>, settings: Settings) -> Self {
        Self::build(sources, settings, true, session::State::new)
    }

    /// Creates a group whose visibility is driven by a parent.
    #[must_use]
    pub fn controlled(sources: Vec<ImageSource>, settings: Settings, visible: bool) -> Self {
        Self::build(sources, settings, true, |s| {
            session::State::controlled(s, visible)
        })
    }

    /// Creates a standalone preview of one image.
    #[must_use]
    pub fn single(source: ImageSource, settings: Settings) -> Self {
        Self::build(vec![source], settings, false, session::State::new)
    }

    fn build(
        sources: Vec<ImageSource>,
        settings: Settings,
        grouped: bool,
        session: impl FnOnce(session::Settings) -> session::State,
    ) -> Self {
        let fallback = settings.fallback;
        Self {
            items: sources
                .into_iter()
                .map(|source| Item::new(source, fallback.clone()))
                .collect(),
            current_index: 0,
            grouped,
            session: session(settings.session),
            transform: transform::State::new(settings.transform),
            gesture: gesture::State::default(),
            index_policy: settings.index_policy,
            fallback,
        }
    }

    /// Every item with its source, for the initial load requests.
    #[must_use]
    pub fn pending_loads(&self) -> Vec<(usize, ImageSource)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.load.status() == LoadStatus::Loading)
            .map(|(index, item)| (index, item.source().clone()))
            .collect()
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::OpenPreview(index) => self.open_preview(index),
            Message::Next => self.navigate(Direction::Next),
            Message::Previous => self.navigate(Direction::Previous),
            Message::ClosePreview => self.close_preview(),
            Message::SetImages(sources) => self.set_images(sources),
            Message::Gesture(event) => self.handle_gesture(event),
            Message::Transform(msg) => {
                if self.session.accepts_input() {
                    self.apply_transform(msg)
                } else {
                    Effect::None
                }
            }
            Message::Observe(visible) => {
                let effect = self.session.handle(session::Message::Observe(visible));
                if matches!(effect, session::Effect::Opened { .. }) {
                    self.reset_active();
                }
                effect.into()
            }
            Message::CloseElapsed(generation) => self
                .session
                .handle(session::Message::CloseElapsed(generation))
                .into(),
            Message::Loaded {
                index,
                source,
                outcome,
            } => self.handle_loaded(index, &source, outcome),
        }
    }

    fn open_preview(&mut self, index: usize) -> Effect {
        if index >= self.items.len() {
            tracing::debug!(index, len = self.items.len(), "open preview out of range ignored");
            return Effect::None;
        }

        let index_changed = index != self.current_index;
        let was_open = self.session.is_visible();
        self.current_index = index;

        let effect = self.session.handle(session::Message::Open);
        match effect {
            session::Effect::Opened { .. } => self.reset_active(),
            session::Effect::None if was_open && index_changed => {
                self.reset_active();
                return Effect::Navigated(index);
            }
            _ => self.gesture.cancel(),
        }
        effect.into()
    }

    fn navigate(&mut self, direction: Direction) -> Effect {
        let len = self.items.len();
        if len == 0 {
            return Effect::None;
        }
        let target = match direction {
            Direction::Next => (self.current_index + 1).min(len - 1),
            Direction::Previous => self.current_index.saturating_sub(1),
        };
        if target == self.current_index {
            return Effect::None;
        }
        self.current_index = target;
        self.reset_active();
        tracing::debug!(index = target, ?direction, "gallery navigated");
        Effect::Navigated(target)
    }

    fn close_preview(&mut self) -> Effect {
        self.gesture.cancel();
        self.session.handle(session::Message::RequestClose).into()
    }

    fn handle_gesture(&mut self, event: GestureEvent) -> Effect {
        if !self.session.accepts_input() || self.items.is_empty() {
            self.gesture.cancel();
            return Effect::None;
        }
        match self.gesture.handle(event, self.transform.current().scale) {
            gesture::Action::None => Effect::None,
            gesture::Action::Transform(msg) => self.apply_transform(msg),
            gesture::Action::Close => self.close_preview(),
            gesture::Action::Navigate(direction) => {
                if self.grouped {
                    self.navigate(direction)
                } else {
                    Effect::None
                }
            }
        }
    }

    fn apply_transform(&mut self, msg: transform::Message) -> Effect {
        match self.transform.handle(msg) {
            transform::Effect::None => Effect::None,
            transform::Effect::Changed | transform::Effect::Reset => Effect::TransformChanged,
        }
    }

    /// Applies a loader report to the item waiting on `source`.
    ///
    /// `index` is where the item sat when the load started. `SetImages` may
    /// have moved it since, so the report goes to that position only if the
    /// item there still awaits the source, otherwise to the first item that
    /// does.
    fn handle_loaded(&mut self, index: usize, source: &ImageSource, outcome: load::Outcome) -> Effect {
        let target = if self
            .items
            .get(index)
            .is_some_and(|item| item.load.awaits(source))
        {
            Some(index)
        } else {
            self.items.iter().position(|item| item.load.awaits(source))
        };
        let Some(index) = target else {
            tracing::debug!(%source, "load report without a waiting item dropped");
            return Effect::None;
        };

        let item = &mut self.items[index];
        match item.load.handle(source, outcome) {
            load::Effect::None => Effect::None,
            load::Effect::Ready => Effect::ImageReady(index),
            load::Effect::Failed { reason, fallback } => Effect::LoadFailed {
                index,
                source: item.source().clone(),
                reason,
                fallback,
            },
        }
    }

    fn set_images(&mut self, sources: Vec<ImageSource>) -> Effect {
        let previous_source = self.active_source().cloned();

        let mut survivors: HashMap<ImageSource, VecDeque<Item>> = HashMap::new();
        for item in self.items.drain(..) {
            survivors
                .entry(item.source().clone())
                .or_default()
                .push_back(item);
        }

        let mut loads = Vec::new();
        let fallback = self.fallback.clone();
        self.items = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| {
                survivors
                    .get_mut(&source)
                    .and_then(VecDeque::pop_front)
                    .unwrap_or_else(|| {
                        loads.push((index, source.clone()));
                        Item::new(source, fallback.clone())
                    })
            })
            .collect();

        self.current_index = self.reconcile_index(previous_source.as_ref());
        tracing::debug!(
            len = self.items.len(),
            index = self.current_index,
            policy = ?self.index_policy,
            "gallery images replaced"
        );

        if self.active_source() != previous_source.as_ref() {
            self.reset_active();
        }

        if self.items.is_empty() {
            return match self.session.phase() {
                Phase::Open => self.close_preview(),
                _ => Effect::None,
            };
        }

        if loads.is_empty() {
            Effect::None
        } else {
            Effect::LoadRequested(loads)
        }
    }

    fn reconcile_index(&self, previous_source: Option<&ImageSource>) -> usize {
        let len = self.items.len();
        if len == 0 {
            return 0;
        }
        let clamped = self.current_index.min(len - 1);
        match (self.index_policy, previous_source) {
            (IndexPolicy::TrackSource, Some(source)) => {
                if self.items.get(self.current_index).map(Item::source) == Some(source) {
                    self.current_index
                } else {
                    self.items
                        .iter()
                        .position(|item| item.source() == source)
                        .unwrap_or(clamped)
                }
            }
            _ => clamped,
        }
    }

    fn reset_active(&mut self) {
        self.gesture.cancel();
        self.transform.handle(transform::Message::Reset);
    }

    // =========================================================================
    // Read API
    // =========================================================================

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Zero-based current index, `None` when the group is empty.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.current_index)
    }

    #[must_use]
    pub fn active_item(&self) -> Option<&Item> {
        self.items.get(self.current_index)
    }

    #[must_use]
    pub fn active_source(&self) -> Option<&ImageSource> {
        self.active_item().map(Item::source)
    }

    #[must_use]
    pub fn transform(&self) -> TransformState {
        self.transform.current()
    }

    #[must_use]
    pub fn transform_state(&self) -> &transform::State {
        &self.transform
    }

    #[must_use]
    pub fn session(&self) -> &session::State {
        &self.session
    }

    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// `(position, total)` with a one-based position, for "X / N" counters.
    #[must_use]
    pub fn counter(&self) -> Option<(usize, usize)> {
        self.current_index()
            .map(|index| (index + 1, self.items.len()))
    }

    #[must_use]
    pub fn navigation_info(&self) -> NavigationInfo {
        let total_count = self.items.len();
        match self.current_index() {
            Some(index) => NavigationInfo {
                has_next: self.grouped && index + 1 < total_count,
                has_previous: self.grouped && index > 0,
                current_index: Some(index),
                total_count,
            },
            None => NavigationInfo::default(),
        }
    }

    /// Returns true when the preview surface belongs in the widget tree.
    #[must_use]
    pub fn should_render(&self) -> bool {
        !self.items.is_empty() && self.session.should_render()
    }
}
