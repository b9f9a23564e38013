// SPDX-License-Identifier: MPL-2.0
//! Preview session lifecycle: `Closed → Open → Closing → Closed`.
//!
//! Visibility is either owned by the session or controlled by a parent. In
//! controlled mode, open and close requests are advisory: the session asks
//! the parent to change visibility and mirrors every value the parent reports
//! back through [`Message::Observe`]. Either way the after-close notification
//! is scheduled here.
//!
//! The after-close delay is a timer keyed by a close generation. Every
//! transition that supersedes a pending close bumps the generation, so a timer
//! that fires late is recognized as stale and dropped.

use crate::config::DEFAULT_Z_INDEX;
use crate::domain::CloseDelay;
use std::time::Duration;

/// Session configuration, fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub close_delay: CloseDelay,
    /// Keep the preview content mounted while hidden.
    pub force_render: bool,
    /// Stacking order of the preview surface relative to the host's content
    /// layer (z = 0). Iced has no z-order, so the host reads it through
    /// `Preview::z_index` when it builds its `Stack`.
    pub z_index: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            close_delay: CloseDelay::default(),
            force_render: false,
            z_index: DEFAULT_Z_INDEX,
        }
    }
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open,
    /// Hidden, waiting for the after-close delay.
    Closing,
}

/// Session state.
#[derive(Debug, Clone)]
pub struct State {
    phase: Phase,
    generation: u64,
    controlled: bool,
    settings: Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Open,
    RequestClose,
    /// The after-close timer for `generation` fired.
    CloseElapsed(u64),
    /// A controlling parent reports its visibility value.
    Observe(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The session became visible. When `notify` is set the visibility
    /// collaborator should hear `true`.
    Opened { notify: bool },
    /// Controlled mode: ask the parent to change visibility.
    VisibilityRequested(bool),
    /// The session is closing. Schedule `CloseElapsed(generation)` after
    /// `delay`; when `notify` is set the visibility collaborator should hear
    /// `false`.
    Closing {
        generation: u64,
        delay: Duration,
        notify: bool,
    },
    /// The after-close delay elapsed.
    Closed,
}

impl Default for State {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl State {
    /// Creates a session that owns its visibility, starting closed.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            phase: Phase::Closed,
            generation: 0,
            controlled: false,
            settings,
        }
    }

    /// Creates a session whose visibility is driven by a parent.
    #[must_use]
    pub fn controlled(settings: Settings, visible: bool) -> Self {
        Self {
            phase: if visible { Phase::Open } else { Phase::Closed },
            generation: 0,
            controlled: true,
            settings,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Open => self.open(),
            Message::RequestClose => {
                if self.phase == Phase::Open {
                    self.begin_closing(true)
                } else {
                    Effect::None
                }
            }
            Message::CloseElapsed(generation) => {
                if self.phase == Phase::Closing && generation == self.generation {
                    self.phase = Phase::Closed;
                    tracing::debug!(generation, "preview closed");
                    Effect::Closed
                } else {
                    Effect::None
                }
            }
            Message::Observe(visible) => self.observe(visible),
        }
    }

    fn open(&mut self) -> Effect {
        if self.phase == Phase::Open {
            return Effect::None;
        }
        if self.controlled {
            return Effect::VisibilityRequested(true);
        }
        self.enter_open();
        Effect::Opened { notify: true }
    }

    fn observe(&mut self, visible: bool) -> Effect {
        if !self.controlled {
            return Effect::None;
        }
        match (visible, self.phase) {
            (true, Phase::Closed | Phase::Closing) => {
                self.enter_open();
                Effect::Opened { notify: false }
            }
            (false, Phase::Open) => self.begin_closing(false),
            _ => Effect::None,
        }
    }

    fn enter_open(&mut self) {
        if self.phase == Phase::Closing {
            // Supersede the pending after-close.
            self.generation = self.generation.wrapping_add(1);
        }
        self.phase = Phase::Open;
        tracing::debug!(generation = self.generation, "preview opened");
    }

    fn begin_closing(&mut self, notify: bool) -> Effect {
        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Closing;
        tracing::debug!(generation = self.generation, "preview closing");
        Effect::Closing {
            generation: self.generation,
            delay: self.settings.close_delay.as_duration(),
            notify,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while the preview is shown (not closing).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase == Phase::Open
    }

    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.phase == Phase::Closing
    }

    /// Gesture and toolbar input is only accepted while open.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Returns true when the preview surface should be in the widget tree.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.phase != Phase::Closed || self.settings.force_render
    }

    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }
}
