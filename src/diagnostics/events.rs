// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for preview activity tracking.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// User-initiated actions captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Transform Actions
    // ==========================================================================
    ZoomIn,
    ZoomOut,
    /// Pinch gesture with its relative factor.
    Pinch {
        factor: f32,
    },
    RotateLeft,
    RotateRight,
    FlipX,
    FlipY,
    Pan,
    ResetTransform,

    // ==========================================================================
    // Gallery Actions
    // ==========================================================================
    NavigateNext,
    NavigatePrevious,
    OpenPreview {
        index: usize,
    },
    ClosePreview,
    ReplaceImages {
        count: usize,
    },
}

/// Preview lifecycle changes captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PreviewStateEvent {
    /// The preview became visible.
    Opened,
    /// A close was requested; the after-close delay is running.
    Closing,
    /// The after-close delay elapsed.
    Closed,
    ImageLoaded {
        index: usize,
    },
    ImageLoadFailed {
        index: usize,
        /// Loader error message.
        reason: String,
    },
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock).
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and payload of a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
        /// Optional context, such as the image file name.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    PreviewState {
        state: PreviewStateEvent,
    },
}
