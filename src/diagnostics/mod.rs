// SPDX-License-Identifier: MPL-2.0
//! Activity trail for the preview.
//!
//! Captures user actions and preview lifecycle changes in a memory-bounded
//! [`CircularBuffer`] and exports them as JSON for bug reports.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: A timestamped [`DiagnosticEventKind`]
//! - [`DiagnosticsLog`]: The buffer plus logging and export helpers

mod buffer;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use events::{DiagnosticEvent, DiagnosticEventKind, PreviewStateEvent, UserAction};

use serde::Serialize;
use std::time::Instant;

/// Event as written by [`DiagnosticsLog::export_json`].
#[derive(Debug, Serialize)]
pub struct SerializableEvent<'a> {
    /// Milliseconds since the log was created.
    pub offset_ms: u64,
    #[serde(flatten)]
    pub kind: &'a DiagnosticEventKind,
}

/// Bounded log of diagnostic events.
#[derive(Debug, Clone)]
pub struct DiagnosticsLog {
    started_at: Instant,
    events: CircularBuffer<DiagnosticEvent>,
}

impl Default for DiagnosticsLog {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl DiagnosticsLog {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            started_at: Instant::now(),
            events: CircularBuffer::new(capacity),
        }
    }

    /// Records a user action.
    pub fn log_action(&mut self, action: UserAction, details: Option<String>) {
        tracing::trace!(?action, "user action");
        self.events.push(DiagnosticEvent::new(DiagnosticEventKind::UserAction {
            action,
            details,
        }));
    }

    /// Records a preview lifecycle change.
    pub fn log_state(&mut self, state: PreviewStateEvent) {
        tracing::trace!(?state, "preview state");
        self.events
            .push(DiagnosticEvent::new(DiagnosticEventKind::PreviewState { state }));
    }

    /// Events in chronological order.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Serializes the buffered events as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        let events: Vec<SerializableEvent<'_>> = self
            .events
            .iter()
            .map(|event| SerializableEvent {
                offset_ms: u64::try_from(
                    event
                        .timestamp
                        .saturating_duration_since(self.started_at)
                        .as_millis(),
                )
                .unwrap_or(u64::MAX),
                kind: &event.kind,
            })
            .collect();
        serde_json::to_string_pretty(&events)
    }
}
