// SPDX-License-Identifier: MPL-2.0
//! Image source identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Opaque identifier of an image (a path or URL).
///
/// Two sources are the same image iff their strings are equal. Galleries
/// still identify entries by position, so duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSource(String);

impl ImageSource {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the source as a filesystem path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Last path segment, for captions.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        Self(value)
    }
}
