// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout stored in `date`, e.g. `2024-03-01 09:30:00 +0000`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// A titled note. Titles are unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    /// One entry per line, without line terminators.
    pub text: Vec<String>,
    /// When the note was last written, in [`DATE_FORMAT`].
    pub date: String,
}

impl Note {
    /// A note stamped with the current time.
    #[must_use]
    pub fn new(title: impl Into<String>, text: Vec<String>) -> Self {
        Self::stamped(title, text, Utc::now())
    }

    /// A note stamped with `at`.
    #[must_use]
    pub fn stamped(title: impl Into<String>, text: Vec<String>, at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            text,
            date: at.format(DATE_FORMAT).to_string(),
        }
    }

    /// A note whose lines are split from `contents`.
    #[must_use]
    pub fn from_contents(title: impl Into<String>, contents: &str) -> Self {
        Self::new(title, contents.lines().map(str::to_owned).collect())
    }
}
