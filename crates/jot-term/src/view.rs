// SPDX-License-Identifier: MIT

//! Note view — a document body and a status line.
//!
//! Paints a list of lines into the top `rows - 1` rows of a surface and a
//! reverse-video status line into the last row, all through
//! [`TextWriter`]:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ line 0                       │  ← body: one line per row,
//! │ line 1                       │    rest of each row cleared
//! │                              │  ← rows past the document cleared
//! ├──────────────────────────────┤
//! │ Press ESC to save   COL: ... │  ← status (REVERSE)
//! └──────────────────────────────┘
//! ```
//!
//! Lines are not wrapped or scrolled; the surface clips them. After
//! painting, the surface cursor is left on the document cursor.

use crate::error::SurfaceError;
use crate::surface::{Position, Surface};
use crate::terminal::Size;
use crate::writer::TextWriter;

/// Status hint shown when none is configured.
pub const DEFAULT_HINT: &str = "Press ESC to save";

/// Paints a note and its status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    hint: String,
}

impl NoteView {
    /// A view with the default status hint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hint(DEFAULT_HINT)
    }

    /// A view with a custom status hint.
    #[must_use]
    pub fn with_hint(hint: impl Into<String>) -> Self {
        Self { hint: hint.into() }
    }

    /// The status hint.
    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// The status line text for a cursor position.
    ///
    /// ```
    /// use jot_term::surface::Position;
    /// use jot_term::view::NoteView;
    ///
    /// let status = NoteView::new().status_text(Position::new(2, 7));
    /// assert_eq!(status, "Press ESC to save   COL: 7   ROW: 2");
    /// ```
    #[must_use]
    pub fn status_text(&self, cursor: Position) -> String {
        format!("{}   COL: {}   ROW: {}", self.hint, cursor.col, cursor.row)
    }

    /// Paint `lines` and the status line into a surface of `size`.
    ///
    /// A zero-row size paints nothing; one row holds only the status line.
    ///
    /// # Errors
    ///
    /// Passes through the first failure reported by the surface. The
    /// surface's attributes are unchanged even then.
    pub fn paint<S, L>(
        &self,
        writer: &mut TextWriter<S>,
        lines: &[L],
        cursor: Position,
        size: Size,
    ) -> Result<(), SurfaceError>
    where
        S: Surface,
        L: AsRef<str>,
    {
        let Some(status_row) = size.rows.checked_sub(1) else {
            return Ok(());
        };

        for row in 0..status_row {
            let r = i32::from(row);
            match lines.get(usize::from(row)) {
                Some(line) => writer.render(r, 0, line.as_ref(), false)?,
                None => writer.surface_mut().move_to(Position::new(r, 0)),
            }
            writer.surface_mut().clear_to_eol()?;
        }

        let status = self.status_text(cursor);
        writer.render(i32::from(status_row), 0, &status, true)?;
        writer.surface_mut().clear_to_eol()?;

        writer.surface_mut().move_to(cursor);
        tracing::debug!(
            lines = lines.len(),
            rows = size.rows,
            cols = size.cols,
            "painted note view"
        );
        Ok(())
    }
}

impl Default for NoteView {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
