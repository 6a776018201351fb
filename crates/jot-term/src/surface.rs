// SPDX-License-Identifier: MIT
//
// Surface — the screen buffer the writer draws into.
//
// A surface is an addressable grid with a cursor and a current attribute
// set. Writes start at the cursor and paint with the current attributes.
// The trait is the seam between the writer and whatever owns the real
// screen: an in-memory grid, an escape-sequence stream, or a test double.
//
// Attribute changes cannot fail, since the writer's scope guard restores
// them from `Drop`. Backends that need to emit bytes record the change and
// emit it with their next output.

use crate::cell::Attr;
use crate::error::SurfaceError;

// ─── Position ───────────────────────────────────────────────────────────────

/// A zero-based `(row, col)` cell address.
///
/// Signed so callers can address cells above or left of the screen. What is
/// visible is decided by the surface's clipping policy, not by `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Row, counted from the top.
    pub row: i32,
    /// Column, counted from the left.
    pub col: i32,
}

impl Position {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a position.
    #[inline]
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Position {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

// ─── Surface ────────────────────────────────────────────────────────────────

/// A terminal screen buffer addressed by row and column.
///
/// Text arguments are always data. No method interprets directives inside
/// the strings it receives.
pub trait Surface {
    /// The attributes the next write will paint with.
    fn attrs(&self) -> Attr;

    /// Replace the current attribute set.
    fn set_attrs(&mut self, attrs: Attr);

    /// Where the next write starts.
    fn cursor(&self) -> Position;

    /// Move the cursor. Out-of-range positions are accepted; clipping
    /// happens when something is written.
    fn move_to(&mut self, pos: Position);

    /// Write `text` at the cursor with the current attributes and advance
    /// the cursor past it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot complete the write.
    fn add_str(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Blank the cursor's row from the cursor to the right edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot complete the write.
    fn clear_to_eol(&mut self) -> Result<(), SurfaceError>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    #[inline]
    fn attrs(&self) -> Attr {
        (**self).attrs()
    }

    #[inline]
    fn set_attrs(&mut self, attrs: Attr) {
        (**self).set_attrs(attrs);
    }

    #[inline]
    fn cursor(&self) -> Position {
        (**self).cursor()
    }

    #[inline]
    fn move_to(&mut self, pos: Position) {
        (**self).move_to(pos);
    }

    #[inline]
    fn add_str(&mut self, text: &str) -> Result<(), SurfaceError> {
        (**self).add_str(text)
    }

    #[inline]
    fn clear_to_eol(&mut self) -> Result<(), SurfaceError> {
        (**self).clear_to_eol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_from_tuple() {
        assert_eq!(Position::from((5, 10)), Position::new(5, 10));
        assert_eq!(Position::default(), Position::ORIGIN);
    }
}
