// SPDX-License-Identifier: MIT
//
// Cell — one character position in a screen buffer.
//
// A cell holds a Unicode codepoint and the attributes it was written with.
// Colors are not modelled; attributes are the only styling the writer
// manipulates.
//
// Wide characters (CJK, some emoji) occupy two columns. The first cell
// holds the codepoint; the second is a continuation cell (ch = 0) that
// carries the same attributes so reverse video covers both columns.

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// Each flag maps to one SGR (Select Graphic Rendition) parameter:
    ///
    /// ```
    /// use jot_term::cell::Attr;
    ///
    /// let style = Attr::BOLD | Attr::REVERSE;
    /// assert!(style.contains(Attr::REVERSE));
    /// assert!(!style.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity.
        const BOLD      = 1 << 0;
        /// SGR 2 — decreased intensity (faint).
        const DIM       = 1 << 1;
        /// SGR 4 — single underline.
        const UNDERLINE = 1 << 2;
        /// SGR 5 — slow blink.
        const BLINK     = 1 << 3;
        /// SGR 7 — swap foreground and background.
        const REVERSE   = 1 << 4;
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// Continuation marker: a cell whose `ch` is 0 belongs to the preceding
/// wide character.
const CONTINUATION: u32 = 0;

/// Default character for empty cells.
const SPACE: u32 = b' ' as u32;

/// A single screen cell.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint. `0` marks a continuation cell, `b' '` a blank.
    pub ch: u32,
    /// Attributes active when the cell was written.
    pub attrs: Attr,
}

impl Cell {
    /// A blank cell: space, no attributes.
    pub const EMPTY: Self = Self {
        ch: SPACE,
        attrs: Attr::empty(),
    };

    /// Create a cell with a character and attributes.
    #[inline]
    #[must_use]
    pub const fn styled(ch: char, attrs: Attr) -> Self {
        Self {
            ch: ch as u32,
            attrs,
        }
    }

    /// Create the second-column cell of a wide character.
    #[inline]
    #[must_use]
    pub const fn continuation(attrs: Attr) -> Self {
        Self {
            ch: CONTINUATION,
            attrs,
        }
    }

    /// Whether this is a continuation cell.
    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// Whether this cell is a blank with no attributes.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.ch == SPACE && self.attrs.bits() == 0
    }

    /// Whether the cell was written in reverse video.
    #[inline]
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        self.attrs.bits() & Attr::REVERSE.bits() != 0
    }

    /// The codepoint as a `char`. `None` for continuation cells.
    #[inline]
    #[must_use]
    pub const fn character(self) -> Option<char> {
        if self.ch == CONTINUATION {
            return None;
        }
        char::from_u32(self.ch)
    }

    /// Reset to a blank cell.
    #[inline]
    pub const fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            return write!(f, "Cell(continuation)");
        }
        let ch = char::from_u32(self.ch).unwrap_or('?');
        write!(f, "Cell({ch:?}")?;
        if !self.attrs.is_empty() {
            write!(f, ", {:?}", self.attrs)?;
        }
        write!(f, ")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
