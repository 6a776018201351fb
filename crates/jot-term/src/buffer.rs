// SPDX-License-Identifier: MIT
//
// ScreenBuffer — an in-memory terminal screen.
//
// A row-major grid of cells with a cursor and a current attribute set,
// implementing `Surface`. It stands in for the terminal's own buffer in
// tests and in plain-text dumps, and it pins down a boundary policy the
// real terminal leaves to chance:
//
//   - Clip, never wrap, never reject. Cells outside the grid are not drawn.
//     Characters left of column 0 still advance the cursor, characters at
//     or past the right edge are dropped, rows outside the grid draw
//     nothing.
//
//   - Zero-width and control characters occupy no cell.
//
//   - Wide characters take two cells: the owner and a continuation. A wide
//     character cut by either edge leaves a space in its visible half, and
//     overwriting half of an existing wide character blanks the other half.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Attr, Cell};
use crate::error::SurfaceError;
use crate::surface::{Position, Surface};
use crate::terminal::Size;

/// An in-memory screen of `width × height` cells.
///
/// # Examples
///
/// ```
/// use jot_term::buffer::ScreenBuffer;
/// use jot_term::surface::{Position, Surface};
///
/// let mut screen = ScreenBuffer::new(20, 4);
/// screen.move_to(Position::new(1, 2));
/// screen.add_str("hello").unwrap();
/// assert_eq!(screen.row_text(1).unwrap().trim_end(), "  hello");
/// assert_eq!(screen.cursor(), Position::new(1, 7));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    attrs: Attr,
    cursor: Position,
}

impl ScreenBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a blank screen with the cursor at the origin.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
            attrs: Attr::empty(),
            cursor: Position::ORIGIN,
        }
    }

    /// Create a blank screen matching a terminal size.
    #[must_use]
    pub fn with_size(size: Size) -> Self {
        Self::new(size.cols, size.rows)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Dimensions as a terminal [`Size`].
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size {
            cols: self.width,
            rows: self.height,
        }
    }

    /// Map a signed address to grid coordinates, or `None` if it is off
    /// screen.
    fn locate(&self, row: i32, col: i32) -> Option<(u16, u16)> {
        let row = u16::try_from(row).ok().filter(|&r| r < self.height)?;
        let col = u16::try_from(col).ok().filter(|&c| c < self.width)?;
        Some((row, col))
    }

    #[inline]
    const fn index(&self, row: u16, col: u16) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// The cell at `(row, col)`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: u16, col: u16) -> Option<&Cell> {
        if row < self.height && col < self.width {
            Some(&self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// One row as a slice.
    #[must_use]
    pub fn row(&self, row: u16) -> Option<&[Cell]> {
        if row < self.height {
            let start = self.index(row, 0);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// One row as a string, continuation cells skipped.
    #[must_use]
    pub fn row_text(&self, row: u16) -> Option<String> {
        self.row(row)
            .map(|cells| cells.iter().filter_map(|c| c.character()).collect())
    }

    /// All rows as strings with trailing blanks trimmed.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .filter_map(|row| self.row_text(row))
            .map(|line| line.trim_end().to_owned())
            .collect()
    }

    // ─── Cell Writes ─────────────────────────────────────────────────────

    /// Break any wide character touching `(row, col)`.
    ///
    /// A continuation here blanks its owner at `col - 1`. A continuation at
    /// `col + 1` means a wide character started here; it is cleared.
    fn break_wide_char_at(&mut self, row: u16, col: u16) {
        let idx = self.index(row, col);

        if self.cells[idx].is_continuation() && col > 0 {
            let prev = self.index(row, col - 1);
            self.cells[prev].ch = u32::from(b' ');
        }

        if col + 1 < self.width {
            let next = self.index(row, col + 1);
            if self.cells[next].is_continuation() {
                self.cells[next] = Cell::EMPTY;
            }
        }
    }

    /// Write one cell if `(row, col)` is on screen.
    fn put(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        let Some((r, c)) = self.locate(row, col) else {
            return false;
        };
        self.break_wide_char_at(r, c);
        let idx = self.index(r, c);
        self.cells[idx] = cell;
        true
    }
}

impl Surface for ScreenBuffer {
    #[inline]
    fn attrs(&self) -> Attr {
        self.attrs
    }

    #[inline]
    fn set_attrs(&mut self, attrs: Attr) {
        self.attrs = attrs;
    }

    #[inline]
    fn cursor(&self) -> Position {
        self.cursor
    }

    #[inline]
    fn move_to(&mut self, pos: Position) {
        self.cursor = pos;
    }

    fn add_str(&mut self, text: &str) -> Result<(), SurfaceError> {
        let row = self.cursor.row;
        let mut col = self.cursor.col;
        let attrs = self.attrs;

        for ch in text.chars() {
            let w = char_width(ch);
            if w == 0 {
                continue;
            }

            if w == 2 {
                let owner_visible = self.locate(row, col).is_some();
                let cont_visible = self.locate(row, col.saturating_add(1)).is_some();
                if owner_visible && cont_visible {
                    self.put(row, col, Cell::styled(ch, attrs));
                    self.put(row, col + 1, Cell::continuation(attrs));
                } else if owner_visible {
                    self.put(row, col, Cell::styled(' ', attrs));
                } else if cont_visible {
                    self.put(row, col + 1, Cell::styled(' ', attrs));
                }
                col = col.saturating_add(2);
            } else {
                self.put(row, col, Cell::styled(ch, attrs));
                col = col.saturating_add(1);
            }
        }

        self.cursor.col = col;
        Ok(())
    }

    fn clear_to_eol(&mut self) -> Result<(), SurfaceError> {
        let Some((row, col)) = self.locate(self.cursor.row, self.cursor.col.max(0)) else {
            return Ok(());
        };
        self.break_wide_char_at(row, col);
        let start = self.index(row, col);
        let end = self.index(row, 0) + usize::from(self.width);
        self.cells[start..end].fill(Cell::EMPTY);
        Ok(())
    }
}

impl std::fmt::Debug for ScreenBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScreenBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width ─────────────────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// 0 for control and zero-width characters, 2 for wide characters (CJK,
/// some emoji), 1 otherwise.
///
/// ```
/// use jot_term::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> i32 {
    if ch.is_control() {
        return 0;
    }
    match ch.width() {
        Some(2) => 2,
        Some(1) => 1,
        _ => 0,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────────
