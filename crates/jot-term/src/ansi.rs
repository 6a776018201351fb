// SPDX-License-Identifier: MIT
//
// ANSI escape sequences and a terminal-backed surface.
//
// The free functions write one escape sequence each to any `impl Write`.
// `AnsiSurface` sits on top of them and behaves like a terminal's own
// screen buffer: it remembers the cursor and the attributes the caller
// asked for, and only tells the terminal when something is actually drawn.
// An attribute set that is switched on and back off around an empty write
// therefore costs no bytes at all.
//
// Every styled output is closed with SGR 0 before the call returns, so the
// terminal is back in its default state between calls whatever the caller
// does next (including dropping the surface without a flush).
//
// Caller text reaches the terminal through `write_text`, which drops
// control characters. An ESC inside the text can never start a sequence.
//
// Positions are 0-indexed in our API and 1-indexed on the wire.

use std::io::{self, Write};

use crate::buffer::char_width;
use crate::cell::Attr;
use crate::error::SurfaceError;
use crate::surface::{Position, Surface};

// ─── Sequences ───────────────────────────────────────────────────────────────

/// Move the cursor with CUP. Negative coordinates clamp to the first
/// row/column.
#[inline]
pub fn cursor_to(w: &mut impl Write, pos: Position) -> io::Result<()> {
    let row = i64::from(pos.row.max(0)) + 1;
    let col = i64::from(pos.col.max(0)) + 1;
    write!(w, "\x1b[{row};{col}H")
}

/// Reset all SGR attributes (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Erase from the cursor to the end of the line (EL 0).
#[inline]
pub fn clear_to_eol(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Emit SGR codes for `attr` as one CSI sequence, e.g. `\x1b[1;7m`.
///
/// Does nothing if `attr` is empty.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    const CODES: [(Attr, &[u8]); 5] = [
        (Attr::BOLD, b"1"),
        (Attr::DIM, b"2"),
        (Attr::UNDERLINE, b"4"),
        (Attr::BLINK, b"5"),
        (Attr::REVERSE, b"7"),
    ];

    if attr.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut first = true;
    for (flag, code) in CODES {
        if attr.contains(flag) {
            if !first {
                w.write_all(b";")?;
            }
            w.write_all(code)?;
            first = false;
        }
    }
    w.write_all(b"m")
}

/// Write `text` as literal UTF-8, dropping control characters.
///
/// ```
/// let mut out = Vec::new();
/// jot_term::ansi::write_text(&mut out, "a\x1b[2Jb 100%").unwrap();
/// assert_eq!(out, b"a[2Jb 100%");
/// ```
pub fn write_text(w: &mut impl Write, text: &str) -> io::Result<()> {
    for chunk in text.split(char::is_control) {
        w.write_all(chunk.as_bytes())?;
    }
    Ok(())
}

// ─── AnsiSurface ─────────────────────────────────────────────────────────────

/// A [`Surface`] that draws by emitting escape sequences to a writer.
///
/// Cursor moves and attribute changes are held back until the next write
/// or clear. Text left of column 0 or above row 0 is clipped the way
/// [`ScreenBuffer`](crate::buffer::ScreenBuffer) clips it; the terminal
/// decides what happens at its right and bottom edges.
///
/// ```
/// use jot_term::ansi::AnsiSurface;
/// use jot_term::cell::Attr;
/// use jot_term::surface::{Position, Surface};
///
/// let mut term = AnsiSurface::new(Vec::new());
/// term.move_to(Position::new(0, 4));
/// term.set_attrs(Attr::REVERSE);
/// term.add_str("hi").unwrap();
/// assert_eq!(term.get_ref().as_slice(), b"\x1b[1;5H\x1b[7mhi\x1b[0m");
/// ```
#[derive(Debug)]
pub struct AnsiSurface<W: Write> {
    out: W,
    cursor: Position,
    /// The terminal's cursor is not where `cursor` says.
    move_pending: bool,
    attrs: Attr,
}

impl<W: Write> AnsiSurface<W> {
    /// Wrap a writer. The terminal is assumed to be in its default
    /// attribute state.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            cursor: Position::ORIGIN,
            move_pending: false,
            attrs: Attr::empty(),
        }
    }

    /// The wrapped writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Unwrap. A pending cursor move is discarded. No styled output is
    /// ever left open on the wire.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write `payload` at the cursor in the current attributes, leaving the
    /// terminal in its default attribute state afterwards.
    fn emit(&mut self, payload: impl FnOnce(&mut W) -> io::Result<()>) -> io::Result<()> {
        if self.move_pending {
            cursor_to(&mut self.out, self.cursor)?;
            self.move_pending = false;
        }
        if self.attrs.is_empty() {
            return payload(&mut self.out);
        }
        attrs(&mut self.out, self.attrs)?;
        let written = payload(&mut self.out);
        // The reset goes out even when the payload failed partway.
        let closed = reset(&mut self.out);
        written.and(closed)
    }

    /// Send any pending cursor move and flush the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn flush(&mut self) -> Result<(), SurfaceError> {
        if self.move_pending {
            cursor_to(&mut self.out, self.cursor)?;
            self.move_pending = false;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Drop the part of `text` that falls left of column 0 when drawn from
/// `col` (negative). Returns the visible rest and how many columns of a
/// wide character cut by the edge remain to be blanked.
fn clip_left(text: &str, mut col: i32) -> (&str, usize) {
    let mut rest = text;
    while col < 0 {
        let mut chars = rest.chars();
        let Some(ch) = chars.next() else { break };
        col = col.saturating_add(char_width(ch));
        rest = chars.as_str();
    }
    (rest, usize::try_from(col).unwrap_or(0))
}

impl<W: Write> Surface for AnsiSurface<W> {
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

    fn move_to(&mut self, pos: Position) {
        self.cursor = pos;
        self.move_pending = true;
    }

    fn add_str(&mut self, text: &str) -> Result<(), SurfaceError> {
        if text.is_empty() {
            return Ok(());
        }
        let start = self.cursor;
        let end = start.col.saturating_add(text.chars().map(char_width).sum());

        if start.row < 0 {
            self.cursor.col = end;
            self.move_pending = true;
            return Ok(());
        }

        if start.col >= 0 {
            self.emit(|out| write_text(out, text))?;
        } else {
            let (visible, blanks) = clip_left(text, start.col);
            if visible.is_empty() && blanks == 0 {
                self.cursor.col = end;
                self.move_pending = true;
                return Ok(());
            }
            self.move_to(Position::new(start.row, 0));
            self.emit(|out| {
                for _ in 0..blanks {
                    out.write_all(b" ")?;
                }
                write_text(out, visible)
            })?;
        }
        self.cursor.col = end;
        Ok(())
    }

    fn clear_to_eol(&mut self) -> Result<(), SurfaceError> {
        if self.cursor.row < 0 {
            return Ok(());
        }
        self.emit(clear_to_eol)?;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn output(term: &AnsiSurface<Vec<u8>>) -> String {
        String::from_utf8(term.get_ref().clone()).unwrap()
    }

    /// A writer that accepts `budget` bytes and then fails.
    struct Failing {
        budget: usize,
    }

    impl Write for Failing {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // ── Sequences ───────────────────────────────────────────────────────

    #[test]
    fn cursor_to_is_one_based() {
        let mut out = Vec::new();
        cursor_to(&mut out, Position::new(5, 10)).unwrap();
        assert_eq!(out, b"\x1b[6;11H");
    }

    #[test]
    fn cursor_to_clamps_negative() {
        let mut out = Vec::new();
        cursor_to(&mut out, Position::new(-3, -1)).unwrap();
        assert_eq!(out, b"\x1b[1;1H");
    }

    #[test]
    fn attrs_joins_codes() {
        let mut out = Vec::new();
        attrs(&mut out, Attr::BOLD | Attr::REVERSE).unwrap();
        assert_eq!(out, b"\x1b[1;7m");
    }

    #[test]
    fn attrs_empty_writes_nothing() {
        let mut out = Vec::new();
        attrs(&mut out, Attr::empty()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn write_text_keeps_percent_signs() {
        let mut out = Vec::new();
        write_text(&mut out, "%s %d %% %n").unwrap();
        assert_eq!(out, b"%s %d %% %n");
    }

    #[test]
    fn write_text_strips_controls() {
        let mut out = Vec::new();
        write_text(&mut out, "a\r\nb\x07\x1bc").unwrap();
        assert_eq!(out, b"abc");
    }

    // ── AnsiSurface ─────────────────────────────────────────────────────

    #[test]
    fn plain_write_moves_then_writes() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(0, 0));
        term.add_str("OK").unwrap();
        assert_eq!(output(&term), "\x1b[1;1HOK");
        assert_eq!(term.cursor(), Position::new(0, 2));
    }

    #[test]
    fn attribute_change_is_deferred_until_output() {
        let mut term = AnsiSurface::new(Vec::new());
        term.set_attrs(Attr::REVERSE);
        assert!(term.get_ref().is_empty());
        term.set_attrs(Attr::empty());
        term.flush().unwrap();
        assert!(term.get_ref().is_empty());
    }

    #[test]
    fn styled_write_is_closed_before_returning() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(5, 10));
        term.set_attrs(Attr::REVERSE);
        term.add_str("SEL").unwrap();
        assert_eq!(output(&term), "\x1b[6;11H\x1b[7mSEL\x1b[0m");
        assert_eq!(term.attrs(), Attr::REVERSE);
    }

    #[test]
    fn each_styled_write_reemits_its_attrs() {
        let mut term = AnsiSurface::new(Vec::new());
        term.set_attrs(Attr::BOLD);
        term.add_str("a").unwrap();
        term.set_attrs(Attr::BOLD | Attr::REVERSE);
        term.add_str("b").unwrap();
        assert_eq!(output(&term), "\x1b[1ma\x1b[0m\x1b[1;7mb\x1b[0m");
    }

    #[test]
    fn highlighted_render_then_into_inner_leaves_terminal_normal() {
        let mut writer = crate::writer::TextWriter::new(AnsiSurface::new(Vec::new()));
        writer.render(5, 10, "SEL", true).unwrap();
        let wire = writer.into_inner().into_inner();
        assert_eq!(wire, b"\x1b[6;11H\x1b[7mSEL\x1b[0m");
    }

    #[test]
    fn dropping_without_flush_leaves_terminal_normal() {
        let mut wire = Vec::new();
        {
            let mut term = AnsiSurface::new(&mut wire);
            term.set_attrs(Attr::REVERSE | Attr::UNDERLINE);
            term.add_str("x").unwrap();
        }
        assert!(wire.ends_with(b"\x1b[0m"));
    }

    #[test]
    fn failed_styled_write_still_attempts_reset() {
        // Room for the SGR sequence and nothing else.
        let mut term = AnsiSurface::new(Failing { budget: 4 });
        term.set_attrs(Attr::REVERSE);
        assert!(term.add_str("abc").is_err());
    }

    #[test]
    fn styled_clear_is_closed() {
        let mut term = AnsiSurface::new(Vec::new());
        term.set_attrs(Attr::REVERSE);
        term.clear_to_eol().unwrap();
        assert_eq!(output(&term), "\x1b[7m\x1b[K\x1b[0m");
    }

    // ── Clipping ────────────────────────────────────────────────────────

    #[test]
    fn negative_row_writes_nothing() {
        let mut writer = crate::writer::TextWriter::new(AnsiSurface::new(Vec::new()));
        writer.render(-5, -2, "gone", false).unwrap();
        writer.render(-1, 3, "gone", true).unwrap();
        assert!(writer.surface().get_ref().is_empty());
        assert_eq!(writer.surface().cursor(), Position::new(-1, 7));
    }

    #[test]
    fn negative_row_clear_writes_nothing() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(-1, 0));
        term.clear_to_eol().unwrap();
        assert!(term.get_ref().is_empty());
    }

    #[test]
    fn negative_col_drops_leading_chars() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(2, -2));
        term.add_str("abcd").unwrap();
        assert_eq!(output(&term), "\x1b[3;1Hcd");
        assert_eq!(term.cursor(), Position::new(2, 2));
    }

    #[test]
    fn text_entirely_left_of_screen_writes_nothing() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(0, -10));
        term.add_str("abc").unwrap();
        assert!(term.get_ref().is_empty());
        assert_eq!(term.cursor(), Position::new(0, -7));
        term.add_str("0123456789").unwrap();
        assert_eq!(output(&term), "\x1b[1;1H3456789");
    }

    #[test]
    fn wide_char_cut_by_left_edge_becomes_space() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(0, -1));
        term.add_str("中a").unwrap();
        assert_eq!(output(&term), "\x1b[1;1H a");
        assert_eq!(term.cursor(), Position::new(0, 2));
    }

    #[test]
    fn clipped_ansi_matches_screen_buffer() {
        use crate::buffer::ScreenBuffer;

        let mut screen = ScreenBuffer::new(10, 2);
        screen.move_to(Position::new(1, -3));
        screen.add_str("中xyz").unwrap();

        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(1, -3));
        term.add_str("中xyz").unwrap();

        assert_eq!(output(&term), format!("\x1b[2;1H{}", screen.lines()[1]));
        assert_eq!(term.cursor(), screen.cursor());
    }

    #[test]
    fn empty_write_emits_nothing() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(2, 2));
        term.set_attrs(Attr::REVERSE);
        term.add_str("").unwrap();
        assert!(term.get_ref().is_empty());
    }

    #[test]
    fn sequential_writes_skip_cursor_move() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(0, 0));
        term.add_str("ab").unwrap();
        term.add_str("cd").unwrap();
        assert_eq!(output(&term), "\x1b[1;1Habcd");
        assert_eq!(term.cursor().col, 4);
    }

    #[test]
    fn wide_chars_advance_two_columns() {
        let mut term = AnsiSurface::new(Vec::new());
        term.add_str("中a").unwrap();
        assert_eq!(term.cursor().col, 3);
    }

    #[test]
    fn clear_to_eol_emits_el() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(3, 0));
        term.clear_to_eol().unwrap();
        assert_eq!(output(&term), "\x1b[4;1H\x1b[K");
    }

    #[test]
    fn flush_emits_pending_move() {
        let mut term = AnsiSurface::new(Vec::new());
        term.move_to(Position::new(1, 1));
        term.flush().unwrap();
        assert_eq!(output(&term), "\x1b[2;2H");
    }

    #[test]
    fn write_failure_is_reported() {
        let mut term = AnsiSurface::new(Failing { budget: 0 });
        let err = term.add_str("x").unwrap_err();
        assert!(matches!(err, SurfaceError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
