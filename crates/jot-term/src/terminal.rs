// SPDX-License-Identifier: MIT
//
// Terminal queries.
//
// Only the size query lives here. Entering raw mode, switching screens and
// restoring the terminal belong to whoever owns the session; the writer
// assumes that has already happened.
//
// Safety: `get_size` calls `ioctl(TIOCGWINSZ)`, the standard POSIX query
// for window size. The unsafe block is the single FFI call.
#![allow(unsafe_code)]

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns.
    pub cols: u16,
    /// Number of rows.
    pub rows: u16,
}

impl Size {
    /// The classic VT100 screen, used when nothing better is known.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    /// Create a size.
    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Query the size of the terminal on stdout.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}
