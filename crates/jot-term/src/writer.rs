// SPDX-License-Identifier: MIT
//
// TextWriter — positioned text with an optional reverse-video highlight.
//
// One operation: move to a cell, write a string verbatim, and if asked,
// draw it in reverse video. The highlight is an `AttrScope` guard that
// records the surface's attributes, switches REVERSE on, and puts the
// recorded set back when it drops. Early returns from a failed write and
// panic unwinds both run the drop, so a call always leaves the surface
// with the attributes it found.
//
// Text is passed to the surface as a `&str` argument and nothing else. It
// never becomes a format string, so `%`, `{}` and friends draw as
// themselves.

use std::ops::{Deref, DerefMut};

use crate::cell::Attr;
use crate::error::SurfaceError;
use crate::surface::{Position, Surface};

// ─── RenderRequest ──────────────────────────────────────────────────────────

/// Everything one render call needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest<'a> {
    /// Where the first character goes.
    pub position: Position,
    /// The characters to draw, taken literally.
    pub text: &'a str,
    /// Draw in reverse video.
    pub highlighted: bool,
}

impl<'a> RenderRequest<'a> {
    /// Create a request.
    #[inline]
    #[must_use]
    pub const fn new(position: Position, text: &'a str, highlighted: bool) -> Self {
        Self {
            position,
            text,
            highlighted,
        }
    }
}

// ─── AttrScope ──────────────────────────────────────────────────────────────

/// Attributes added to a surface for the lifetime of the guard.
///
/// The surface is reachable through `Deref`/`DerefMut` while the guard is
/// alive. On drop the attributes are set back to exactly what they were
/// when the guard was created.
///
/// ```
/// use jot_term::buffer::ScreenBuffer;
/// use jot_term::cell::Attr;
/// use jot_term::surface::Surface;
/// use jot_term::writer::AttrScope;
///
/// let mut screen = ScreenBuffer::new(10, 1);
/// screen.set_attrs(Attr::BOLD);
/// {
///     let scope = AttrScope::enable(&mut screen, Attr::REVERSE);
///     assert_eq!(scope.attrs(), Attr::BOLD | Attr::REVERSE);
/// }
/// assert_eq!(screen.attrs(), Attr::BOLD);
/// ```
#[must_use = "the attributes are removed as soon as the scope is dropped"]
pub struct AttrScope<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
    saved: Attr,
}

impl<'s, S: Surface + ?Sized> AttrScope<'s, S> {
    /// Turn `attr` on in addition to whatever is already set.
    pub fn enable(surface: &'s mut S, attr: Attr) -> Self {
        let saved = surface.attrs();
        surface.set_attrs(saved | attr);
        Self { surface, saved }
    }

    /// The attributes that will be restored.
    #[inline]
    #[must_use]
    pub const fn saved(&self) -> Attr {
        self.saved
    }
}

impl<S: Surface + ?Sized> Deref for AttrScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for AttrScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for AttrScope<'_, S> {
    fn drop(&mut self) {
        self.surface.set_attrs(self.saved);
    }
}

// ─── TextWriter ─────────────────────────────────────────────────────────────

/// Renders positioned text into a [`Surface`].
///
/// The writer holds the surface for as long as it lives, and every render
/// takes `&mut self`, so renders into one surface are always serialized.
/// Pass `&mut surface` to keep ownership with the caller.
///
/// ```
/// use jot_term::buffer::ScreenBuffer;
/// use jot_term::writer::TextWriter;
///
/// let mut screen = ScreenBuffer::new(20, 6);
/// let mut writer = TextWriter::new(&mut screen);
/// writer.render(0, 0, "OK", false).unwrap();
/// writer.render(5, 10, "SEL", true).unwrap();
///
/// assert_eq!(screen.row_text(0).unwrap().trim_end(), "OK");
/// assert!(screen.get(5, 10).unwrap().is_reverse());
/// ```
#[derive(Debug)]
pub struct TextWriter<S: Surface> {
    surface: S,
}

impl<S: Surface> TextWriter<S> {
    /// Wrap a surface.
    #[inline]
    #[must_use]
    pub const fn new(surface: S) -> Self {
        Self { surface }
    }

    /// The surface being drawn into.
    #[inline]
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for collaborators such as line
    /// clearing.
    #[inline]
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back.
    #[inline]
    pub fn into_inner(self) -> S {
        self.surface
    }

    /// Draw `text` starting at `(row, col)`, in reverse video if
    /// `highlighted`.
    ///
    /// Clipping and wrapping at the edges are up to the surface. The
    /// surface's attributes are the same on return as on entry, whether the
    /// write succeeds or not.
    ///
    /// # Errors
    ///
    /// Passes through a failure reported by the surface's write.
    pub fn render(
        &mut self,
        row: i32,
        col: i32,
        text: &str,
        highlighted: bool,
    ) -> Result<(), SurfaceError> {
        self.render_at(Position::new(row, col), text, highlighted)
    }

    /// [`render`](Self::render) with a [`Position`].
    ///
    /// # Errors
    ///
    /// Passes through a failure reported by the surface's write.
    pub fn render_at(
        &mut self,
        position: Position,
        text: &str,
        highlighted: bool,
    ) -> Result<(), SurfaceError> {
        tracing::trace!(
            row = position.row,
            col = position.col,
            highlighted,
            chars = text.chars().count(),
            "render"
        );

        if highlighted {
            let mut scope = AttrScope::enable(&mut self.surface, Attr::REVERSE);
            write_at(&mut *scope, position, text)
        } else {
            write_at(&mut self.surface, position, text)
        }
    }

    /// [`render`](Self::render) from a [`RenderRequest`].
    ///
    /// # Errors
    ///
    /// Passes through a failure reported by the surface's write.
    pub fn render_request(&mut self, request: &RenderRequest<'_>) -> Result<(), SurfaceError> {
        self.render_at(request.position, request.text, request.highlighted)
    }
}

fn write_at<S: Surface + ?Sized>(
    surface: &mut S,
    position: Position,
    text: &str,
) -> Result<(), SurfaceError> {
    surface.move_to(position);
    surface.add_str(text)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
