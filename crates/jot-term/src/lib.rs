// SPDX-License-Identifier: MIT
//
// jot-term — positioned text rendering for jot.
//
// The centre of the crate is `writer::TextWriter`: move to a cell, write a
// string verbatim, and optionally wrap the write in reverse video. The
// highlight is held by a scope guard, so the surface's attributes are back
// to where they started on every exit path, including failed writes and
// panics.
//
// Everything else is a collaborator the writer talks to through the
// `surface::Surface` trait: an in-memory cell grid for tests and plain-text
// dumps, and an ANSI backend that drives a real terminal through any
// `io::Write`. Terminal setup (raw mode, alternate screen, input) is left
// to the caller.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod error;
pub mod surface;
pub mod terminal;
pub mod view;
pub mod writer;

pub use error::SurfaceError;
pub use surface::{Position, Surface};
pub use writer::{RenderRequest, TextWriter};
