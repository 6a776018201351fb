// SPDX-License-Identifier: MIT
//
// jot-notes: titled notes kept in one JSON file.
//
//   note   — Note (title, lines, timestamp)
//   store  — NoteStore: create / query / edit / delete, saved on every change
//   error  — NoteError

pub mod error;
pub mod note;
pub mod store;

pub use error::NoteError;
pub use note::Note;
pub use store::{NoteStore, default_path};
