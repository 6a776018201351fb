// SPDX-License-Identifier: MIT

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from [`NoteStore`](crate::NoteStore).
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not a note file: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot encode notes: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("a note titled \"{0}\" already exists")]
    Duplicate(String),

    #[error("no note titled \"{0}\"")]
    NotFound(String),
}
