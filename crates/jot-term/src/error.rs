// SPDX-License-Identifier: MIT
//
// Errors reported by rendering surfaces.
//
// The writer never produces errors of its own. A surface that talks to real
// I/O can fail, and that failure is passed back to the caller unchanged.

use std::io;

use thiserror::Error;

/// A surface rejected an output operation.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The underlying writer failed.
    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),
}
