//! Renderer errors.
//!
//! The renderer is total on input: no byte sequence is an error. Only
//! misuse of the lifecycle and sink failures surface to the caller.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The writer received input after `complete()`.
    #[error("renderer used after end of stream")]
    EndOfStream,

    /// The sink failed; the error is passed through unchanged.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
