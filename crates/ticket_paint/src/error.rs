//! Paint error types

use std::io;
use thiserror::Error;

/// Errors that can occur when rendering a ticket to pixels
#[derive(Error, Debug)]
pub enum PaintError {
    /// IO error when writing output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Pixmap could not be allocated for the requested size
    #[error("invalid pixmap size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding error: {0}")]
    Encode(String),
}

/// Result type for paint operations
pub type Result<T> = std::result::Result<T, PaintError>;
