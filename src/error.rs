//! # Error Types
//!
//! This module defines error types used throughout the lunares library.

use thiserror::Error;

/// Main error type for lunares operations
#[derive(Debug, Error)]
pub enum LunaresError {
    /// Dot pitch below the 2-pixel minimum. Rejected before any allocation.
    #[error("Invalid dot pitch {0}: must be at least 2")]
    InvalidPitch(usize),

    /// A render buffer allocation failed. Buffers already allocated for the
    /// pass are dropped before this is returned.
    #[error("Out of memory while allocating render buffers")]
    OutOfMemory,

    /// Image decode/encode error from the file I/O layer
    #[error("Image error: {0}")]
    Image(String),

    /// Host region error (mismatched buffer size, unsupported layout)
    #[error("Region error: {0}")]
    Region(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
