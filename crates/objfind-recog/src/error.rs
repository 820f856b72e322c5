//! Error types for objfind-recog

use thiserror::Error;

/// Errors that can occur while describing or labeling objects
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] objfind_core::Error),

    /// Region library error
    #[error("region error: {0}")]
    Region(#[from] objfind_region::RegionError),

    /// Malformed label record
    #[error("invalid label record at line {line}: {message}")]
    InvalidLabel { line: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
