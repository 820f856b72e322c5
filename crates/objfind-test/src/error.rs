//! Error types for the regression harness

use thiserror::Error;

/// Errors raised while writing or checking regression output
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write an output image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// A raster description could not be turned into a Pix
    #[error("invalid raster description: {0}")]
    InvalidRaster(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core error
    #[error("core error: {0}")]
    Core(#[from] objfind_core::Error),
}

/// Result type for harness operations
pub type TestResult<T> = Result<T, TestError>;
