//! Error type of the extraction pipeline

use thiserror::Error;

/// Errors from any stage of [`crate::extract_objects`] or the CLI
#[derive(Debug, Error)]
pub enum ObjFindError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] objfind_core::Error),

    /// Image decoding or encoding failed
    #[error("io error: {0}")]
    Io(#[from] objfind_io::IoError),

    /// Preprocessing failed
    #[error("color error: {0}")]
    Color(#[from] objfind_color::ColorError),

    /// Extraction failed
    #[error("region error: {0}")]
    Region(#[from] objfind_region::RegionError),

    /// Reading labels failed
    #[error("recog error: {0}")]
    Recog(#[from] objfind_recog::RecogError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for pipeline operations
pub type ObjFindResult<T> = Result<T, ObjFindError>;
