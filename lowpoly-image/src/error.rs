//! Errors of image loading and saving

use lowpoly_core::prelude::{GenerateLowPolyError, SourceImageError};
use std::fmt;
use std::path::PathBuf;

/// Error thrown while reading, producing or writing images.
#[derive(Debug)]
pub enum LowPolyImageError {
    /// Failed to load source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to encode or save image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Frame buffer does not match its dimensions
    InvalidFrame {
        /// Frame width
        width: usize,
        /// Frame height
        height: usize,
    },

    /// Low-poly generation failed
    Generate(GenerateLowPolyError),
}

impl fmt::Display for LowPolyImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidFrame { width, height } => {
                write!(f, "Frame buffer does not match size {width}x{height}")
            }
            Self::Generate(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for LowPolyImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Generate(error) => Some(error),
            Self::InvalidFrame { .. } => None,
        }
    }
}

impl From<GenerateLowPolyError> for LowPolyImageError {
    fn from(error: GenerateLowPolyError) -> Self {
        Self::Generate(error)
    }
}

impl From<SourceImageError> for LowPolyImageError {
    fn from(error: SourceImageError) -> Self {
        Self::Generate(GenerateLowPolyError::SourceImage(error))
    }
}

/// Convenience type alias for image results
pub type Result<T> = std::result::Result<T, LowPolyImageError>;
