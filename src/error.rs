//! Error types for the fallible edges of the crate (files, JSON, images).
//!
//! The geometry, compass and scoring code never fails; it returns `Option`
//! or documented fallbacks instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading guidance data, sessions or images.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image could not be opened or probed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A named guidance set was neither a list nor a mapping of records
    #[error("Invalid guidance set '{name}': {reason}")]
    InvalidGuidanceSet {
        /// Name of the set (file stem)
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// Loading finished without a single usable guidance entry
    #[error("No guidance entries could be loaded")]
    NoGuidanceLoaded,

    /// Directory given for guidance data does not exist
    #[error("Guidance directory not found: {path:?}")]
    GuidanceDirNotFound {
        /// The directory that was looked up
        path: PathBuf,
    },

    /// Image dimensions are zero
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
}

impl Error {
    /// Create an invalid guidance set error.
    pub fn invalid_guidance_set(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGuidanceSet {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
