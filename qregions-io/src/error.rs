use std::io;
use thiserror::Error;

use qregions_core::CoreError;

/// Error type for qregions-io operations.
#[derive(Error, Debug)]
pub enum RegionIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to open or create a file.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A region specification could not be split into a label and a path.
    #[error("Invalid region name: {0:?}")]
    InvalidRegionSpec(String),

    /// A VCF data line could not be parsed.
    #[error("Malformed VCF line {line_number}: {reason}")]
    MalformedVcfLine { line_number: usize, reason: String },
}

/// Result type alias for qregions-io operations.
pub type Result<T> = std::result::Result<T, RegionIoError>;
