use std::path::PathBuf;

use qregions_core::CoreError;
use qregions_core::models::Position;
use qregions_io::RegionIoError;
use qregions_overlaprs::IndexError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuantifyError {
    /// Bad region specification or other io-level failure
    #[error(transparent)]
    RegionIo(#[from] RegionIoError),

    #[error("Can't read region file {path:?}: {source}")]
    UnreadableRegionFile {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    /// A record started before the sweep floor of its chromosome.
    #[error("Variants out of order at {chrom}:{pos}")]
    OutOfOrder { chrom: String, pos: Position },

    #[error(transparent)]
    Index(#[from] IndexError),
}

pub type Result<T> = std::result::Result<T, QuantifyError>;
