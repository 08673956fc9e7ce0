//! Streaming interval overlap index for sorted genomic queries.
//!
//! This crate provides the per-chromosome interval index used by qregions to annotate a sorted
//! stream of variant records with the labeled regions they fall into. Unlike a general purpose
//! interval tree, the index only supports queries that move forward along the chromosome:
//! once the caller promises (via [`SweepOverlapper::advance`]) that no query will start below a
//! position, every interval ending before that position is dropped for good. Memory is bounded
//! by the intervals that can still be hit, not by the size of the region set.
//!
//! ## Quick Start
//!
//! ```rust
//! use qregions_overlaprs::{IntervalBuffer, SweepOverlapper};
//!
//! let mut buffer = IntervalBuffer::default();
//!
//! // load phase: label 0 covers [10, 19], label 1 covers [15, 24]
//! buffer.insert(10, 19, 0).unwrap();
//! buffer.insert(15, 24, 1).unwrap();
//!
//! // query phase, in increasing start order
//! assert!(buffer.has_overlap(18, 18, 0));
//! assert!(buffer.has_overlap(18, 18, 1));
//!
//! buffer.advance(21);
//! assert!(!buffer.has_overlap(21, 21, 0));
//! assert!(buffer.has_overlap(21, 21, 1));
//! ```
//!
//! ## Genome-wide use
//!
//! [`MultiChromBuffer`] keeps one buffer per chromosome name, created lazily on the first
//! interval seen for that chromosome.

/// Per-chromosome sweep index.
///
/// See [`IntervalBuffer`] for details.
pub mod interval_buffer;

/// One sweep index per chromosome.
///
/// See [`MultiChromBuffer`] for details.
pub mod multi_chrom_buffer;

/// Core traits for sweep overlap operations.
///
/// See [`SweepOverlapper`] for the main trait.
pub mod traits;

use qregions_core::models::{LabelId, Position};
use thiserror::Error;

// re-exports
pub use self::interval_buffer::IntervalBuffer;
pub use self::multi_chrom_buffer::MultiChromBuffer;
pub use self::traits::SweepOverlapper;

/// Errors raised by an index when its load/query protocol is violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// An interval was inserted after the index had been queried or advanced.
    #[error("Can't insert [{start}, {end}] for label {label}: index is already being swept")]
    Sealed {
        start: Position,
        end: Position,
        label: LabelId,
    },
    /// An interval with start after end was inserted.
    #[error("Invalid interval: start {start} is after end {end}")]
    InvertedInterval { start: Position, end: Position },
}
