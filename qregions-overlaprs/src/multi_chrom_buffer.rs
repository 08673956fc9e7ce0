//! Genome-wide sweep indexing.
//!
//! This module provides [`MultiChromBuffer`], a map from chromosome name to a single-chromosome
//! sweep index (by default an [`IntervalBuffer`](crate::IntervalBuffer)). Buffers are created
//! lazily on the first interval inserted for a chromosome and are never removed, so a
//! chromosome that received intervals stays known even after everything on it was evicted.
//!
//! # Examples
//!
//! ```
//! use qregions_overlaprs::{MultiChromBuffer, SweepOverlapper};
//!
//! let mut index: MultiChromBuffer = MultiChromBuffer::default();
//! index.insert("chr1", 1000, 1999, 0).unwrap();
//! index.insert("chr2", 1000, 2999, 0).unwrap();
//!
//! let chr1 = index.get_mut("chr1").unwrap();
//! assert!(chr1.has_overlap(1500, 1500, 0));
//! assert!(index.get_mut("chrX").is_none());
//! ```

use fxhash::FxHashMap as HashMap;

use qregions_core::models::{LabelId, Position};

use crate::{IndexError, IntervalBuffer, SweepOverlapper};

/// One sweep index per chromosome.
///
/// See the [module-level documentation](self) for usage examples.
#[derive(Debug, Clone)]
pub struct MultiChromBuffer<O = IntervalBuffer> {
    index_maps: HashMap<String, O>,
}

impl<O> Default for MultiChromBuffer<O> {
    fn default() -> Self {
        MultiChromBuffer {
            index_maps: HashMap::default(),
        }
    }
}

impl<O> MultiChromBuffer<O>
where
    O: SweepOverlapper + Default,
{
    /// Insert an interval into the buffer for `chr`, creating the buffer if needed.
    pub fn insert(
        &mut self,
        chr: &str,
        start: Position,
        end: Position,
        label: LabelId,
    ) -> Result<(), IndexError> {
        if let Some(buffer) = self.index_maps.get_mut(chr) {
            return buffer.insert(start, end, label);
        }

        // no buffer for a chromosome that never got a valid interval
        if start > end {
            return Err(IndexError::InvertedInterval { start, end });
        }

        log::debug!("creating interval index for {chr}");
        self.index_maps
            .entry(chr.to_string())
            .or_default()
            .insert(start, end, label)
    }

    /// The buffer for `chr`, if any interval was ever inserted for it.
    pub fn get_mut(&mut self, chr: &str) -> Option<&mut O> {
        self.index_maps.get_mut(chr)
    }

    pub fn get(&self, chr: &str) -> Option<&O> {
        self.index_maps.get(chr)
    }

    pub fn contains(&self, chr: &str) -> bool {
        self.index_maps.contains_key(chr)
    }

    /// Known chromosome names, sorted.
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut chroms: Vec<&str> = self.index_maps.keys().map(String::as_str).collect();
        chroms.sort_unstable();
        chroms
    }

    /// Number of chromosomes with a buffer
    pub fn len(&self) -> usize {
        self.index_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_maps.is_empty()
    }
}

impl MultiChromBuffer<IntervalBuffer> {
    /// Total number of spans held across all chromosomes.
    pub fn resident(&self) -> usize {
        self.index_maps.values().map(IntervalBuffer::len).sum()
    }
}
