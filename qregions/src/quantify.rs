use std::collections::BTreeSet;

use qregions_core::models::Position;
use qregions_core::traits::VariantRecord;
use qregions_io::RegionSpec;
use qregions_overlaprs::{MultiChromBuffer, SweepOverlapper};

use crate::errors::{QuantifyError, Result};
use crate::loader::{LoadOptions, LoadReport, load_region_file};
use crate::registry::LabelRegistry;

///
/// Named regions for quantification, and the sweep state of one pass over a sorted variant
/// stream.
///
/// Regions are loaded once with [`load`](QuantifyRegions::load); after that every record of a
/// coordinate-sorted stream is passed through [`annotate`](QuantifyRegions::annotate), which
/// sets the record's region annotation to the name-sorted, comma-joined labels it overlaps.
///
/// # Examples
///
/// ```no_run
/// use qregions::{LoadOptions, QuantifyRegions};
///
/// let mut regions = QuantifyRegions::default();
/// regions
///     .load(&["CONF:conf.bed", "FP.bed"], &LoadOptions::default())
///     .unwrap();
///
/// if regions.has_regions("CONF") {
///     println!("confident bases: {}", regions.region_size("CONF"));
/// }
/// let labels = regions.regions_at("chr1", 18, 18).unwrap();
/// println!("{}", labels.join(","));
/// ```
#[derive(Debug, Default)]
pub struct QuantifyRegions {
    registry: LabelRegistry,
    index: MultiChromBuffer,
    current_chr: Option<String>,
    current_pos: Option<Position>,
}

impl QuantifyRegions {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Load named region files given as `[=]label:path` or `path`.
    ///
    /// All specs are parsed before any file is opened, so a bad spec fails the call without
    /// touching the loaded regions.
    ///
    pub fn load<S: AsRef<str>>(
        &mut self,
        specs: &[S],
        options: &LoadOptions,
    ) -> Result<Vec<LoadReport>> {
        let specs = specs
            .iter()
            .map(|spec| spec.as_ref().parse::<RegionSpec>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.load_specs(&specs, options)
    }

    /// Load already parsed region specs, in order.
    pub fn load_specs(
        &mut self,
        specs: &[RegionSpec],
        options: &LoadOptions,
    ) -> Result<Vec<LoadReport>> {
        specs
            .iter()
            .map(|spec| load_region_file(&mut self.registry, &mut self.index, spec, options))
            .collect()
    }

    ///
    /// True if a region file registered `name`.
    ///
    /// This is also true for a file that contributed no intervals, which tells "no confident
    /// regions given" apart from "confident region file is empty".
    ///
    pub fn has_regions(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Total region size in bases, 0 for unknown labels.
    pub fn region_size(&self, name: &str) -> u64 {
        self.registry.size_of(name)
    }

    /// `(label, size)` for every label in id order.
    pub fn region_sizes(&self) -> Vec<(&str, u64)> {
        self.registry
            .iter()
            .map(|(id, name)| (name, self.registry.total_size(id)))
            .collect()
    }

    pub fn registry(&self) -> &LabelRegistry {
        &self.registry
    }

    pub fn index(&self) -> &MultiChromBuffer {
        &self.index
    }

    ///
    /// Labels overlapping `[ref_start, ref_end]` on `chrom` (zero-based, inclusive), sorted by
    /// name, then move the sweep floor up to `ref_start - 1`.
    ///
    /// Calls must come in sorted (chromosome, start) order. A start below the current floor
    /// fails with [`QuantifyError::OutOfOrder`]. A chromosome without regions gives no labels.
    ///
    pub fn regions_at(
        &mut self,
        chrom: &str,
        ref_start: Position,
        ref_end: Position,
    ) -> Result<Vec<&str>> {
        if self.current_chr.as_deref() != Some(chrom) {
            self.current_chr = Some(chrom.to_string());
            self.current_pos = None;
        }

        let Some(buffer) = self.index.get_mut(chrom) else {
            return Ok(Vec::new());
        };

        let below_cursor = self.current_pos.is_some_and(|pos| ref_start < pos);
        // a chromosome we come back to keeps the floor it was left at
        let below_floor = buffer.floor().is_some_and(|floor| ref_start < floor);
        if below_cursor || below_floor {
            return Err(QuantifyError::OutOfOrder {
                chrom: chrom.to_string(),
                pos: ref_start,
            });
        }

        let mut regions = BTreeSet::new();
        for (id, name) in self.registry.iter() {
            if buffer.has_overlap(ref_start, ref_end, id) {
                regions.insert(name);
            }
        }

        if ref_start > 1 {
            self.current_pos = Some(ref_start - 1);
            buffer.advance(ref_start - 1);
        }

        Ok(regions.into_iter().collect())
    }

    ///
    /// Add the regions annotation to a record. Records must be passed in sorted order.
    ///
    /// The annotation is removed from the record when no region overlaps it.
    ///
    pub fn annotate<R: VariantRecord>(&mut self, record: &mut R) -> Result<()> {
        let (ref_start, ref_end) = record.ref_span();
        let tag_string = self.regions_at(record.chrom(), ref_start, ref_end)?.join(",");

        if tag_string.is_empty() {
            record.set_regions(None);
        } else {
            record.set_regions(Some(&tag_string));
        }
        Ok(())
    }
}
