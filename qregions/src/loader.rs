use std::path::PathBuf;

use qregions_core::CoreError;
use qregions_core::utils::get_dynamic_reader;
use qregions_io::{BedLine, BedReader, RegionSpec};
use qregions_overlaprs::MultiChromBuffer;

use crate::errors::{QuantifyError, Result};
use crate::registry::{LabelRegistry, is_fixed};

/// Options for reading region files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Prefix `chr` to chromosome names starting with 1-9, X, Y or M.
    pub fix_chr: bool,
}

/// What happened while loading one region file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub label: String,
    pub path: PathBuf,
    /// Intervals that made it into the index
    pub accepted: usize,
    /// Malformed lines and inverted intervals
    pub skipped: usize,
}

///
/// Read one region file into the registry and the per-chromosome index.
///
/// Bad lines are logged and skipped: unparsable or non UTF-8 lines, inverted intervals and
/// intervals with a negative or unrepresentable coordinate. An unreadable file is an error. Every accepted interval
/// goes in under the region spec's label and, when the line has a 4th column and the label is not
/// fixed, a second time under the composite label `<label>_<tag>`.
///
pub fn load_region_file(
    registry: &mut LabelRegistry,
    index: &mut MultiChromBuffer,
    spec: &RegionSpec,
    options: &LoadOptions,
) -> Result<LoadReport> {
    let unreadable = |source: CoreError| QuantifyError::UnreadableRegionFile {
        path: spec.path.clone(),
        source,
    };

    let fixed = is_fixed(spec);
    let reader = get_dynamic_reader(&spec.path).map_err(unreadable)?;
    let label_id = registry.resolve(&spec.label);

    let mut accepted = 0;
    let mut skipped = 0;

    for line in BedReader::new(reader) {
        let (line_number, line) = line.map_err(|e| unreadable(CoreError::Io(e)))?;

        let mut record = match line {
            BedLine::Record(record) => record,
            BedLine::Comment => {
                log::debug!("skipping {}:{line_number}", spec.path.display());
                continue;
            }
            BedLine::Malformed { line, reason } => {
                log::warn!(
                    "ignoring mis-formatted input line in {} : {line} ({reason})",
                    spec.path.display()
                );
                skipped += 1;
                continue;
            }
        };

        if options.fix_chr {
            record.normalize_chrom();
        }

        let region = record
            .to_region()
            .filter(|region| region.start >= 0 && !region.is_inverted());
        let Some(region) = region else {
            log::warn!(
                "ignoring invalid interval in {} : {}\t{}\t{}",
                spec.path.display(),
                record.chr,
                record.start,
                record.end
            );
            skipped += 1;
            continue;
        };

        let width = region.width();
        let this_label_id = match record.tag.as_deref() {
            Some(tag) if !fixed => registry.resolve_composite(&spec.label, tag),
            _ => label_id,
        };

        index.insert(&region.chr, region.start, region.end, this_label_id)?;
        registry.add_size(this_label_id, width);

        if this_label_id != label_id {
            // also count towards the file's own label
            index.insert(&region.chr, region.start, region.end, label_id)?;
            registry.add_size(label_id, width);
        }
        accepted += 1;
    }

    log::info!(
        "Added region file '{}' as '{}' ({} intervals)",
        spec.path.display(),
        spec.label,
        accepted
    );

    Ok(LoadReport {
        label: spec.label.clone(),
        path: spec.path.clone(),
        accepted,
        skipped,
    })
}
