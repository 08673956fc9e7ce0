//! # qregions
//!
//! Streaming annotation of variant records with the labeled genomic regions they overlap.
//!
//! Labeled interval files (BED-like, plain or gzipped) are loaded into a per-chromosome sweep
//! index. A coordinate-sorted stream of variant records is then passed through
//! [`QuantifyRegions::annotate`], which tags every record with the sorted, comma-joined labels of
//! the regions it overlaps, and drops index entries the sweep has moved past.
//!
//! Labels come from the region spec (`label:path`, `=label:path` or a bare `path`). Lines with a
//! 4th column also count towards a composite label `label_tag`, unless the label is pinned with
//! `=` or is the reserved confident-region label `CONF`.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use qregions::core::utils::get_dynamic_reader;
//! use qregions::io::{VcfReader, VcfRecord};
//! use qregions::{LoadOptions, QuantifyRegions};
//!
//! let mut regions = QuantifyRegions::new();
//! regions.load(&["CONF:conf.bed", "FP.bed"], &LoadOptions::default()).unwrap();
//!
//! let reader = get_dynamic_reader(Path::new("calls.vcf.gz")).unwrap();
//! let mut vcf = VcfReader::new(reader).unwrap();
//! vcf.header_mut().ensure_regions_info();
//!
//! for record in vcf {
//!     let mut record: VcfRecord = record.unwrap();
//!     regions.annotate(&mut record).unwrap();
//!     println!("{record}");
//! }
//! ```

pub mod errors;
pub mod loader;
pub mod quantify;
pub mod registry;

pub use errors::{QuantifyError, Result};
pub use loader::{LoadOptions, LoadReport, load_region_file};
pub use quantify::QuantifyRegions;
pub use registry::{CONF_LABEL, LabelRegistry, composite_label, is_fixed, is_reserved_label};

#[doc(inline)]
pub use qregions_core as core;

#[doc(inline)]
pub use qregions_io as io;

#[doc(inline)]
pub use qregions_overlaprs as overlaprs;

pub use qregions_core::VariantRecord;
pub use qregions_io::RegionSpec;
