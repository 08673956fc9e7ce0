//! # Input/Output utilities for qregions.
//!
//! This small crate holds the pieces that sit between files on disk and the annotation engine:
//! parsing of region-file specifications (`[=]label:path`), tokenizing of BED-like interval
//! files, and a plain-text VCF reader/writer whose records can be annotated in place.
//!
pub mod bed;
pub mod error;
pub mod region_spec;
pub mod vcf;

// re-expose core functions
pub use bed::*;
pub use error::*;
pub use region_spec::*;
pub use vcf::*;
