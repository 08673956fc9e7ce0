//! # qregions-core
//!
//! Shared models and small utilities for the qregions workspace: labeled
//! intervals, chromosome-name normalization and gzip-transparent readers and
//! writers.
//!
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;

pub use errors::{CoreError, Result};
pub use models::{LabelId, LabeledInterval, Position, Region};
pub use traits::VariantRecord;
