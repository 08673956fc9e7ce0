use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use qregions_core::utils::file_label_stem;

use crate::error::RegionIoError;

/// Marker in front of a label that exempts it from per-line sub-labels: `=CONF:conf.bed`.
pub const PIN_MARKER: char = '=';

/// Separates the label from the path: `FP:fp.bed`.
pub const LABEL_SEPARATOR: char = ':';

///
/// A region file to load, as given on the command line.
///
/// Accepted forms:
///
/// - `label:path` - intervals are registered under `label`
/// - `=label:path` - same, but the label is pinned (no `label_tag` sub-labels are made)
/// - `path` - the label is the file name without `.gz` and its last extension
///
/// # Examples
///
/// ```
/// use qregions_io::RegionSpec;
///
/// let spec: RegionSpec = "=TIER1:/data/tier1.bed.gz".parse().unwrap();
/// assert_eq!(spec.label, "TIER1");
/// assert!(spec.pinned);
///
/// let spec: RegionSpec = "/data/fp.bed".parse().unwrap();
/// assert_eq!(spec.label, "fp");
/// assert!(!spec.pinned);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    pub label: String,
    pub path: PathBuf,
    /// Whether the label carried the [`PIN_MARKER`]
    pub pinned: bool,
}

impl RegionSpec {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FromStr for RegionSpec {
    type Err = RegionIoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegionIoError::InvalidRegionSpec(s.to_string());

        match s.split_once(LABEL_SEPARATOR) {
            Some((label, path)) => {
                let (label, pinned) = match label.strip_prefix(PIN_MARKER) {
                    Some(label) => (label, true),
                    None => (label, false),
                };
                if label.is_empty() || path.is_empty() {
                    return Err(invalid());
                }
                Ok(RegionSpec {
                    label: label.to_string(),
                    path: PathBuf::from(path),
                    pinned,
                })
            }
            None => {
                if s.is_empty() {
                    return Err(invalid());
                }
                let path = PathBuf::from(s);
                let label = file_label_stem(&path);
                if label.is_empty() {
                    return Err(invalid());
                }
                Ok(RegionSpec {
                    label,
                    path,
                    pinned: false,
                })
            }
        }
    }
}

impl Display for RegionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pinned {
            write!(f, "{PIN_MARKER}")?;
        }
        write!(f, "{}{}{}", self.label, LABEL_SEPARATOR, self.path.display())
    }
}
