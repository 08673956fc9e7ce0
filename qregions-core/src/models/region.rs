use std::fmt::{self, Display};

use super::interval::Position;

///
/// Region struct, a span `[start, end]` on one chromosome.
/// Both ends are zero-based and inclusive, the way intervals are stored after loading.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: Position,
    pub end: Position,
}

impl Region {
    pub fn new(chr: impl Into<String>, start: Position, end: Position) -> Self {
        Region {
            chr: chr.into(),
            start,
            end,
        }
    }

    ///
    /// Build a region from BED-style coordinates (`end` exclusive).
    ///
    /// Returns `None` when `end` has no inclusive counterpart, i.e. `end == Position::MIN`.
    ///
    pub fn from_half_open(
        chr: impl Into<String>,
        start: Position,
        end: Position,
    ) -> Option<Self> {
        end.checked_sub(1).map(|end| Region::new(chr, start, end))
    }

    ///
    /// True if start lies after end, i.e. the span covers nothing
    ///
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    ///
    /// Get number of bases covered by the region
    ///
    pub fn width(&self) -> u64 {
        if self.is_inverted() {
            0
        } else {
            self.end.abs_diff(self.start).saturating_add(1)
        }
    }

    ///
    /// Get `chr:start-end` string of Region
    ///
    pub fn as_string(&self) -> String {
        format!("{}:{}-{}", self.chr, self.start, self.end)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
