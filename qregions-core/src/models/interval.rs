use std::cmp::Ordering::{self};

/// Genome coordinate. Zero-based; signed so that "no position yet" can sit below zero.
pub type Position = i64;

/// Dense identifier of a region label, assigned in first-seen order.
pub type LabelId = u32;

/// Represent a labeled span `[start, end]`.
/// Both ends are zero-based and inclusive.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct LabeledInterval {
    pub start: Position,
    pub end: Position,
    pub label: LabelId,
}

impl Ord for LabeledInterval {
    #[inline]
    fn cmp(&self, other: &LabeledInterval) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Less => Ordering::Less,
            Ordering::Greater => Ordering::Greater,
            Ordering::Equal => match self.end.cmp(&other.end) {
                Ordering::Equal => self.label.cmp(&other.label),
                ord => ord,
            },
        }
    }
}

impl PartialOrd for LabeledInterval {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl LabeledInterval {
    pub fn new(start: Position, end: Position, label: LabelId) -> Self {
        LabeledInterval { start, end, label }
    }

    /// Number of bases covered, `end - start + 1`. Zero for an inverted span.
    #[inline]
    pub fn width(&self) -> u64 {
        if self.end < self.start {
            0
        } else {
            self.end.abs_diff(self.start).saturating_add(1)
        }
    }

    /// Check if this interval overlaps the inclusive span `[start, end]`
    #[inline]
    pub fn overlap(&self, start: Position, end: Position) -> bool {
        self.start <= end && self.end >= start
    }

    /// Number of bases shared with another interval
    #[inline]
    pub fn intersect(&self, other: &LabeledInterval) -> u64 {
        let lo = std::cmp::max(self.start, other.start);
        let hi = std::cmp::min(self.end, other.end);
        if hi < lo { 0 } else { hi.abs_diff(lo).saturating_add(1) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(10, 19, true)]
    #[case(19, 19, true)]
    #[case(0, 10, true)]
    #[case(20, 30, false)]
    #[case(0, 9, false)]
    fn test_overlap_is_inclusive(#[case] start: Position, #[case] end: Position, #[case] hit: bool) {
        let iv = LabeledInterval::new(10, 19, 0);
        assert_eq!(iv.overlap(start, end), hit);
    }

    #[rstest]
    fn test_width() {
        assert_eq!(LabeledInterval::new(10, 19, 0).width(), 10);
        assert_eq!(LabeledInterval::new(5, 5, 0).width(), 1);
        assert_eq!(LabeledInterval::new(6, 5, 0).width(), 0);
        assert_eq!(
            LabeledInterval::new(Position::MIN, Position::MAX, 0).width(),
            u64::MAX
        );
    }

    #[rstest]
    fn test_intersect() {
        let a = LabeledInterval::new(10, 20, 0);
        let b = LabeledInterval::new(15, 25, 1);
        let c = LabeledInterval::new(30, 40, 1);
        assert_eq!(a.intersect(&b), 6);
        assert_eq!(a.intersect(&c), 0);
    }

    #[rstest]
    fn test_ordering_by_start_then_end() {
        let mut ivs = vec![
            LabeledInterval::new(5, 9, 0),
            LabeledInterval::new(1, 20, 1),
            LabeledInterval::new(1, 3, 2),
        ];
        ivs.sort();
        assert_eq!(
            ivs.iter().map(|iv| iv.label).collect::<Vec<_>>(),
            vec![2, 1, 0]
        );
    }
}
