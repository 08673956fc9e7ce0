use qregions_core::models::{LabelId, Position};

use crate::IndexError;

/// A labeled interval index that is loaded once and then queried in a single forward sweep.
///
/// Implementations go through two phases:
///
/// 1. **load**: any number of [`insert`](SweepOverlapper::insert) calls, in any order;
/// 2. **sweep**: [`has_overlap`](SweepOverlapper::has_overlap) and
///    [`advance`](SweepOverlapper::advance) calls. The first of these ends the load phase;
///    later inserts fail with [`IndexError::Sealed`].
///
/// Coordinates are zero-based and both ends are inclusive.
pub trait SweepOverlapper {
    /// Record the interval `[start, end]` under `label`.
    fn insert(&mut self, start: Position, end: Position, label: LabelId) -> Result<(), IndexError>;

    /// True iff some interval stored under `label` intersects `[start, end]` and has not been
    /// evicted.
    fn has_overlap(&mut self, start: Position, end: Position, label: LabelId) -> bool;

    /// Promise that no later query will start below `position`. Intervals ending strictly
    /// before `position` may be dropped. A position at or below the current floor is a no-op.
    fn advance(&mut self, position: Position);

    /// The highest position passed to [`advance`](SweepOverlapper::advance) so far.
    fn floor(&self) -> Option<Position>;
}
