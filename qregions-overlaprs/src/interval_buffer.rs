use qregions_core::models::{LabelId, LabeledInterval, Position};

use super::{IndexError, SweepOverlapper};

/// A streaming interval index for one chromosome.
///
/// `IntervalBuffer` stores labeled, inclusive intervals and answers "does label `l` cover any base
/// of `[start, end]`?" for queries that arrive in (almost) increasing start order, as produced by
/// a coordinate-sorted variant file.
///
/// Every label gets its own track. While loading, a track is just an unsorted list of spans. On
/// the first query or advance the buffer is *sealed*: each track is sorted by start and
/// overlapping or abutting spans are merged into disjoint runs. A boolean overlap question for
/// one label has the same answer against the merged runs as against the raw intervals, and
/// disjoint runs are ordered by start and by end at the same time, so
///
/// - a query is a binary search for the first run ending at or after the query start,
/// - an advance pops runs off the front of each track.
///
/// Evicted runs are compacted away once they make up half of a track, so the resident set
/// follows the sweep window rather than the whole chromosome.
///
/// # Examples
///
/// ```
/// use qregions_overlaprs::{IntervalBuffer, SweepOverlapper};
///
/// let mut buffer = IntervalBuffer::default();
/// buffer.insert(100, 199, 0).unwrap();
/// buffer.insert(150, 299, 0).unwrap();
/// buffer.insert(400, 499, 1).unwrap();
///
/// assert!(buffer.has_overlap(250, 260, 0));
/// assert!(!buffer.has_overlap(250, 260, 1));
///
/// buffer.advance(350);
/// assert_eq!(buffer.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntervalBuffer {
    /// One track per label id, indexed by label id
    tracks: Vec<LabelTrack>,
    /// Number of intervals inserted during the load phase
    inserted: usize,
    /// Number of merged runs dropped by advance
    evicted: usize,
    /// Highest position passed to advance
    floor: Option<Position>,
    /// Whether the load phase is over
    sealed: bool,
}

#[derive(Debug, Clone, Default)]
struct LabelTrack {
    /// Raw spans collected while loading
    pending: Vec<(Position, Position)>,
    /// Disjoint runs sorted by start (and therefore by end)
    runs: Vec<(Position, Position)>,
    /// Index of the first live run; everything before it has been evicted
    head: usize,
}

impl LabelTrack {
    fn seal(&mut self) {
        let mut spans = std::mem::take(&mut self.pending);
        spans.sort_unstable();

        let mut runs: Vec<(Position, Position)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match runs.last_mut() {
                Some(last) if start <= last.1.saturating_add(1) => {
                    if end > last.1 {
                        last.1 = end;
                    }
                }
                _ => runs.push((start, end)),
            }
        }
        runs.shrink_to_fit();

        self.runs = runs;
        self.head = 0;
    }

    #[inline]
    fn live(&self) -> &[(Position, Position)] {
        &self.runs[self.head..]
    }

    #[inline]
    fn has_overlap(&self, start: Position, end: Position) -> bool {
        let live = self.live();
        let idx = Self::lower_bound(start, live);
        live.get(idx).is_some_and(|run| run.0 <= end)
    }

    /// First index whose run ends at or after `start`.
    #[inline]
    fn lower_bound(start: Position, runs: &[(Position, Position)]) -> usize {
        let mut size = runs.len();
        let mut low = 0;

        while size > 0 {
            let half = size / 2;
            let other_half = size - half;
            let probe = low + half;
            let other_low = low + other_half;
            size = half;
            low = if runs[probe].1 < start { other_low } else { low }
        }
        low
    }

    /// Drop runs ending before `position`, returns how many were dropped.
    fn evict(&mut self, position: Position) -> usize {
        let before = self.head;
        while self.head < self.runs.len() && self.runs[self.head].1 < position {
            self.head += 1;
        }
        let dropped = self.head - before;

        if self.head > 0 && self.head * 2 >= self.runs.len() {
            self.runs.drain(..self.head);
            self.head = 0;
            if self.runs.capacity() > 2 * self.runs.len() + 16 {
                self.runs.shrink_to_fit();
            }
        }
        dropped
    }

    fn len(&self) -> usize {
        self.pending.len() + self.runs.len() - self.head
    }
}

impl SweepOverlapper for IntervalBuffer {
    /// Insert a labeled interval. Only allowed before the first query or advance.
    /// ```
    /// use qregions_overlaprs::{IndexError, IntervalBuffer, SweepOverlapper};
    ///
    /// let mut buffer = IntervalBuffer::default();
    /// buffer.insert(0, 5, 0).unwrap();
    /// assert_eq!(
    ///     buffer.insert(6, 5, 0),
    ///     Err(IndexError::InvertedInterval { start: 6, end: 5 })
    /// );
    ///
    /// buffer.advance(2);
    /// assert!(matches!(buffer.insert(9, 10, 0), Err(IndexError::Sealed { .. })));
    /// ```
    fn insert(&mut self, start: Position, end: Position, label: LabelId) -> Result<(), IndexError> {
        if start > end {
            return Err(IndexError::InvertedInterval { start, end });
        }
        if self.sealed {
            return Err(IndexError::Sealed { start, end, label });
        }

        let idx = label as usize;
        if idx >= self.tracks.len() {
            self.tracks.resize_with(idx + 1, LabelTrack::default);
        }
        self.tracks[idx].pending.push((start, end));
        self.inserted += 1;
        Ok(())
    }

    #[inline]
    fn has_overlap(&mut self, start: Position, end: Position, label: LabelId) -> bool {
        self.seal();
        self.tracks
            .get(label as usize)
            .is_some_and(|track| track.has_overlap(start, end))
    }

    fn advance(&mut self, position: Position) {
        self.seal();
        if self.floor.is_some_and(|floor| position <= floor) {
            return;
        }
        self.floor = Some(position);

        let dropped: usize = self
            .tracks
            .iter_mut()
            .map(|track| track.evict(position))
            .sum();
        if dropped > 0 {
            log::trace!("evicted {dropped} runs below {position}");
            self.evicted += dropped;
        }
    }

    #[inline]
    fn floor(&self) -> Option<Position> {
        self.floor
    }
}

impl IntervalBuffer {
    /// End the load phase: sort and merge every label track.
    ///
    /// Called implicitly by the first query or advance; calling it again is a no-op.
    pub fn seal(&mut self) {
        if self.sealed {
            return;
        }
        for track in self.tracks.iter_mut() {
            track.seal();
        }
        self.sealed = true;
    }

    /// Whether the load phase is over
    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of spans currently held: raw intervals before sealing, live merged runs after.
    pub fn len(&self) -> usize {
        self.tracks.iter().map(LabelTrack::len).sum()
    }

    /// Check if the buffer holds nothing that could still be hit
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of intervals inserted during the load phase
    #[inline]
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Number of merged runs evicted so far
    #[inline]
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Number of label tracks (one past the highest label id inserted)
    #[inline]
    pub fn label_count(&self) -> usize {
        self.tracks.len()
    }

    /// Iterate the live spans of one label after sealing, as labeled intervals in start order.
    pub fn live_intervals(&self, label: LabelId) -> impl Iterator<Item = LabeledInterval> + '_ {
        self.tracks
            .get(label as usize)
            .map_or(&[][..], |track| track.live())
            .iter()
            .map(move |&(start, end)| LabeledInterval::new(start, end, label))
    }
}
