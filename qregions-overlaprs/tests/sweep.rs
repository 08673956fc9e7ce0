use qregions_core::models::{LabelId, Position};
use qregions_overlaprs::{IntervalBuffer, SweepOverlapper};

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::*;

const CHROM_LEN: Position = 100_000_000;
const LABELS: LabelId = 4;

/// Raw intervals of one label sorted by start, with the running maximum of their ends.
struct Oracle {
    starts: Vec<Position>,
    max_end: Vec<Position>,
}

impl Oracle {
    fn new(mut intervals: Vec<(Position, Position)>) -> Self {
        intervals.sort_unstable();
        let starts = intervals.iter().map(|iv| iv.0).collect();
        let mut max_end = Vec::with_capacity(intervals.len());
        let mut running = Position::MIN;
        for iv in &intervals {
            running = running.max(iv.1);
            max_end.push(running);
        }
        Oracle { starts, max_end }
    }

    fn has_overlap(&self, start: Position, end: Position) -> bool {
        // intervals starting at or before `end`; one of them must reach `start`
        let n = self.starts.partition_point(|&s| s <= end);
        n > 0 && self.max_end[n - 1] >= start
    }
}

fn random_intervals(n: usize, seed: u64) -> Vec<(Position, Position, LabelId)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let start = rng.random_range(0..CHROM_LEN);
            let len = rng.random_range(1..2_000);
            (start, start + len - 1, rng.random_range(0..LABELS))
        })
        .collect()
}

fn build(intervals: &[(Position, Position, LabelId)]) -> (IntervalBuffer, Vec<Oracle>) {
    let mut buffer = IntervalBuffer::default();
    let mut per_label: Vec<Vec<(Position, Position)>> = vec![Vec::new(); LABELS as usize];
    for &(start, end, label) in intervals {
        buffer.insert(start, end, label).unwrap();
        per_label[label as usize].push((start, end));
    }
    (buffer, per_label.into_iter().map(Oracle::new).collect())
}

#[rstest]
fn test_large_sweep_matches_oracle_and_evicts() {
    let intervals = random_intervals(1_000_000, 7);
    let (mut buffer, oracles) = build(&intervals);
    assert_eq!(buffer.inserted(), 1_000_000);

    let mut rng = StdRng::seed_from_u64(11);
    let mut queries: Vec<Position> = (0..200_000)
        .map(|_| rng.random_range(0..CHROM_LEN))
        .collect();
    queries.sort_unstable();

    let mut peak_after_half = 0;
    for (i, &start) in queries.iter().enumerate() {
        let end = start + rng.random_range(0..50);
        for label in 0..LABELS {
            assert_eq!(
                buffer.has_overlap(start, end, label),
                oracles[label as usize].has_overlap(start, end),
                "query [{start}, {end}] label {label}"
            );
        }
        if start > 1 {
            buffer.advance(start - 1);
        }
        if i > queries.len() / 2 {
            peak_after_half = peak_after_half.max(buffer.len());
        }
    }

    // past the middle of the chromosome at most about half of the runs can still be resident
    let total_runs = buffer.len() + buffer.evicted();
    assert!(peak_after_half * 10 < total_runs * 6, "{peak_after_half} of {total_runs}");
    // only intervals reaching past the last query survive
    assert!(buffer.len() < 1_000, "{} runs resident", buffer.len());
}

#[rstest]
#[case(3)]
#[case(17)]
#[case(2024)]
fn test_dense_sweep_matches_oracle(#[case] seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let intervals: Vec<(Position, Position, LabelId)> = (0..5_000)
        .map(|_| {
            let start = rng.random_range(0..100_000);
            let len = rng.random_range(1..500);
            (start, start + len - 1, rng.random_range(0..LABELS))
        })
        .collect();
    let (mut buffer, oracles) = build(&intervals);

    // every position, with long queries mixed in, the way deletions show up in a VCF
    for start in 0..100_500 {
        let end = if start % 97 == 0 { start + 1_000 } else { start };
        for label in 0..LABELS {
            assert_eq!(
                buffer.has_overlap(start, end, label),
                oracles[label as usize].has_overlap(start, end),
            );
        }
        if start > 1 {
            buffer.advance(start - 1);
        }
    }
    assert!(buffer.is_empty());
}

#[rstest]
fn test_repeated_advance_does_not_change_answers() {
    let intervals = random_intervals(10_000, 99);
    let (mut buffer, _) = build(&intervals);

    buffer.advance(CHROM_LEN / 2);
    let before: Vec<bool> = (0..LABELS)
        .map(|label| buffer.has_overlap(CHROM_LEN / 2, CHROM_LEN / 2 + 100_000, label))
        .collect();
    let resident = buffer.len();

    buffer.advance(CHROM_LEN / 2);
    buffer.advance(CHROM_LEN / 4);
    let after: Vec<bool> = (0..LABELS)
        .map(|label| buffer.has_overlap(CHROM_LEN / 2, CHROM_LEN / 2 + 100_000, label))
        .collect();

    assert_eq!(before, after);
    assert_eq!(buffer.len(), resident);
    assert_eq!(buffer.floor(), Some(CHROM_LEN / 2));
}
