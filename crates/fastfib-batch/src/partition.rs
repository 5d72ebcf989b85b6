//! Splitting an index range into contiguous per-worker sub-ranges.
//!
//! The cost of producing F(i) grows with i: every addition or product works
//! on operands of about `0.694 * i` bits. An equal-count split therefore
//! hands the last worker the most expensive indices. The work-weighted split
//! assigns index i the weight `i + WORK_BASELINE` and places the boundaries
//! so each sub-range carries about the same total weight.

use std::ops::RangeInclusive;

/// Fixed per-index cost, in the same unit as the index itself. Keeps very
/// low indices (cheap arithmetic, but still a slot write and a clone) from
/// being treated as free.
pub const WORK_BASELINE: u64 = 64;

/// How a range is divided between workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionStrategy {
    /// Sub-ranges of (nearly) equal index count.
    EqualCount,
    /// Sub-ranges of (nearly) equal estimated work.
    #[default]
    WorkWeighted,
}

/// Split `start..=end` into at most `parts` contiguous, ascending, non-empty
/// sub-ranges that cover it exactly. Returns an empty vector when
/// `start > end`.
#[must_use]
pub fn partition(
    start: u64,
    end: u64,
    parts: usize,
    strategy: PartitionStrategy,
) -> Vec<RangeInclusive<u64>> {
    if start > end {
        return Vec::new();
    }
    let len = u128::from(end - start) + 1;
    let parts = u128::try_from(parts.max(1)).map_or(len, |p| p.min(len));

    match strategy {
        PartitionStrategy::EqualCount => equal_count(start, len, parts),
        PartitionStrategy::WorkWeighted => work_weighted(start, end, parts),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn equal_count(start: u64, len: u128, parts: u128) -> Vec<RangeInclusive<u64>> {
    let base = len / parts;
    let rem = len % parts;
    let mut ranges = Vec::with_capacity(parts as usize);
    let mut lo = u128::from(start);
    for k in 0..parts {
        let size = base + u128::from(k < rem);
        let hi = lo + size - 1;
        ranges.push(lo as u64..=hi as u64);
        lo = hi + 1;
    }
    ranges
}

/// Total weight of `start..=x`.
fn prefix_weight(start: u64, x: u64) -> u128 {
    let count = u128::from(x - start) + 1;
    let ends = u128::from(start) + u128::from(x);
    // Exactly one of `count` and `ends` is even.
    let sum = if count % 2 == 0 {
        (count / 2).saturating_mul(ends)
    } else {
        count.saturating_mul(ends / 2)
    };
    sum.saturating_add(count * u128::from(WORK_BASELINE))
}

#[allow(clippy::cast_possible_truncation)]
fn work_weighted(start: u64, end: u64, parts: u128) -> Vec<RangeInclusive<u64>> {
    let total = prefix_weight(start, end);
    let mut ranges = Vec::with_capacity(parts as usize);
    let mut lo = start;

    for k in 1..parts {
        let target = total / parts * k + total % parts * k / parts;
        // Leave at least one index for each remaining sub-range.
        let max_hi = end - (parts - k) as u64;

        // Smallest x in [lo, max_hi] with prefix_weight(start, x) >= target.
        let (mut a, mut b) = (lo, max_hi);
        while a < b {
            let mid = a + (b - a) / 2;
            if prefix_weight(start, mid) >= target {
                b = mid;
            } else {
                a = mid + 1;
            }
        }

        ranges.push(lo..=a);
        lo = a + 1;
    }
    ranges.push(lo..=end);
    ranges
}
