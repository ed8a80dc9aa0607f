#![forbid(unsafe_code)]

//! Grouping strategy.
//!
//! Partitions the flat ordered item list into an ordered sequence of
//! render units. The partition is a pure function of the item count and
//! the policy: recomputed wholesale when either changes, never mutated
//! in place.

use std::num::NonZeroUsize;
use std::ops::Range;

/// How items are grouped into render units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupPolicy {
    /// Fixed-size groups; the last group may be shorter.
    Fixed(NonZeroUsize),
    /// The entire collection as a single unit.
    All,
}

impl GroupPolicy {
    /// Fixed-size policy. A size of zero is clamped to 1.
    #[must_use]
    pub fn fixed(size: usize) -> Self {
        Self::Fixed(NonZeroUsize::new(size.max(1)).unwrap_or(NonZeroUsize::MIN))
    }

    /// Number of units this policy produces for `item_count` items.
    #[must_use]
    pub fn unit_count(&self, item_count: usize) -> usize {
        if item_count == 0 {
            return 0;
        }
        match self {
            Self::Fixed(size) => item_count.div_ceil(size.get()),
            Self::All => 1,
        }
    }
}

/// One render unit: a contiguous slice of the ordered item list.
///
/// Identified by its position in the unit sequence. Immutable once
/// computed for a given item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpan {
    /// Index of this unit in the unit sequence.
    pub index: usize,
    /// Item indices covered, half-open.
    pub items: Range<usize>,
}

impl UnitSpan {
    /// Number of items in this unit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the unit covers no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Partition `item_count` ordered items into render units.
///
/// Concatenating the returned ranges in order reproduces `0..item_count`
/// exactly. Zero items yield zero units; the empty state belongs to the
/// renderer, not to this layer.
#[must_use]
pub fn partition_units(item_count: usize, policy: GroupPolicy) -> Vec<UnitSpan> {
    if item_count == 0 {
        return Vec::new();
    }
    match policy {
        GroupPolicy::All => vec![UnitSpan {
            index: 0,
            items: 0..item_count,
        }],
        GroupPolicy::Fixed(size) => {
            let size = size.get();
            let unit_count = item_count.div_ceil(size);
            let mut units = Vec::with_capacity(unit_count);
            for index in 0..unit_count {
                let start = index * size;
                let end = (start + size).min(item_count);
                units.push(UnitSpan {
                    index,
                    items: start..end,
                });
            }
            units
        }
    }
}
