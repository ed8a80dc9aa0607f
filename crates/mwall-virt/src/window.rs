#![forbid(unsafe_code)]

//! Window state.
//!
//! The authoritative `[start, end)` range of render-unit indices that
//! are currently mounted. Only two things ever mutate it: the forward
//! loader (monotonic growth at the tail) and the eviction scanner
//! (recentering). All arithmetic clamps; an out-of-range request
//! produces a clamped window, never a panic or an error.

use std::ops::Range;

/// The contiguous range of mounted render units.
///
/// Invariant: `0 <= start <= end <= total_units`. The range is always
/// contiguous; expansion and recentering change which sub-range is
/// mounted, never the order of units within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    start: usize,
    end: usize,
    total_units: usize,
}

impl ActiveWindow {
    /// Initial window at first render: `[0, min(initial_load, total))`.
    #[must_use]
    pub fn initial(initial_load: usize, total_units: usize) -> Self {
        Self {
            start: 0,
            end: initial_load.min(total_units),
            total_units,
        }
    }

    /// First mounted unit index (inclusive).
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last mounted unit index.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Total units in the collection.
    #[inline]
    #[must_use]
    pub fn total_units(&self) -> usize {
        self.total_units
    }

    /// Number of mounted units.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether nothing is mounted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The window as a half-open range.
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether a unit index is inside the window.
    #[inline]
    #[must_use]
    pub fn contains(&self, unit: usize) -> bool {
        unit >= self.start && unit < self.end
    }

    /// Whether the window has reached the collection tail.
    #[inline]
    #[must_use]
    pub fn at_tail(&self) -> bool {
        self.end == self.total_units
    }

    /// Grow the tail by `increment` units, saturating at the collection
    /// end. Returns whether the window changed. No-op once at the tail,
    /// no matter how many extra triggers arrive.
    pub fn expand_forward(&mut self, increment: usize) -> bool {
        let new_end = self.end.saturating_add(increment).min(self.total_units);
        if new_end == self.end {
            return false;
        }
        self.end = new_end;
        debug_assert!(self.start <= self.end && self.end <= self.total_units);
        true
    }

    /// Recenter the window around `midpoint` with the given half-width.
    ///
    /// `start = max(0, midpoint - half_width)`,
    /// `end = min(total, midpoint + half_width)`. The result has length
    /// at most `2 * half_width` and stays inside `[0, total_units]`;
    /// near the collection edges the clamp may shorten it. Returns
    /// whether the window changed.
    pub fn recenter(&mut self, midpoint: usize, half_width: usize) -> bool {
        let start = midpoint.saturating_sub(half_width);
        let end = midpoint.saturating_add(half_width).min(self.total_units);
        // A midpoint past the tail could invert the range; keep it valid.
        let start = start.min(end);
        if start == self.start && end == self.end {
            return false;
        }
        self.start = start;
        self.end = end;
        debug_assert!(self.start <= self.end && self.end <= self.total_units);
        true
    }

    /// Re-clamp after the unit list was recomputed. Keeps as much of the
    /// current range as still exists.
    pub fn set_total(&mut self, total_units: usize) {
        self.total_units = total_units;
        self.end = self.end.min(total_units);
        self.start = self.start.min(self.end);
    }
}

/// Persistable window snapshot: the mounted range that should survive a
/// session. The total is re-derived from the item list on restore.
#[cfg(feature = "state-persistence")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct WindowPersistState {
    /// First mounted unit index.
    pub start: usize,
    /// One past the last mounted unit index.
    pub end: usize,
}

#[cfg(feature = "state-persistence")]
impl ActiveWindow {
    /// Snapshot the mounted range for persistence.
    #[must_use]
    pub fn save_state(&self) -> WindowPersistState {
        WindowPersistState {
            start: self.start,
            end: self.end,
        }
    }

    /// Restore a persisted range, clamped against the current total.
    pub fn restore_state(&mut self, state: WindowPersistState) {
        self.end = state.end.min(self.total_units);
        self.start = state.start.min(self.end);
    }
}
