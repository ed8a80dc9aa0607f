#![forbid(unsafe_code)]

//! Main-axis geometry.
//!
//! The engine reasons about one scroll axis only. A [`Span`] is a
//! closed interval of logical units on that axis (fractional, since
//! host viewports report fractional logical pixels). [`ViewportMetrics`]
//! is the ephemeral read of the host viewport taken at scan time.

/// A closed interval `[start, end]` on the scroll axis, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    /// Leading edge (inclusive).
    pub start: f32,
    /// Trailing edge (inclusive).
    pub end: f32,
}

impl Span {
    /// Create a new span. `end < start` denotes an empty span.
    #[inline]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Create a span from a leading edge and an extent.
    #[inline]
    pub const fn sized(start: f32, extent: f32) -> Self {
        Self {
            start,
            end: start + extent,
        }
    }

    /// Extent of the span. Zero for empty spans.
    #[inline]
    pub fn extent(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }

    /// Whether the span covers no distance.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Whether a point lies within the span (edges inclusive).
    #[inline]
    pub fn contains(&self, point: f32) -> bool {
        point >= self.start && point <= self.end
    }

    /// Whether two spans overlap, touching edges included.
    ///
    /// A unit resting exactly on the band boundary counts as near; the
    /// eviction decision must err toward keeping units mounted.
    #[inline]
    pub fn intersects(&self, other: &Span) -> bool {
        !self.is_empty() && !other.is_empty() && self.start <= other.end && other.start <= self.end
    }

    /// Grow the span by `margin` on both ends.
    #[inline]
    pub fn expanded(&self, margin: f32) -> Span {
        Span {
            start: self.start - margin,
            end: self.end + margin,
        }
    }

    /// Smallest span containing both.
    #[inline]
    pub fn union(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Ephemeral viewport read, taken fresh on every scan and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    /// Current scroll offset of the viewport's leading edge.
    pub scroll_offset: f32,
    /// Visible extent of the viewport on the scroll axis.
    pub viewport_extent: f32,
}

impl ViewportMetrics {
    /// Create new metrics.
    #[inline]
    pub const fn new(scroll_offset: f32, viewport_extent: f32) -> Self {
        Self {
            scroll_offset,
            viewport_extent,
        }
    }

    /// The band the user can currently see.
    #[inline]
    pub fn visible_band(&self) -> Span {
        Span::sized(self.scroll_offset, self.viewport_extent)
    }

    /// The visible band grown by `buffer` on both ends.
    #[inline]
    pub fn near_band(&self, buffer: f32) -> Span {
        self.visible_band().expanded(buffer)
    }
}
