#![forbid(unsafe_code)]

//! Eviction scanner.
//!
//! On a throttled cadence, inspects the main-axis spans of all mounted
//! units, decides which of them are still near the viewport, and, when
//! the near range outgrows the mounted-unit budget, asks for the window
//! to be recentered around it. When the near range is within budget the
//! scan is a read-only pass: no mutation, no remount thrash.
//!
//! The scanner never reads a clock. Hosts pass monotonic millisecond
//! timestamps with each scroll event, which keeps the core deterministic
//! under test and portable to hosts without `std::time`.

use mwall_core::VirtConfig;
use mwall_core::geometry::{Span, ViewportMetrics};

/// Outcome of a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDecision {
    /// Scan suppressed by the throttle; nothing was inspected.
    Throttled,
    /// Near range within budget (or nothing mounted): no mutation.
    Keep,
    /// Near range exceeded the budget; recenter around `midpoint`.
    Recenter {
        /// Midpoint of the near range, integer floor.
        midpoint: usize,
        /// Smallest mounted unit index intersecting the near band.
        first_near: usize,
        /// Largest mounted unit index intersecting the near band.
        last_near: usize,
    },
}

/// Throttled scroll-position scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvictionScanner {
    last_scan_ms: Option<u64>,
}

impl EvictionScanner {
    /// A scanner that will accept the first scan immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the throttle history (item list recomputed).
    pub fn reset(&mut self) {
        self.last_scan_ms = None;
    }

    /// Run one scan over the currently mounted units.
    ///
    /// `mounted` yields `(unit_index, span)` for every mounted unit the
    /// host has geometry for; units without geometry are simply absent
    /// and treated as not near. The scan always completes once admitted
    /// by the throttle; there is no cancellation path.
    pub fn scan<I>(
        &mut self,
        now_ms: u64,
        metrics: ViewportMetrics,
        mounted: I,
        config: &VirtConfig,
    ) -> ScanDecision
    where
        I: IntoIterator<Item = (usize, Span)>,
    {
        if let Some(last) = self.last_scan_ms
            && now_ms.saturating_sub(last) < config.scan_throttle_ms
        {
            return ScanDecision::Throttled;
        }
        self.last_scan_ms = Some(now_ms);

        let band = metrics.near_band(config.near_band_buffer);
        let mut near: Option<(usize, usize)> = None;
        for (index, span) in mounted {
            if band.intersects(&span) {
                near = Some(match near {
                    Some((first, last)) => (first.min(index), last.max(index)),
                    None => (index, index),
                });
            }
        }

        let Some((first_near, last_near)) = near else {
            return ScanDecision::Keep;
        };

        // `recenter_slack` is the explicit hysteresis margin: with the
        // default of zero the budget is exactly `max_active`.
        let near_count = last_near - first_near + 1;
        if near_count <= config.max_active + config.recenter_slack {
            return ScanDecision::Keep;
        }

        ScanDecision::Recenter {
            midpoint: (first_near + last_near) / 2,
            first_near,
            last_near,
        }
    }
}
