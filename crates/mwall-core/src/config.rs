#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! All knobs the virtualization engine recognizes, with the defaults
//! the rest of the workspace is tuned against. Values are normalized
//! by clamping, never rejected: the engine has no error channel and a
//! degenerate configuration must still produce a working (if odd)
//! window.

use serde::{Deserialize, Serialize};

/// Configuration for the windowed virtualization engine.
///
/// Distances (`forward_trigger_margin`, `near_band_buffer`) are in the
/// host's logical units on the scroll axis; counts are in render units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtConfig {
    /// Units mounted at first render.
    pub initial_load: usize,
    /// Units added per forward-load trigger.
    pub load_increment: usize,
    /// Hard cap on mounted units once the scanner has stabilized.
    pub max_active: usize,
    /// Proximity margin for the tail sentinel: the loader fires when
    /// the sentinel comes within this distance of the viewport.
    pub forward_trigger_margin: f32,
    /// Distance beyond the viewport that still counts as "near" when
    /// the scanner decides which mounted units to keep.
    pub near_band_buffer: f32,
    /// Minimum interval between eviction scans, in milliseconds.
    pub scan_throttle_ms: u64,
    /// Hysteresis for recentering: the scanner only recenters when the
    /// near count exceeds `max_active + recenter_slack`. Zero keeps the
    /// mounted bound strict; positive values damp remount thrash at the
    /// boundary at the cost of up to `recenter_slack` extra units.
    pub recenter_slack: usize,
}

impl Default for VirtConfig {
    fn default() -> Self {
        Self {
            initial_load: 4,
            load_increment: 4,
            max_active: 10,
            forward_trigger_margin: 500.0,
            near_band_buffer: 2000.0,
            scan_throttle_ms: 200,
            recenter_slack: 0,
        }
    }
}

impl VirtConfig {
    /// Returns a copy with degenerate values clamped into the ranges
    /// the engine can work with.
    ///
    /// - `initial_load` and `load_increment` of zero become 1 (a window
    ///   that can never grow is useless);
    /// - `max_active` is raised to at least `2` so recentering always
    ///   has a non-zero half-width;
    /// - negative distances become `0.0`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            initial_load: self.initial_load.max(1),
            load_increment: self.load_increment.max(1),
            max_active: self.max_active.max(2),
            forward_trigger_margin: self.forward_trigger_margin.max(0.0),
            near_band_buffer: self.near_band_buffer.max(0.0),
            scan_throttle_ms: self.scan_throttle_ms,
            recenter_slack: self.recenter_slack,
        }
    }

    /// Half-width used when the scanner recenters the window.
    /// Integer floor, matching the recenter midpoint policy.
    #[inline]
    #[must_use]
    pub fn half_width(&self) -> usize {
        self.max_active / 2
    }
}
