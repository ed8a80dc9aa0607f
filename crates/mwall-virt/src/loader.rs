#![forbid(unsafe_code)]

//! Forward loader.
//!
//! Watches the sentinel placed after the last mounted unit and asks for
//! the window to grow when the sentinel comes within the configured
//! margin of the viewport. The trigger is edge-sensitive: one request
//! per not-visible-to-visible crossing, so a sentinel that stays in
//! view cannot drive runaway expansion.

use mwall_core::geometry::{Span, ViewportMetrics};

/// Edge-triggered watcher for the tail sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForwardLoader {
    /// Last observed visibility, for crossing detection.
    was_visible: bool,
    /// Set once the window reaches the collection tail; no further
    /// forward loads are possible until the item list changes.
    disabled: bool,
}

impl ForwardLoader {
    /// A loader that has not seen the sentinel yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether forward loading is permanently off for the current list.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Feed a visibility observation. Returns `true` exactly when the
    /// sentinel crossed from not-visible to visible and an expansion
    /// should be requested.
    pub fn on_visibility(&mut self, visible: bool) -> bool {
        if self.disabled {
            return false;
        }
        let crossed = visible && !self.was_visible;
        self.was_visible = visible;
        crossed
    }

    /// Disable the loader once the window end reached the total.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Re-arm after the item list was recomputed. The visibility latch
    /// resets too: the next sighting of the sentinel is a fresh crossing.
    pub fn reset(&mut self) {
        self.was_visible = false;
        self.disabled = false;
    }
}

/// Whether a sentinel at `sentinel` counts as visible for a viewport at
/// `metrics`, with the proximity margin applied around the viewport.
///
/// A missing sentinel (`None`) is never visible: forward loading simply
/// does not trigger until the host supplies its geometry.
#[must_use]
pub fn sentinel_visible(sentinel: Option<Span>, metrics: ViewportMetrics, margin: f32) -> bool {
    match sentinel {
        Some(span) => metrics.visible_band().expanded(margin).intersects(&span),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{ForwardLoader, sentinel_visible};
    use mwall_core::geometry::{Span, ViewportMetrics};

    #[test]
    fn fires_once_per_crossing() {
        let mut loader = ForwardLoader::new();
        assert!(loader.on_visibility(true));
        // Still visible: no re-trigger.
        assert!(!loader.on_visibility(true));
        assert!(!loader.on_visibility(true));
        // Leaves and returns: fresh crossing.
        assert!(!loader.on_visibility(false));
        assert!(loader.on_visibility(true));
    }

    #[test]
    fn disabled_loader_never_fires() {
        let mut loader = ForwardLoader::new();
        loader.disable();
        assert!(!loader.on_visibility(true));
        assert!(!loader.on_visibility(false));
        assert!(!loader.on_visibility(true));
    }

    #[test]
    fn reset_rearms_and_clears_latch() {
        let mut loader = ForwardLoader::new();
        assert!(loader.on_visibility(true));
        loader.disable();
        loader.reset();
        assert!(!loader.is_disabled());
        assert!(loader.on_visibility(true));
    }

    #[test]
    fn sentinel_within_margin_is_visible() {
        let metrics = ViewportMetrics::new(0.0, 900.0);
        // Sentinel 400 units past the viewport bottom, margin 500.
        let sentinel = Some(Span::sized(1300.0, 1.0));
        assert!(sentinel_visible(sentinel, metrics, 500.0));
    }

    #[test]
    fn sentinel_beyond_margin_is_not_visible() {
        let metrics = ViewportMetrics::new(0.0, 900.0);
        let sentinel = Some(Span::sized(1500.0, 1.0));
        assert!(!sentinel_visible(sentinel, metrics, 500.0));
    }

    #[test]
    fn missing_sentinel_is_silent_noop() {
        let metrics = ViewportMetrics::new(0.0, 900.0);
        assert!(!sentinel_visible(None, metrics, 500.0));
    }

    #[test]
    fn geometry_feeds_the_latch() {
        let mut loader = ForwardLoader::new();
        let metrics = ViewportMetrics::new(0.0, 900.0);
        let near = Some(Span::sized(1000.0, 1.0));
        let far = Some(Span::sized(5000.0, 1.0));

        assert!(loader.on_visibility(sentinel_visible(near, metrics, 500.0)));
        assert!(!loader.on_visibility(sentinel_visible(near, metrics, 500.0)));
        assert!(!loader.on_visibility(sentinel_visible(far, metrics, 500.0)));
        assert!(loader.on_visibility(sentinel_visible(near, metrics, 500.0)));
    }
}
