#![forbid(unsafe_code)]

//! Synthetic viewport and recording host.
//!
//! [`SimViewport`] stands in for a real scroll container: units are
//! stacked from offset zero with a uniform extent, so geometry queries
//! and sentinel visibility are exact functions of the scroll offset.
//! [`RecordingHost`] stands in for the presentation layer: it logs every
//! mount and unmount and audits the lifecycle instead of rendering.

use mwall_core::geometry::{Span, ViewportMetrics};
use mwall_core::item::{ItemKey, Keyed, MediaItem};
use mwall_virt::loader::sentinel_visible;
use mwall_virt::{UnitHost, UnitSpan, ViewportProbe, VirtEngine};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Uniform-extent scroll surface over a fixed unit count.
#[derive(Debug, Clone, Copy)]
pub struct SimViewport {
    /// Main-axis extent of every unit.
    pub unit_extent: f32,
    /// Visible extent of the viewport.
    pub viewport_extent: f32,
    /// Number of units with geometry; queries past this return `None`.
    pub total_units: usize,
}

impl SimViewport {
    /// Total scrollable extent of the surface.
    #[must_use]
    pub fn content_extent(&self) -> f32 {
        self.total_units as f32 * self.unit_extent
    }

    /// Viewport read with the leading edge at `offset`.
    #[must_use]
    pub fn metrics_at(&self, offset: f32) -> ViewportMetrics {
        ViewportMetrics::new(offset, self.viewport_extent)
    }

    /// Whether the engine's tail sentinel would be inside the trigger
    /// margin at `offset`. The sentinel sits just after the last
    /// mounted unit, as a zero-extent marker element would.
    #[must_use]
    pub fn sentinel_visible_at(&self, engine: &VirtEngine, offset: f32) -> bool {
        let sentinel = engine
            .sentinel_enabled()
            .then(|| Span::sized(engine.window().end() as f32 * self.unit_extent, 0.0));
        sentinel_visible(
            sentinel,
            self.metrics_at(offset),
            engine.config().forward_trigger_margin,
        )
    }
}

impl ViewportProbe for SimViewport {
    fn unit_span(&self, unit: usize) -> Option<Span> {
        (unit < self.total_units)
            .then(|| Span::sized(unit as f32 * self.unit_extent, self.unit_extent))
    }
}

/// One recorded host mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum HostOp {
    /// A unit instance was created.
    Mount {
        /// Unit index.
        unit: usize,
        /// First item of the unit.
        first_item: usize,
        /// One past the last item of the unit.
        last_item: usize,
        /// Stable keys of the items materialized, resolved from the
        /// host's item list. Empty when the host carries no payloads.
        keys: Vec<ItemKey>,
    },
    /// A unit instance was destroyed.
    Unmount {
        /// Unit index.
        unit: usize,
    },
}

/// Mount controller that records instead of rendering.
///
/// Owns the media payloads: a mount resolves the unit's item range to
/// the stable keys of the records it materializes, the way a real
/// presentation layer resolves payload refs when creating instances.
/// Lifecycle violations (mounting a live unit, unmounting a dead one)
/// are counted rather than panicking, so a report can surface them.
#[derive(Debug, Default)]
pub struct RecordingHost {
    items: Vec<MediaItem>,
    live: FxHashSet<usize>,
    ops: Vec<HostOp>,
    peak_live: usize,
    violations: usize,
}

impl RecordingHost {
    /// Fresh host with nothing mounted and no payloads.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh host rendering the given media records.
    #[must_use]
    pub fn with_items(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// The media records this host renders, in collection order.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Indices currently live, unordered.
    #[must_use]
    pub fn live(&self) -> &FxHashSet<usize> {
        &self.live
    }

    /// Every mutation in call order.
    #[must_use]
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Largest live set seen at any point, including mid-reconcile.
    #[must_use]
    pub fn peak_live(&self) -> usize {
        self.peak_live
    }

    /// Count of double mounts and stray unmounts.
    #[must_use]
    pub fn violations(&self) -> usize {
        self.violations
    }

    /// Total mounts recorded.
    #[must_use]
    pub fn mount_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, HostOp::Mount { .. }))
            .count()
    }

    /// Total unmounts recorded.
    #[must_use]
    pub fn unmount_count(&self) -> usize {
        self.ops.len() - self.mount_count()
    }
}

impl UnitHost for RecordingHost {
    fn mount_unit(&mut self, unit: &UnitSpan) {
        if !self.live.insert(unit.index) {
            self.violations += 1;
        }
        self.peak_live = self.peak_live.max(self.live.len());
        let keys = self
            .items
            .get(unit.items.clone())
            .map(|items| items.iter().map(Keyed::key).collect())
            .unwrap_or_default();
        self.ops.push(HostOp::Mount {
            unit: unit.index,
            first_item: unit.items.start,
            last_item: unit.items.end,
            keys,
        });
    }

    fn unmount_unit(&mut self, index: usize) {
        if !self.live.remove(&index) {
            self.violations += 1;
        }
        self.ops.push(HostOp::Unmount { unit: index });
    }
}
