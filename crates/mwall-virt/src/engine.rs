#![forbid(unsafe_code)]

//! The virtualization engine.
//!
//! [`VirtEngine`] owns the window state and the two trigger paths that
//! mutate it (forward loader, eviction scanner) and drives the host's
//! mount controller with the resulting deltas. The engine itself is
//! pure state transitions; all effects flow through the [`UnitHost`]
//! passed into each call.
//!
//! # Concurrency model
//!
//! Single-threaded cooperative scheduling. Every mutating entry point
//! takes `&mut self`, so a reconciliation is atomic relative to any
//! other engine call: re-entrant synchronous calls are impossible by
//! construction. Trigger storms are coalesced where they arise instead:
//! the loader's visibility latch collapses repeated sentinel sightings
//! into one expansion per crossing, and the scanner's throttle collapses
//! scroll bursts into one scan per cadence interval.

use crate::grouping::{GroupPolicy, UnitSpan, partition_units};
use crate::loader::ForwardLoader;
use crate::mount::{ReconcileFlags, UnitHost, reconcile};
use crate::scanner::{EvictionScanner, ScanDecision};
use crate::window::ActiveWindow;
use mwall_core::VirtConfig;
use mwall_core::geometry::{Span, ViewportMetrics};
use mwall_core::logging::{debug, debug_span, trace};
use std::ops::Range;

/// A trigger from the host environment, as a tagged variant so any UI
/// toolkit's viewport primitives (intersection observers, scroll
/// listeners, table-view callbacks) can feed the same engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The tail sentinel's visibility changed.
    SentinelCrossed {
        /// Whether the sentinel is now within the trigger margin.
        visible: bool,
    },
    /// The viewport scrolled. `at_ms` is a host-supplied monotonic
    /// timestamp used only for scan throttling.
    Scrolled {
        /// Fresh viewport read.
        metrics: ViewportMetrics,
        /// Monotonic milliseconds.
        at_ms: u64,
    },
    /// The item list was replaced; render units must be recomputed.
    ItemsChanged {
        /// New item count.
        item_count: usize,
    },
}

/// Read access to host viewport geometry, queried at scan time.
///
/// `unit_span` returns the main-axis bounding span of a mounted unit's
/// root element, or `None` when the host has no geometry for it yet
/// (not laid out, detached). Units without geometry are treated as not
/// near.
pub trait ViewportProbe {
    /// Main-axis span of a mounted unit, if the host can measure it.
    fn unit_span(&self, unit: usize) -> Option<Span>;
}

/// Windowed virtualization over a grouped, ordered item list.
#[derive(Debug, Clone)]
pub struct VirtEngine {
    config: VirtConfig,
    policy: GroupPolicy,
    units: Vec<UnitSpan>,
    window: ActiveWindow,
    /// What the host currently has mounted; trails `window` until the
    /// next reconcile.
    mounted: Range<usize>,
    loader: ForwardLoader,
    scanner: EvictionScanner,
}

impl VirtEngine {
    /// Create an engine over `item_count` items grouped by `policy`.
    ///
    /// The window starts at `[0, min(initial_load, total_units))`; call
    /// [`bootstrap`](Self::bootstrap) to mount it.
    #[must_use]
    pub fn new(item_count: usize, policy: GroupPolicy, config: VirtConfig) -> Self {
        let config = config.normalized();
        let units = partition_units(item_count, policy);
        let window = ActiveWindow::initial(config.initial_load, units.len());
        let mut loader = ForwardLoader::new();
        if window.at_tail() {
            loader.disable();
        }
        Self {
            config,
            policy,
            units,
            window,
            mounted: 0..0,
            loader,
            scanner: EvictionScanner::new(),
        }
    }

    /// Current window over unit indices.
    #[must_use]
    pub fn window(&self) -> &ActiveWindow {
        &self.window
    }

    /// Normalized configuration in effect.
    #[must_use]
    pub fn config(&self) -> &VirtConfig {
        &self.config
    }

    /// All render units, in order.
    #[must_use]
    pub fn units(&self) -> &[UnitSpan] {
        &self.units
    }

    /// The units the host should currently have mounted, in stable
    /// order. This is what the presentation layer renders.
    #[must_use]
    pub fn mounted_units(&self) -> &[UnitSpan] {
        &self.units[self.window.range()]
    }

    /// Whether the host should keep a sentinel placed after the last
    /// mounted unit. `false` once the window covers the collection tail.
    #[must_use]
    pub fn sentinel_enabled(&self) -> bool {
        !self.loader.is_disabled()
    }

    /// Mount the initial window. Idempotent: mounts only what the host
    /// does not already have.
    pub fn bootstrap<H: UnitHost>(&mut self, host: &mut H) -> ReconcileFlags {
        self.sync_mounts(host, ReconcileFlags::empty())
    }

    /// Dispatch a host event.
    pub fn on_event<P: ViewportProbe, H: UnitHost>(
        &mut self,
        event: HostEvent,
        probe: &P,
        host: &mut H,
    ) -> ReconcileFlags {
        match event {
            HostEvent::SentinelCrossed { visible } => self.handle_sentinel(visible, host),
            HostEvent::Scrolled { metrics, at_ms } => {
                self.handle_scroll(metrics, at_ms, probe, host)
            }
            HostEvent::ItemsChanged { item_count } => self.set_items(item_count, host),
        }
    }

    /// Feed a sentinel visibility observation. Expands the window by
    /// `load_increment` on a not-visible-to-visible crossing; repeated
    /// sightings while visible are absorbed by the loader's latch.
    pub fn handle_sentinel<H: UnitHost>(&mut self, visible: bool, host: &mut H) -> ReconcileFlags {
        if !self.loader.on_visibility(visible) {
            return ReconcileFlags::empty();
        }
        let changed = self.window.expand_forward(self.config.load_increment);
        if self.window.at_tail() {
            self.loader.disable();
        }
        if !changed {
            return ReconcileFlags::empty();
        }
        debug!(
            end = self.window.end(),
            total = self.window.total_units(),
            "forward load"
        );
        self.sync_mounts(host, ReconcileFlags::EXPANDED)
    }

    /// Feed a scroll event. Runs the eviction scanner (subject to its
    /// throttle) and recenters the window when the near range exceeds
    /// the mounted-unit budget.
    pub fn handle_scroll<P: ViewportProbe, H: UnitHost>(
        &mut self,
        metrics: ViewportMetrics,
        at_ms: u64,
        probe: &P,
        host: &mut H,
    ) -> ReconcileFlags {
        let mounted = self
            .mounted
            .clone()
            .filter_map(|index| probe.unit_span(index).map(|span| (index, span)));
        match self.scanner.scan(at_ms, metrics, mounted, &self.config) {
            ScanDecision::Throttled | ScanDecision::Keep => {
                trace!(at_ms, "scan kept window");
                ReconcileFlags::empty()
            }
            ScanDecision::Recenter {
                midpoint,
                first_near,
                last_near,
            } => {
                if !self.window.recenter(midpoint, self.config.half_width()) {
                    return ReconcileFlags::empty();
                }
                debug!(
                    midpoint,
                    first_near,
                    last_near,
                    start = self.window.start(),
                    end = self.window.end(),
                    "recenter"
                );
                // Recentering can pull the end back from the tail, which
                // makes forward loading meaningful again.
                if self.window.at_tail() {
                    self.loader.disable();
                } else {
                    self.loader.reset();
                }
                self.sync_mounts(host, ReconcileFlags::RECENTERED)
            }
        }
    }

    /// Replace the item list. Units are recomputed wholesale, the
    /// window is re-clamped, and the loader and scanner start fresh.
    pub fn set_items<H: UnitHost>(&mut self, item_count: usize, host: &mut H) -> ReconcileFlags {
        self.units = partition_units(item_count, self.policy);
        self.window.set_total(self.units.len());
        if self.window.at_tail() {
            self.loader.disable();
        } else {
            self.loader.reset();
        }
        self.scanner.reset();
        debug!(total = self.units.len(), "items changed");
        self.sync_mounts(host, ReconcileFlags::empty())
    }

    fn sync_mounts<H: UnitHost>(&mut self, host: &mut H, extra: ReconcileFlags) -> ReconcileFlags {
        let next = self.window.range();
        let _span = debug_span!("reconcile", start = next.start, end = next.end).entered();
        let flags = reconcile(host, &self.units, self.mounted.clone(), next.clone()) | extra;
        self.mounted = next;
        flags
    }
}

#[cfg(feature = "state-persistence")]
impl VirtEngine {
    /// Snapshot the window for persistence.
    #[must_use]
    pub fn save_state(&self) -> crate::window::WindowPersistState {
        self.window.save_state()
    }

    /// Restore a persisted window and reconcile the host to it.
    pub fn restore_state<H: UnitHost>(
        &mut self,
        state: crate::window::WindowPersistState,
        host: &mut H,
    ) -> ReconcileFlags {
        self.window.restore_state(state);
        if self.window.at_tail() {
            self.loader.disable();
        } else {
            self.loader.reset();
        }
        self.sync_mounts(host, ReconcileFlags::empty())
    }
}
