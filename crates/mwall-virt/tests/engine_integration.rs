#![forbid(unsafe_code)]

//! End-to-end scenarios for the virtualization engine.
//!
//! These tests drive the engine the way a real host would: sentinel
//! crossings from an observer, scroll events with timestamps, and a
//! mount controller that tracks live instances. Geometry is synthetic
//! (uniform unit extents) so every assertion is exact.

use mwall_core::VirtConfig;
use mwall_core::geometry::{Span, ViewportMetrics};
use mwall_virt::loader::sentinel_visible;
use mwall_virt::{
    GroupPolicy, HostEvent, ReconcileFlags, UnitHost, UnitSpan, ViewportProbe, VirtEngine,
};
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

/// Uniform stacked units; every unit has geometry.
struct StackedProbe {
    extent: f32,
}

impl ViewportProbe for StackedProbe {
    fn unit_span(&self, unit: usize) -> Option<Span> {
        Some(Span::sized(unit as f32 * self.extent, self.extent))
    }
}

/// Tracks live instances and fails fast on lifecycle violations.
#[derive(Default)]
struct LiveHost {
    mounted: Vec<usize>,
    mounts: usize,
    unmounts: usize,
    peak: usize,
}

impl UnitHost for LiveHost {
    fn mount_unit(&mut self, unit: &UnitSpan) {
        assert!(
            !self.mounted.contains(&unit.index),
            "double mount of unit {}",
            unit.index
        );
        self.mounted.push(unit.index);
        self.mounted.sort_unstable();
        self.mounts += 1;
        self.peak = self.peak.max(self.mounted.len());
    }

    fn unmount_unit(&mut self, index: usize) {
        let pos = self
            .mounted
            .iter()
            .position(|&i| i == index)
            .unwrap_or_else(|| panic!("unmount of unmounted unit {index}"));
        self.mounted.remove(pos);
        self.unmounts += 1;
    }
}

/// The mounted set must always equal the engine's window, contiguously.
fn assert_consistent(engine: &VirtEngine, host: &LiveHost) {
    let expected: Vec<usize> = engine.window().range().collect();
    assert_eq!(host.mounted, expected, "mounted set diverged from window");
}

/// One observer-style sentinel pass: the sentinel sits just after the
/// last mounted unit; report its visibility for the given viewport.
fn observe_sentinel(
    engine: &mut VirtEngine,
    host: &mut LiveHost,
    metrics: ViewportMetrics,
    unit_extent: f32,
) {
    let sentinel = engine
        .sentinel_enabled()
        .then(|| Span::sized(engine.window().end() as f32 * unit_extent, 1.0));
    let visible = sentinel_visible(sentinel, metrics, engine.config().forward_trigger_margin);
    engine.handle_sentinel(visible, host);
}

#[test]
fn full_walkthrough_load_keep_recenter() {
    init_tracing();
    // 37 units of 4 items each; initial 4, increment 4, max active 10.
    let mut engine = VirtEngine::new(37 * 4, GroupPolicy::fixed(4), VirtConfig::default());
    let mut host = LiveHost::default();

    engine.bootstrap(&mut host);
    assert_eq!(engine.window().range(), 0..4);
    assert_consistent(&engine, &host);

    // Three forward triggers.
    for _ in 0..3 {
        engine.handle_sentinel(true, &mut host);
        engine.handle_sentinel(false, &mut host);
    }
    assert_eq!(engine.window().range(), 0..16);
    assert_consistent(&engine, &host);

    // Only the listed units report geometry; the rest are off-band.
    struct NearProbe(std::ops::RangeInclusive<usize>);
    impl ViewportProbe for NearProbe {
        fn unit_span(&self, unit: usize) -> Option<Span> {
            self.0
                .contains(&unit)
                .then(|| Span::sized(unit as f32 * 1000.0, 1000.0))
        }
    }

    // Near band covers units 10..=15: six mounted near, within budget.
    let flags = engine.handle_scroll(
        ViewportMetrics::new(12_100.0, 900.0),
        0,
        &NearProbe(10..=15),
        &mut host,
    );
    assert_eq!(flags, ReconcileFlags::empty());
    assert_eq!(engine.window().range(), 0..16);

    // Grow further, then a scan with 14 near units (20..=33): recenter
    // around floor((20 + 33) / 2) = 26 to [21, 31).
    while engine.window().end() < 34 {
        engine.handle_sentinel(true, &mut host);
        engine.handle_sentinel(false, &mut host);
    }
    let flags = engine.handle_scroll(
        ViewportMetrics::new(20_000.0, 14_000.0),
        1_000,
        &NearProbe(20..=33),
        &mut host,
    );
    assert!(flags.contains(ReconcileFlags::RECENTERED));
    assert_eq!(engine.window().range(), 21..31);
    assert_consistent(&engine, &host);
}

#[test]
fn long_scroll_session_stays_bounded() {
    init_tracing();
    // 500 short units; scroll top to bottom with the sentinel observed
    // before every scan, the way a browser interleaves observer
    // callbacks and scroll events.
    let total_units = 500;
    let extent = 300.0;
    let config = VirtConfig::default();
    let mut engine = VirtEngine::new(total_units * 4, GroupPolicy::fixed(4), config);
    let mut host = LiveHost::default();
    engine.bootstrap(&mut host);

    let probe = StackedProbe { extent };
    let mut now_ms = 0u64;
    let mut offset = 0.0f32;
    while offset < total_units as f32 * extent {
        let metrics = ViewportMetrics::new(offset, 900.0);
        observe_sentinel(&mut engine, &mut host, metrics, extent);
        engine.handle_scroll(metrics, now_ms, &probe, &mut host);
        assert_consistent(&engine, &host);

        let window = engine.window();
        assert!(window.start() <= window.end());
        assert!(window.end() <= total_units);
        // Between recenters the window may carry up to one extra
        // increment of freshly loaded units, never more.
        assert!(window.len() <= config.max_active + config.load_increment);

        offset += 700.0;
        now_ms += 250; // always past the throttle
    }

    // Eviction actually ran, and the collection was never fully mounted.
    assert!(host.unmounts > 0);
    assert!(host.peak <= config.max_active + config.load_increment);
    assert!(host.peak < total_units);
}

#[test]
fn jumping_back_to_head_does_not_evict_far_window() {
    init_tracing();
    let total_units = 100;
    let extent = 300.0;
    let mut engine = VirtEngine::new(total_units * 4, GroupPolicy::fixed(4), VirtConfig::default());
    let mut host = LiveHost::default();
    engine.bootstrap(&mut host);

    // Scroll to the middle; recentering follows the viewport down.
    let probe = StackedProbe { extent };
    let mut now_ms = 0u64;
    let mut offset = 0.0f32;
    while offset < 50.0 * extent {
        let metrics = ViewportMetrics::new(offset, 900.0);
        observe_sentinel(&mut engine, &mut host, metrics, extent);
        engine.handle_scroll(metrics, now_ms, &probe, &mut host);
        offset += 700.0;
        now_ms += 250;
    }
    let mid_window = engine.window().range();
    assert!(mid_window.start > 0);

    // Jump back to the top. Mounted units are all far from the viewport
    // now, so nothing is near and the scan keeps the window: eviction
    // alone never creates mutations, only crowding does.
    let metrics = ViewportMetrics::new(0.0, 900.0);
    let flags = engine.handle_scroll(metrics, now_ms + 250, &probe, &mut host);
    assert_eq!(flags, ReconcileFlags::empty());
    assert_eq!(engine.window().range(), mid_window);
    assert_consistent(&engine, &host);
}

#[test]
fn double_scan_same_metrics_is_stable() {
    init_tracing();
    let mut engine = VirtEngine::new(200 * 4, GroupPolicy::fixed(4), VirtConfig::default());
    let mut host = LiveHost::default();
    engine.bootstrap(&mut host);
    while engine.window().end() < 40 {
        engine.handle_sentinel(true, &mut host);
        engine.handle_sentinel(false, &mut host);
    }

    let probe = StackedProbe { extent: 1000.0 };
    let metrics = ViewportMetrics::new(10_000.0, 20_000.0);
    let first = engine.handle_scroll(metrics, 0, &probe, &mut host);
    assert!(first.contains(ReconcileFlags::RECENTERED));
    // Far past the throttle, identical metrics: the recentered window
    // already satisfies the bound, so nothing moves.
    let second = engine.handle_scroll(metrics, 60_000, &probe, &mut host);
    assert_eq!(second, ReconcileFlags::empty());
    assert_consistent(&engine, &host);
}

#[test]
fn expansion_never_touches_existing_mounts() {
    init_tracing();
    let mut engine = VirtEngine::new(37 * 4, GroupPolicy::fixed(4), VirtConfig::default());
    let mut host = LiveHost::default();
    engine.bootstrap(&mut host);
    let mounts_after_bootstrap = host.mounts;

    engine.handle_sentinel(true, &mut host);
    // Expansion adds units without recreating anything already live.
    assert_eq!(host.mounts, mounts_after_bootstrap + 4);
    assert_eq!(host.unmounts, 0);
}

#[test]
fn group_all_renders_single_unit_and_no_sentinel() {
    let mut engine = VirtEngine::new(360, GroupPolicy::All, VirtConfig::default());
    let mut host = LiveHost::default();
    engine.bootstrap(&mut host);
    assert_eq!(host.mounted, vec![0]);
    assert_eq!(engine.units().len(), 1);
    assert!(!engine.sentinel_enabled());
}

#[test]
fn items_refresh_mid_session() {
    init_tracing();
    let mut engine = VirtEngine::new(37 * 4, GroupPolicy::fixed(4), VirtConfig::default());
    let mut host = LiveHost::default();
    engine.bootstrap(&mut host);
    for _ in 0..3 {
        engine.handle_sentinel(true, &mut host);
        engine.handle_sentinel(false, &mut host);
    }

    let probe = StackedProbe { extent: 1000.0 };

    // Collection grows: window survives, sentinel stays armed.
    engine.on_event(
        HostEvent::ItemsChanged { item_count: 600 },
        &probe,
        &mut host,
    );
    assert_eq!(engine.window().range(), 0..16);
    assert_consistent(&engine, &host);
    assert!(engine.sentinel_enabled());
    assert_eq!(engine.units().len(), 150);

    // Collection empties: everything unmounts.
    engine.on_event(HostEvent::ItemsChanged { item_count: 0 }, &probe, &mut host);
    assert!(host.mounted.is_empty());
    assert!(engine.window().is_empty());
}
