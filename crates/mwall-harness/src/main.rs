#![forbid(unsafe_code)]

//! Scroll-session replay binary.
//!
//! Runs a linear top-to-bottom scroll over a synthetic media wall and
//! emits the session as JSONL on stdout: one line per step, then a
//! summary line. Useful for eyeballing window behavior and for diffing
//! sessions across changes.
//!
//! # Running
//!
//! ```sh
//! cargo run -p mwall-harness
//! ```

use std::io::{self, Write};

use mwall_core::VirtConfig;
use mwall_core::item::MediaItem;
use mwall_harness::{RecordingHost, ScrollScript, SimViewport};
use mwall_virt::{GroupPolicy, VirtEngine};

fn main() -> io::Result<()> {
    let total_units = 500;
    let viewport = SimViewport {
        unit_extent: 320.0,
        viewport_extent: 900.0,
        total_units,
    };
    let items: Vec<MediaItem> = (0..total_units as u64 * 4)
        .map(|i| MediaItem::new(i, format!("https://cdn.example/media/{i}.webp")))
        .collect();
    let mut engine = VirtEngine::new(items.len(), GroupPolicy::fixed(4), VirtConfig::default());
    let mut host = RecordingHost::with_items(items);

    let script = ScrollScript::ramp(viewport.content_extent(), 640.0, 250);
    let report = script.run(&mut engine, &viewport, &mut host);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for step in &report.steps {
        let line = serde_json::to_string(step).map_err(io::Error::other)?;
        writeln!(out, "{line}")?;
    }
    let summary = serde_json::json!({
        "total_mounts": report.total_mounts,
        "total_unmounts": report.total_unmounts,
        "peak_live": report.peak_live,
        "violations": report.violations,
        "final_window": [engine.window().start(), engine.window().end()],
    });
    writeln!(out, "{summary}")?;
    Ok(())
}
