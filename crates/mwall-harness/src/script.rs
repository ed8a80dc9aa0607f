#![forbid(unsafe_code)]

//! Scripted scroll replay.
//!
//! A [`ScrollScript`] is a timestamped sequence of scroll positions,
//! JSON round-trippable so sessions can be captured once and replayed
//! deterministically. Running a script interleaves sentinel observation
//! and scroll delivery the way a live host would, and produces a
//! [`ScrollReport`] of per-step engine state.

use crate::sim::{RecordingHost, SimViewport};
use mwall_virt::{HostEvent, ReconcileFlags, VirtEngine};
use serde::{Deserialize, Serialize};

/// One scripted scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Monotonic timestamp of the event, in milliseconds.
    pub at_ms: u64,
    /// Viewport leading-edge offset to scroll to.
    pub scroll_to: f32,
}

/// A replayable scroll session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollScript {
    /// Steps in timestamp order.
    pub steps: Vec<ScriptStep>,
}

impl ScrollScript {
    /// Linear ramp from offset zero to `to`, advancing `step_px` every
    /// `step_ms` milliseconds.
    #[must_use]
    pub fn ramp(to: f32, step_px: f32, step_ms: u64) -> Self {
        let mut steps = Vec::new();
        let mut offset = 0.0f32;
        let mut at_ms = 0u64;
        while offset < to {
            steps.push(ScriptStep {
                at_ms,
                scroll_to: offset,
            });
            offset += step_px.max(1.0);
            at_ms += step_ms;
        }
        steps.push(ScriptStep {
            at_ms,
            scroll_to: to,
        });
        Self { steps }
    }

    /// Replay the script against `engine`, recording one
    /// [`StepReport`] per step.
    pub fn run(
        &self,
        engine: &mut VirtEngine,
        viewport: &SimViewport,
        host: &mut RecordingHost,
    ) -> ScrollReport {
        engine.bootstrap(host);
        let mut steps = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let visible = viewport.sentinel_visible_at(engine, step.scroll_to);
            let sentinel_flags = engine.on_event(
                HostEvent::SentinelCrossed { visible },
                viewport,
                host,
            );
            let scroll_flags = engine.on_event(
                HostEvent::Scrolled {
                    metrics: viewport.metrics_at(step.scroll_to),
                    at_ms: step.at_ms,
                },
                viewport,
                host,
            );
            steps.push(StepReport {
                at_ms: step.at_ms,
                scroll_to: step.scroll_to,
                window_start: engine.window().start(),
                window_end: engine.window().end(),
                live_units: host.live().len(),
                flags: (sentinel_flags | scroll_flags).bits(),
            });
        }
        ScrollReport {
            steps,
            total_mounts: host.mount_count(),
            total_unmounts: host.unmount_count(),
            peak_live: host.peak_live(),
            violations: host.violations(),
        }
    }
}

/// Engine state observed after one script step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Timestamp of the step.
    pub at_ms: u64,
    /// Scroll offset delivered.
    #[serde(with = "f32_bits")]
    pub scroll_to: f32,
    /// Window start after the step.
    pub window_start: usize,
    /// Window end after the step.
    pub window_end: usize,
    /// Live unit instances after the step.
    pub live_units: usize,
    /// [`ReconcileFlags`] bits produced by the step.
    pub flags: u8,
}

impl StepReport {
    /// Decoded reconcile flags.
    #[must_use]
    pub fn reconcile_flags(&self) -> ReconcileFlags {
        ReconcileFlags::from_bits_truncate(self.flags)
    }
}

/// Whole-session summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollReport {
    /// Per-step observations, in order.
    pub steps: Vec<StepReport>,
    /// Mount calls over the whole session.
    pub total_mounts: usize,
    /// Unmount calls over the whole session.
    pub total_unmounts: usize,
    /// Largest live set at any point.
    pub peak_live: usize,
    /// Lifecycle violations the host counted. Zero in a healthy run.
    pub violations: usize,
}

/// Bit-exact f32 serialization so replayed reports compare exactly.
mod f32_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(value.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        u32::deserialize(deserializer).map(f32::from_bits)
    }
}
