#![forbid(unsafe_code)]

//! Deterministic scroll-session harness for the virtualization engine.
//!
//! Runs a [`VirtEngine`](mwall_virt::VirtEngine) against a synthetic
//! viewport with no real UI attached, enabling scripted scroll replay,
//! lifecycle auditing, and JSONL session reports.

pub mod script;
pub mod sim;

pub use script::{ScriptStep, ScrollReport, ScrollScript, StepReport};
pub use sim::{HostOp, RecordingHost, SimViewport};
