#![forbid(unsafe_code)]

//! Windowed virtualization for large ordered media collections.
//!
//! Renders hundreds to thousands of items through a small, contiguous,
//! always-valid window of mounted render units: the item list is
//! partitioned into units, units are forward-loaded as the user nears
//! the tail, and the window is recentered when scrolling leaves
//! previously loaded units behind. Total mounted units stay bounded no
//! matter how large the collection grows.
//!
//! The engine is headless: hosts feed it [`engine::HostEvent`]s and
//! implement [`mount::UnitHost`] to materialize units. See
//! `mwall-harness` for a complete simulated host.

pub mod engine;
pub mod grouping;
pub mod loader;
pub mod mount;
pub mod scanner;
pub mod window;

pub use engine::{HostEvent, ViewportProbe, VirtEngine};
pub use grouping::{GroupPolicy, UnitSpan, partition_units};
pub use loader::ForwardLoader;
pub use mount::{ReconcileFlags, UnitHost, reconcile};
pub use scanner::{EvictionScanner, ScanDecision};
pub use window::ActiveWindow;
#[cfg(feature = "state-persistence")]
pub use window::WindowPersistState;
