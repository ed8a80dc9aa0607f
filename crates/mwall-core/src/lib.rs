#![forbid(unsafe_code)]

//! Shared primitives for the mediawall virtualization engine.
//!
//! This crate holds the pieces every layer agrees on: main-axis
//! geometry, engine configuration, item identity, and logging shims.
//! It deliberately knows nothing about windows, loaders, or hosts.

pub mod config;
pub mod geometry;
pub mod item;
pub mod logging;

pub use config::VirtConfig;
pub use geometry::{Span, ViewportMetrics};
pub use item::{ItemKey, Keyed, MediaItem};
