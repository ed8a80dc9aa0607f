#![forbid(unsafe_code)]

//! Item identity.
//!
//! Items are opaque to the engine: only their position in the ordered
//! list and a stable key matter. The key survives list recomputation
//! so hosts can correlate mounted units across refreshes.

use serde::{Deserialize, Serialize};

/// Stable identifier for an item in the ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey(pub u64);

impl From<u64> for ItemKey {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Types that carry a stable item key.
pub trait Keyed {
    /// The stable key of this item.
    fn key(&self) -> ItemKey;
}

/// A renderable media record: stable key plus the resolved payload
/// reference the host needs to draw it. The engine never inspects
/// `src`; it flows through to the mounting host untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Stable identifier.
    pub key: ItemKey,
    /// Resolved media URL (or other payload reference).
    pub src: String,
}

impl MediaItem {
    /// Create a new media item.
    pub fn new(key: impl Into<ItemKey>, src: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            src: src.into(),
        }
    }
}

impl Keyed for MediaItem {
    fn key(&self) -> ItemKey {
        self.key
    }
}
