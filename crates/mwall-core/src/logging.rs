#![forbid(unsafe_code)]

//! Logging shims.
//!
//! Re-exports the `tracing` macros the workspace uses when the
//! `tracing` feature is enabled; otherwise provides no-op versions so
//! call sites compile unchanged. Hosts that want output install their
//! own subscriber.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

// `#[macro_export]` lands the macros at the crate root; re-export them
// here so call sites can import from `mwall_core::logging` regardless
// of which variant is compiled.
#[cfg(not(feature = "tracing"))]
pub use crate::{debug, debug_span, trace, warn};

/// Span stand-in when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the no-op span (does nothing).
    pub fn entered(self) -> NoopSpan {
        self
    }
}
