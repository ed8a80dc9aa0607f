#![forbid(unsafe_code)]

//! Mount controller.
//!
//! Translates window range changes into create/destroy operations on
//! the host. Only the delta is touched: units already mounted and still
//! in range keep their instances and their state. Destroyed units must
//! release everything scoped to them (visibility observers, pending
//! image work); that obligation sits with the [`UnitHost`] impl.

use crate::grouping::UnitSpan;
use bitflags::bitflags;
use std::ops::Range;

bitflags! {
    /// Summary of what a reconcile pass did.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ReconcileFlags: u8 {
        /// At least one unit was mounted.
        const MOUNTED = 1 << 0;
        /// At least one unit was unmounted.
        const UNMOUNTED = 1 << 1;
        /// The window end grew (forward load).
        const EXPANDED = 1 << 2;
        /// The window was recentered by the scanner.
        const RECENTERED = 1 << 3;
    }
}

/// The effectful side of the engine: creates and destroys renderable
/// unit instances. Implementations must treat `unmount_unit` as a full
/// teardown, not a visual hide.
pub trait UnitHost {
    /// Create the renderable instance for a unit entering the window.
    fn mount_unit(&mut self, unit: &UnitSpan);

    /// Destroy the instance for a unit leaving the window, releasing
    /// all resources scoped to it.
    fn unmount_unit(&mut self, index: usize);
}

/// Apply the difference between `prev` and `next` mounted ranges.
///
/// Unmounts run first so the host's peak resource use never exceeds the
/// larger of the two ranges plus the overlap. Both walks are in
/// ascending unit order; order within the mounted sequence is never
/// disturbed.
pub fn reconcile<H: UnitHost>(
    host: &mut H,
    units: &[UnitSpan],
    prev: Range<usize>,
    next: Range<usize>,
) -> ReconcileFlags {
    let mut flags = ReconcileFlags::empty();

    for index in prev.clone() {
        if !next.contains(&index) {
            host.unmount_unit(index);
            flags |= ReconcileFlags::UNMOUNTED;
        }
    }
    for index in next.clone() {
        if !prev.contains(&index)
            && let Some(unit) = units.get(index)
        {
            host.mount_unit(unit);
            flags |= ReconcileFlags::MOUNTED;
        }
    }

    flags
}
