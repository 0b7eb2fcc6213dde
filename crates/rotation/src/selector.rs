use kiosk_core::Slot;

/// The external demo chooser the scheduler reads from and writes to.
///
/// Index 0 of every selector is its idle entry; indices handed to
/// [`set_active`](Self::set_active) are in `1..choice_count` whenever the
/// count allows it.
pub trait DemoSelector {
    /// User has automatic cycling switched on for `slot`.
    fn cycle_enabled(&self, slot: Slot) -> bool;

    /// Number of entries the selector offers (idle entry included).
    fn choice_count(&self, slot: Slot) -> usize;

    /// `slot` runs in exclusive dual-demo mode; the *other* slot must not be
    /// switched automatically while this holds.
    fn dual_running(&self, slot: Slot) -> bool;

    /// Make `index` the active entry of `slot`.
    fn set_active(&mut self, slot: Slot, index: i32);
}
