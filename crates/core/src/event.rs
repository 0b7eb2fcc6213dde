use crate::state::{GroupKind, Slot, TelemetrySnapshot};

/// All messages (events) that can flow through the host event loop.
///
/// Sources:
/// - 1 Hz timer            → `Tick`
/// - Redraw timer / GUI    → `DrawRequested`
/// - Window allocation     → `Resized`
/// - Telemetry producers   → `Telemetry`
/// - Config watcher task   → `ConfigReloaded`
/// - Selector widgets      → `CycleToggled`, `DualRunningChanged`, `DemoSelected`
///
/// Every variant is handled on the loop thread; handlers never run
/// concurrently with each other.
#[derive(Debug, Clone)]
pub enum Message {
    // ── Timers ────────────────────────────────────────────────────────────────
    /// One-second tick; drives demo rotation.
    Tick,
    /// A graph wants repainting (pulls one sample into its window).
    DrawRequested(GroupKind),

    // ── Toolkit ───────────────────────────────────────────────────────────────
    /// Main window allocation changed (logical pixels).
    Resized { width: i32, height: i32 },

    // ── Telemetry ─────────────────────────────────────────────────────────────
    /// Partial reading pushed by a producer; merged into the sample hub.
    Telemetry(TelemetrySnapshot),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── User actions ──────────────────────────────────────────────────────────
    /// Automatic cycling switched on/off for a slot.
    CycleToggled { slot: Slot, enabled: bool },
    /// A slot entered/left exclusive dual-demo mode.
    DualRunningChanged { slot: Slot, running: bool },
    /// User picked a demo by hand.
    DemoSelected { slot: Slot, index: i32 },

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
