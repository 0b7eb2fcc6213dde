use kiosk_config::{RotationConfig, SlotConfig};
use kiosk_core::{Slot, WidgetRegistry};
use kiosk_rotation::DemoSelector;
use tracing::{debug, warn};

/// Layout names of the two demo choosers.
pub const SELECTOR_NAMES: [&str; 2] = ["demo_selection0", "demo_selection1"];

/// State of one demo chooser.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorState {
    pub demos:        Vec<String>,
    /// Active entry; negative = nothing selected.
    pub active:       i32,
    pub cycle:        bool,
    pub dual_running: bool,
}

impl SelectorState {
    fn from_config(cfg: &SlotConfig) -> Self {
        Self {
            demos:        cfg.demos.clone(),
            active:       0,
            cycle:        cfg.cycle,
            dual_running: false,
        }
    }

    /// Name of the active demo, if any.
    pub fn active_demo(&self) -> Option<&str> {
        usize::try_from(self.active)
            .ok()
            .and_then(|i| self.demos.get(i))
            .map(String::as_str)
    }
}

/// The two demo choosers of a headless kiosk.
///
/// Stands in for the toolkit's combo boxes: the host resolves slots through
/// [`WidgetRegistry`] and the rotation scheduler drives them through
/// [`DemoSelector`].
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSelectors {
    slots: [SelectorState; 2],
}

impl DemoSelectors {
    pub fn from_config(cfg: &RotationConfig) -> Self {
        Self {
            slots: [
                SelectorState::from_config(&cfg.slot0),
                SelectorState::from_config(&cfg.slot1),
            ],
        }
    }

    pub fn state(&self, slot: Slot) -> &SelectorState {
        &self.slots[slot.index()]
    }

    pub fn set_cycle(&mut self, slot: Slot, enabled: bool) {
        debug!("slot {} cycling {}", slot.index(), if enabled { "on" } else { "off" });
        self.slots[slot.index()].cycle = enabled;
    }

    pub fn set_dual_running(&mut self, slot: Slot, running: bool) {
        self.slots[slot.index()].dual_running = running;
    }

    /// Swap in new demo lists after a config reload. Toggles stay as the
    /// user left them; an active entry that no longer exists is cleared.
    pub fn replace_demos(&mut self, cfg: &RotationConfig) {
        for (state, slot_cfg) in self.slots.iter_mut().zip([&cfg.slot0, &cfg.slot1]) {
            state.demos = slot_cfg.demos.clone();
            if state.active_demo().is_none() {
                state.active = -1;
            }
        }
    }
}

impl DemoSelector for DemoSelectors {
    fn cycle_enabled(&self, slot: Slot) -> bool {
        self.state(slot).cycle
    }

    fn choice_count(&self, slot: Slot) -> usize {
        self.state(slot).demos.len()
    }

    fn dual_running(&self, slot: Slot) -> bool {
        self.state(slot).dual_running
    }

    fn set_active(&mut self, slot: Slot, index: i32) {
        let state = &mut self.slots[slot.index()];
        state.active = index;
        match state.active_demo() {
            Some(demo) => debug!("slot {} now running '{demo}'", slot.index()),
            None => warn!("slot {} set to unknown entry {index}", slot.index()),
        }
    }
}

impl WidgetRegistry for DemoSelectors {
    type Handle = Slot;

    fn get(&self, name: &str) -> Option<Slot> {
        SELECTOR_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Slot::BOTH[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_layout_names() {
        let s = DemoSelectors::from_config(&RotationConfig::default());
        assert_eq!(s.get("demo_selection0"), Some(Slot::First));
        assert_eq!(s.get("demo_selection1"), Some(Slot::Second));
        assert_eq!(s.get("demo_selection2"), None);
        assert!(s.require("graph_top").is_err());
    }

    #[test]
    fn starts_on_idle_entry() {
        let s = DemoSelectors::from_config(&RotationConfig::default());
        assert_eq!(s.state(Slot::First).active_demo(), Some("Stop"));
        assert_eq!(s.choice_count(Slot::Second), 5);
        assert!(!s.cycle_enabled(Slot::First));
    }

    #[test]
    fn reload_clears_vanished_selection() {
        let mut s = DemoSelectors::from_config(&RotationConfig::default());
        s.set_active(Slot::First, 4);
        s.set_cycle(Slot::First, true);

        let mut cfg = RotationConfig::default();
        cfg.slot0.demos.truncate(3);
        s.replace_demos(&cfg);

        assert_eq!(s.state(Slot::First).active, -1);
        assert!(s.cycle_enabled(Slot::First));
        assert_eq!(s.choice_count(Slot::First), 3);
    }
}
