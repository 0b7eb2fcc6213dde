use crate::selector::DemoSelector;
use kiosk_core::Slot;
use serde::Serialize;
use tracing::{debug, info};

/// Index a parked slot restarts from (first entry after the idle one).
const PARKED_INDEX: i32 = 1;

/// Per-slot rotation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RotationState {
    /// Slot was cycling during the last tick.
    pub active: bool,
    /// Ticks since the slot last switched.
    pub interval: u32,
    /// Selector index the slot rotates from. Negative = no selection.
    pub running_index: i32,
    /// Choices the selector offered on the last tick.
    pub total_choices: usize,
}

impl RotationState {
    const PARKED: Self = Self {
        active:        false,
        interval:      0,
        running_index: PARKED_INDEX,
        total_choices: 0,
    };
}

/// What the selector told the scheduler about one slot this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotInputs {
    pub cycle_enabled: bool,
    pub total_choices: usize,
    pub dual_running:  bool,
}

impl SlotInputs {
    fn read(selector: &impl DemoSelector, slot: Slot) -> Self {
        Self {
            cycle_enabled: selector.cycle_enabled(slot),
            total_choices: selector.choice_count(slot),
            dual_running:  selector.dual_running(slot),
        }
    }
}

/// Result of one tick: the index each slot should switch to, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub switches: [Option<i32>; 2],
}

impl TickOutcome {
    pub fn switch_for(&self, slot: Slot) -> Option<i32> {
        self.switches[slot.index()]
    }

    pub fn is_idle(&self) -> bool {
        self.switches.iter().all(Option::is_none)
    }
}

/// 1 Hz state machine that cycles both demo slots.
///
/// When slot 0 switches it pushes slot 1's counter to half a period, so the
/// two slots switch in different ticks. This is a timing heuristic, not a
/// lock: toggling cycling mid-period can still line the slots up.
#[derive(Debug, Clone)]
pub struct DemoRotationScheduler {
    period: u32,
    slots:  [RotationState; 2],
}

impl DemoRotationScheduler {
    /// Both slots start parked. `period` is in ticks and at least 1.
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            slots:  [RotationState::PARKED; 2],
        }
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Change the switch period; running counters carry over.
    pub fn set_period(&mut self, period: u32) {
        self.period = period.max(1);
    }

    pub fn state(&self, slot: Slot) -> &RotationState {
        &self.slots[slot.index()]
    }

    /// Keep the rotation in step with a manual choice on `slot`.
    pub fn sync_running_index(&mut self, slot: Slot, index: i32) {
        self.slots[slot.index()].running_index = index;
    }

    /// Read the selector, advance one tick and apply the resulting switches.
    pub fn tick(&mut self, selector: &mut impl DemoSelector) -> TickOutcome {
        let inputs = Slot::BOTH.map(|slot| SlotInputs::read(&*selector, slot));
        let outcome = self.advance(inputs);

        for slot in Slot::BOTH {
            if let Some(index) = outcome.switch_for(slot) {
                info!("Automatic demo switch: slot {} -> entry {index}", slot.index());
                selector.set_active(slot, index);
            }
        }
        outcome
    }

    /// Advance one tick on explicit inputs without touching a selector.
    pub fn advance(&mut self, inputs: [SlotInputs; 2]) -> TickOutcome {
        let period = self.period;
        let mut outcome = TickOutcome::default();

        // Park everything that is not cycling before either slot advances.
        for (state, input) in self.slots.iter_mut().zip(&inputs) {
            state.total_choices = input.total_choices;
            state.active = input.cycle_enabled && input.total_choices > 0;
            if !state.active {
                state.interval = 0;
                state.running_index = PARKED_INDEX;
            }
        }

        let [first, second] = &mut self.slots;
        let mut staggered = false;

        if first.active {
            first.interval += 1;
            if first.interval >= period {
                first.interval = 0;
                second.interval = period / 2;
                staggered = true;
                first.running_index = wrap(first.running_index.saturating_add(1), first.total_choices);

                if inputs[1].dual_running {
                    debug!("slot 0 switch to {} held back by dual mode", first.running_index);
                } else {
                    outcome.switches[0] = Some(first.running_index);
                }
            }
        }

        // Slot 1's counter was just set this tick; it resumes counting next tick.
        if second.active && !staggered {
            second.interval += 1;
            if second.interval >= period {
                second.interval = 0;
                // Follow slot 0 so the two never land on the same demo.
                let next = if first.running_index >= 0 {
                    first.running_index.saturating_add(1)
                } else {
                    second.running_index.saturating_add(1)
                };
                second.running_index = wrap(next, second.total_choices);

                if inputs[0].dual_running {
                    debug!("slot 1 switch to {} held back by dual mode", second.running_index);
                } else {
                    outcome.switches[1] = Some(second.running_index);
                }
            }
        }

        outcome
    }
}

/// Past the last entry, start over at the first non-idle one.
fn wrap(index: i32, total: usize) -> i32 {
    let total = i32::try_from(total).unwrap_or(i32::MAX);
    if index >= total {
        PARKED_INDEX
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: u32 = 10;

    fn cycling(total: usize) -> SlotInputs {
        SlotInputs {
            cycle_enabled: true,
            total_choices: total,
            dual_running:  false,
        }
    }

    fn off() -> SlotInputs {
        SlotInputs::default()
    }

    #[derive(Default)]
    struct FakeSelector {
        cycle:   [bool; 2],
        counts:  [usize; 2],
        dual:    [bool; 2],
        applied: Vec<(Slot, i32)>,
    }

    impl DemoSelector for FakeSelector {
        fn cycle_enabled(&self, slot: Slot) -> bool {
            self.cycle[slot.index()]
        }
        fn choice_count(&self, slot: Slot) -> usize {
            self.counts[slot.index()]
        }
        fn dual_running(&self, slot: Slot) -> bool {
            self.dual[slot.index()]
        }
        fn set_active(&mut self, slot: Slot, index: i32) {
            self.applied.push((slot, index));
        }
    }

    #[test]
    fn starts_parked() {
        let s = DemoRotationScheduler::new(PERIOD);
        for slot in Slot::BOTH {
            assert_eq!(s.state(slot).interval, 0);
            assert_eq!(s.state(slot).running_index, 1);
            assert!(!s.state(slot).active);
        }
    }

    #[test]
    fn slot0_switches_after_one_period_and_staggers_slot1() {
        let mut s = DemoRotationScheduler::new(PERIOD);

        for _ in 1..PERIOD {
            assert!(s.advance([cycling(3), off()]).is_idle());
        }
        let outcome = s.advance([cycling(3), off()]);

        assert_eq!(outcome.switch_for(Slot::First), Some(2));
        assert_eq!(s.state(Slot::First).running_index, 2);
        assert_eq!(s.state(Slot::First).interval, 0);
        assert_eq!(s.state(Slot::Second).interval, PERIOD / 2);
    }

    #[test]
    fn slot0_wraps_past_last_entry() {
        let mut s = DemoRotationScheduler::new(1);
        let indices: Vec<_> = (0..4)
            .map(|_| s.advance([cycling(3), off()]).switch_for(Slot::First))
            .collect();
        assert_eq!(indices, [Some(2), Some(1), Some(2), Some(1)]);
    }

    /// Run both slots until slot 0's first switch (tick `PERIOD`).
    fn after_first_switch(total0: usize, total1: usize) -> DemoRotationScheduler {
        let mut s = DemoRotationScheduler::new(PERIOD);
        for _ in 0..PERIOD {
            s.advance([cycling(total0), cycling(total1)]);
        }
        assert_eq!(s.state(Slot::First).running_index, 2);
        s
    }

    /// Tick until slot 1 switches; slot 0 must stay quiet meanwhile.
    fn next_slot1_switch(s: &mut DemoRotationScheduler, total0: usize, total1: usize) -> i32 {
        for _ in 0..PERIOD {
            let outcome = s.advance([cycling(total0), cycling(total1)]);
            assert_eq!(outcome.switch_for(Slot::First), None);
            if let Some(index) = outcome.switch_for(Slot::Second) {
                return index;
            }
        }
        panic!("slot 1 never switched");
    }

    #[test]
    fn slot1_follows_slot0() {
        let mut s = after_first_switch(3, 5);
        assert_eq!(s.state(Slot::Second).interval, PERIOD / 2);

        assert_eq!(next_slot1_switch(&mut s, 3, 5), 3);
        assert_eq!(s.state(Slot::Second).running_index, 3);
    }

    #[test]
    fn slot1_falls_back_to_own_index_without_slot0_selection() {
        let mut s = after_first_switch(6, 5);
        s.sync_running_index(Slot::First, -1);

        assert_eq!(next_slot1_switch(&mut s, 6, 5), 2);
    }

    #[test]
    fn slot1_wraps_to_first_entry() {
        let mut s = after_first_switch(6, 5);
        s.sync_running_index(Slot::First, 4);

        assert_eq!(next_slot1_switch(&mut s, 6, 5), 1);
    }

    #[test]
    fn slots_never_switch_in_the_same_tick() {
        let mut s = DemoRotationScheduler::new(PERIOD);
        for _ in 0..(PERIOD * 20) {
            let outcome = s.advance([cycling(6), cycling(6)]);
            assert!(
                outcome.switches.iter().filter(|x| x.is_some()).count() <= 1,
                "{outcome:?}"
            );
        }
    }

    #[test]
    fn short_periods_never_switch_both_slots_at_once() {
        for period in 1..=4 {
            let mut s = DemoRotationScheduler::new(period);
            let mut second_switched = false;
            for tick in 1..=(period * 12) {
                let outcome = s.advance([cycling(6), cycling(6)]);
                assert!(
                    outcome.switches.iter().filter(|x| x.is_some()).count() <= 1,
                    "period {period}, tick {tick}: {outcome:?}"
                );
                second_switched |= outcome.switch_for(Slot::Second).is_some();
            }
            // A one-tick period leaves no room for slot 1.
            assert_eq!(second_switched, period >= 2, "period {period}");
        }
    }

    #[test]
    fn huge_manual_index_wraps_instead_of_overflowing() {
        let mut s = DemoRotationScheduler::new(1);
        s.sync_running_index(Slot::First, i32::MAX);
        let outcome = s.advance([cycling(4), off()]);
        assert_eq!(outcome.switch_for(Slot::First), Some(1));

        let mut s = after_first_switch(6, 5);
        s.sync_running_index(Slot::First, i32::MAX);
        assert_eq!(next_slot1_switch(&mut s, 6, 5), 1);
    }

    #[test]
    fn disabled_or_empty_slot_parks() {
        let mut s = DemoRotationScheduler::new(PERIOD);
        for _ in 0..3 {
            s.advance([cycling(4), cycling(4)]);
        }
        assert_eq!(s.state(Slot::First).interval, 3);

        s.advance([off(), cycling(0)]);
        for slot in Slot::BOTH {
            assert_eq!(s.state(slot).interval, 0);
            assert_eq!(s.state(slot).running_index, 1);
            assert!(!s.state(slot).active);
        }
    }

    #[test]
    fn dual_mode_holds_back_the_other_slot() {
        let mut s = DemoRotationScheduler::new(1);
        let outcome = s.advance([
            cycling(4),
            SlotInputs {
                cycle_enabled: false,
                total_choices: 4,
                dual_running:  true,
            },
        ]);

        assert_eq!(outcome.switch_for(Slot::First), None);
        // The counter still advanced.
        assert_eq!(s.state(Slot::First).running_index, 2);
    }

    #[test]
    fn tick_reads_and_writes_selector() {
        let mut selector = FakeSelector {
            cycle:  [true, false],
            counts: [3, 3],
            ..Default::default()
        };
        let mut s = DemoRotationScheduler::new(2);

        s.tick(&mut selector);
        s.tick(&mut selector);
        s.tick(&mut selector);
        s.tick(&mut selector);

        assert_eq!(selector.applied, [(Slot::First, 2), (Slot::First, 1)]);
    }

    #[test]
    fn period_change_keeps_counters() {
        let mut s = DemoRotationScheduler::new(PERIOD);
        s.advance([cycling(4), off()]);
        s.set_period(0);
        assert_eq!(s.period(), 1);
        assert_eq!(s.state(Slot::First).interval, 1);
        assert!(s.advance([cycling(4), off()]).switch_for(Slot::First).is_some());
    }
}
