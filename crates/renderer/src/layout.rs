//! Even split of the window width between the two graph areas.

/// A fixed-width panel beside the graphs (the telemetry read-outs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidePanel {
    pub width:        i32,
    pub margin_start: i32,
    pub margin_end:   i32,
}

impl SidePanel {
    fn footprint(&self) -> i32 {
        self.width + self.margin_start + self.margin_end
    }
}

/// Width each graph area gets once both side panels are placed.
///
/// `None` while the window has no width yet or the panels already overflow
/// it; callers leave the current sizes alone in that case.
pub fn graph_width(total_width: i32, panels: &[SidePanel; 2]) -> Option<i32> {
    if total_width <= 0 {
        return None;
    }
    let remaining = total_width - panels.iter().map(SidePanel::footprint).sum::<i32>();
    let half = remaining.div_euclid(2);
    (half >= 0).then_some(half)
}

/// Only request a new size when it differs, or size-allocate loops forever.
pub fn needs_resize(current: [i32; 2], half: i32) -> bool {
    current.iter().any(|&w| w != half)
}
