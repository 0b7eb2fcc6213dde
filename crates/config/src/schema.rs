use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `kiosk.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// Sampling window and smoothing.
    pub telemetry: TelemetryConfig,
    /// Graph axes and redraw cadence.
    pub graphs: GraphConfig,
    /// Automatic demo cycling.
    pub rotation: RotationConfig,
    /// External profiling helper; absent = none launched.
    pub profiler: Option<ProfilerConfig>,
    /// Series colours.
    pub theme: ThemeConfig,
}

/// Sliding-window parameters shared by both metric groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Retained time span in seconds.
    pub window_secs: u32,
    /// Hard cap on entries per series.
    pub capacity: usize,
    /// Smoothing factor in `(0, 1]`; 1.0 disables smoothing.
    pub alpha: f64,
    /// System poller interval (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            window_secs:      60,
            capacity:         1000,
            alpha:            0.3,
            poll_interval_ms: 1000,
        }
    }
}

/// Axis layout inputs handed to the axis mapper on every draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// How often each graph requests a repaint (milliseconds).
    pub draw_interval_ms: u64,
    /// Intervals along the time axis.
    pub x_ticks: u32,
    /// Intervals along the value axis.
    pub y_ticks: u32,
    /// Label size in points at the reference resolution.
    pub label_font_size: f64,
    /// Fixed value domain of the utilization graph.
    pub util_range: [f64; 2],
    /// Fixed value domain of the thermal graph.
    pub thermal_range: [f64; 2],
    /// Window size at which fonts and margins are drawn 1:1.
    pub reference_resolution: [u32; 2],
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            draw_interval_ms:     250,
            x_ticks:              4,
            y_ticks:              2,
            label_font_size:      14.0,
            util_range:           [0.0, 100.0],
            thermal_range:        [35.0, 95.0],
            reference_resolution: [1920, 1080],
        }
    }
}

/// Demo rotation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Ticks (seconds) between automatic switches of one slot.
    pub switch_period_secs: u32,
    pub slot0: SlotConfig,
    pub slot1: SlotConfig,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            switch_period_secs: 30,
            slot0: SlotConfig::default(),
            slot1: SlotConfig::default(),
        }
    }
}

/// Choices offered by one demo selector.
///
/// Index 0 is the selector's idle entry; rotation never lands on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    pub demos: Vec<String>,
    /// Start with automatic cycling enabled.
    pub cycle: bool,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            demos: vec![
                "Stop".to_string(),
                "Camera".to_string(),
                "Pose detection".to_string(),
                "Segmentation".to_string(),
                "Object detection".to_string(),
            ],
            cycle: false,
        }
    }
}

/// Command line of the profiling helper process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// CPU series colour (hex, e.g. `"#fe00a2"`).
    pub cpu: String,
    /// Memory series colour.
    pub mem: String,
    /// GPU series colour.
    pub gpu: String,
    /// Graph background.
    pub background: String,
    /// Graph border and axis colour.
    pub border: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cpu:        "#fe00a2".to_string(), // pink
            mem:        "#00a5e5".to_string(), // blue
            gpu:        "#f8b600".to_string(), // yellow
            background: "#171717cc".to_string(),
            border:     "#ffffff".to_string(),
        }
    }
}
