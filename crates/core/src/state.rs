use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every telemetry channel the dashboard tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    CpuUtil,
    MemUtil,
    GpuUtil,
    CpuThermal,
    MemThermal,
    GpuThermal,
}

impl MetricKey {
    pub const ALL: [MetricKey; 6] = [
        MetricKey::CpuUtil,
        MetricKey::MemUtil,
        MetricKey::GpuUtil,
        MetricKey::CpuThermal,
        MetricKey::MemThermal,
        MetricKey::GpuThermal,
    ];

    /// Stable wire name, e.g. `"cpu_util"`.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::CpuUtil    => "cpu_util",
            MetricKey::MemUtil    => "mem_util",
            MetricKey::GpuUtil    => "gpu_util",
            MetricKey::CpuThermal => "cpu_thermal",
            MetricKey::MemThermal => "mem_thermal",
            MetricKey::GpuThermal => "gpu_thermal",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown metric key '{s}'"))
    }
}

/// A set of metrics plotted on one graph against a shared time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Util,
    Thermal,
}

impl GroupKind {
    pub const ALL: [GroupKind; 2] = [GroupKind::Util, GroupKind::Thermal];

    pub fn index(self) -> usize {
        match self {
            GroupKind::Util    => 0,
            GroupKind::Thermal => 1,
        }
    }

    /// Metrics belonging to this group, in plotting order.
    pub fn metrics(self) -> [MetricKey; 3] {
        match self {
            GroupKind::Util => [MetricKey::CpuUtil, MetricKey::MemUtil, MetricKey::GpuUtil],
            GroupKind::Thermal => [
                MetricKey::CpuThermal,
                MetricKey::MemThermal,
                MetricKey::GpuThermal,
            ],
        }
    }

    /// Unit label shown on the value axis.
    pub fn unit(self) -> &'static str {
        match self {
            GroupKind::Util    => "%",
            GroupKind::Thermal => "°C",
        }
    }
}

/// Latest known raw reading per metric; `None` = not (yet) available.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetrySnapshot {
    values: [Option<f64>; 6],
}

impl TelemetrySnapshot {
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        self.values[key.index()]
    }

    pub fn set(&mut self, key: MetricKey, value: f64) {
        self.values[key.index()] = Some(value);
    }

    pub fn clear(&mut self, key: MetricKey) {
        self.values[key.index()] = None;
    }

    /// Builder-style [`set`](Self::set), handy in tests and fixtures.
    #[must_use]
    pub fn with(mut self, key: MetricKey, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Copy every reading present in `other` over this snapshot.
    pub fn merge(&mut self, other: &TelemetrySnapshot) {
        for key in MetricKey::ALL {
            if let Some(v) = other.get(key) {
                self.set(key, v);
            }
        }
    }
}

/// One of the two independently rotating demo selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::First, Slot::Second];

    pub fn index(self) -> usize {
        match self {
            Slot::First  => 0,
            Slot::Second => 1,
        }
    }

    pub fn other(self) -> Slot {
        match self {
            Slot::First  => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// Drawable area in logical pixels. May be zero or negative while the
/// toolkit is still allocating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width:  i32,
    pub height: i32,
}

impl CanvasSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// `true` when nothing can be drawn.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
