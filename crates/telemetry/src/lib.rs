//! Telemetry windowing for the dashboard graphs.
//!
//! A [`SmoothedWindow`] pulls one reading per metric from a
//! [`SampleSource`](kiosk_core::SampleSource) on every draw request,
//! smooths it, and keeps a time-bounded [`MetricGroup`]. The [`AxisMapper`]
//! turns that group plus a canvas size into an [`AxisSpec`] the renderer
//! can draw against.

pub mod axis;
pub mod ema;
pub mod group;
pub mod window;

pub use axis::{Axis, AxisMapper, AxisSpec, PlotRect, Tick};
pub use ema::ema;
pub use group::{MetricGroup, MetricSeries};
pub use window::{SmoothedWindow, WindowSettings};
