use kiosk_core::MetricKey;
use kiosk_telemetry::{AxisSpec, MetricGroup};
use kiosk_theme::{Color, Palette};
use serde::Serialize;

/// One metric's line in canvas pixels, oldest point first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub key:    MetricKey,
    pub color:  Color,
    pub points: Vec<(f64, f64)>,
}

/// Project every series of `group` through `axes`.
///
/// Points older than the axis start (rounding leaves up to half a second)
/// are pinned to the left edge; a degenerate spec yields lines without points.
pub fn polylines(group: &MetricGroup, axes: &AxisSpec, now: f64, palette: &Palette) -> Vec<Polyline> {
    group
        .iter_series()
        .map(|series| {
            let key = series.key();
            let points = group
                .points(key)
                .filter_map(|(ts, value)| axes.project((ts - now).max(axes.x.min), value))
                .collect();
            Polyline {
                key,
                color: palette.series(key),
                points,
            }
        })
        .collect()
}
