use crate::group::MetricGroup;
use kiosk_config::GraphConfig;
use kiosk_core::CanvasSize;
use serde::Serialize;

/// One labelled tick: data value and its pixel coordinate along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    pub value:    f64,
    pub position: f64,
}

/// Numeric domain of one axis plus where its ticks go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub min:   f64,
    pub max:   f64,
    pub ticks: Vec<Tick>,
    pub label: &'static str,
}

impl Axis {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Inner plotting rectangle (canvas minus label margins), pixel y grows down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlotRect {
    pub x:      f64,
    pub y:      f64,
    pub width:  f64,
    pub height: f64,
}

impl PlotRect {
    /// Also `true` for NaN extents.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Renderer contract for one graph frame. Rebuilt on every draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    /// Seconds relative to now; `max` is always 0.
    pub x: Axis,
    /// Fixed value domain of the chart kind.
    pub y: Axis,
    pub plot: PlotRect,
    /// Label size after resolution scaling.
    pub font_size: f64,
}

impl AxisSpec {
    /// `true` when the canvas left no room to draw; ticks are empty then.
    pub fn is_degenerate(&self) -> bool {
        self.plot.is_empty()
    }

    /// Map a sample (`age` = timestamp − now, ≤ 0) to canvas pixels.
    ///
    /// Values outside the y domain are pinned to its edges. Returns `None`
    /// for a degenerate spec or an empty time domain.
    pub fn project(&self, age: f64, value: f64) -> Option<(f64, f64)> {
        let (x_span, y_span) = (self.x.span(), self.y.span());
        if self.is_degenerate() || x_span <= 0.0 || y_span <= 0.0 {
            return None;
        }

        let fx = (age - self.x.min) / x_span;
        let fy = (value.clamp(self.y.min, self.y.max) - self.y.min) / y_span;

        Some((
            self.plot.x + fx * self.plot.width,
            self.plot.y + self.plot.height - fy * self.plot.height,
        ))
    }
}

/// Converts a window's time range and a chart's value range into an
/// [`AxisSpec`] for a given canvas.
#[derive(Debug, Clone)]
pub struct AxisMapper {
    window_secs: f64,
    label_font_size: f64,
    reference: CanvasSize,
    /// Font/margin multiplier derived from the main window size.
    scale: f64,
}

impl AxisMapper {
    pub fn new(window_secs: f64, label_font_size: f64, reference: CanvasSize) -> Self {
        Self {
            window_secs,
            label_font_size,
            reference,
            scale: 1.0,
        }
    }

    pub fn from_config(window_secs: u32, cfg: &GraphConfig) -> Self {
        let [w, h] = cfg.reference_resolution;
        Self::new(
            f64::from(window_secs),
            cfg.label_font_size,
            CanvasSize::new(
                i32::try_from(w).unwrap_or(i32::MAX),
                i32::try_from(h).unwrap_or(i32::MAX),
            ),
        )
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Track the main window so labels grow and shrink with the display.
    pub fn set_main_window(&mut self, size: CanvasSize) {
        if size.is_degenerate() || self.reference.is_degenerate() {
            return;
        }
        let sx = f64::from(size.width) / f64::from(self.reference.width);
        let sy = f64::from(size.height) / f64::from(self.reference.height);
        self.scale = sx.min(sy).clamp(0.25, 4.0);
    }

    /// Left edge of the time axis, whole seconds before now (≤ 0).
    ///
    /// Within one second of the full window the value snaps to exactly
    /// `-window_secs` so the label does not flicker between e.g. -59 and -61.
    pub fn x_min(&self, earliest: Option<f64>, now: f64) -> f64 {
        let Some(earliest) = earliest else {
            return 0.0;
        };

        let x_min = -(now - earliest).round();
        if (x_min + self.window_secs).abs() <= 1.0 {
            -self.window_secs
        } else {
            x_min
        }
    }

    /// Lay out both axes of `group` on a `canvas`.
    ///
    /// `x_ticks`/`y_ticks` are interval counts; each axis gets one more
    /// labelled position than that, bounds included.
    pub fn compute_axes(
        &self,
        group: &MetricGroup,
        now: f64,
        y_domain: (f64, f64),
        canvas: CanvasSize,
        x_ticks: u32,
        y_ticks: u32,
    ) -> AxisSpec {
        let font_size = self.label_font_size * self.scale;
        let x_min = self.x_min(group.earliest(), now);

        let mut spec = AxisSpec {
            x: Axis {
                min:   x_min,
                max:   0.0,
                ticks: Vec::new(),
                label: "seconds",
            },
            y: Axis {
                min:   y_domain.0,
                max:   y_domain.1,
                ticks: Vec::new(),
                label: group.kind().unit(),
            },
            plot: PlotRect::default(),
            font_size,
        };

        if canvas.is_degenerate() {
            return spec;
        }

        let plot = plot_area(canvas, font_size);
        if plot.is_empty() {
            return spec;
        }

        spec.plot = plot;
        spec.x.ticks = if spec.x.span() > 0.0 {
            ticks(spec.x.min, spec.x.max, x_ticks, plot.x, plot.width)
        } else {
            vec![Tick {
                value:    0.0,
                position: plot.x + plot.width,
            }]
        };
        // Screen y is inverted: the domain minimum sits on the bottom edge.
        spec.y.ticks = ticks(spec.y.min, spec.y.max, y_ticks, plot.y + plot.height, -plot.height);

        spec
    }
}

/// Canvas minus margins wide enough for tick labels at `font_size`.
fn plot_area(canvas: CanvasSize, font_size: f64) -> PlotRect {
    let (width, height) = (f64::from(canvas.width), f64::from(canvas.height));
    let left   = font_size * 3.0;
    let right  = font_size;
    let top    = font_size * 0.8;
    let bottom = font_size * 2.2;

    PlotRect {
        x:      left,
        y:      top,
        width:  width - left - right,
        height: height - top - bottom,
    }
}

fn ticks(min: f64, max: f64, intervals: u32, origin: f64, extent: f64) -> Vec<Tick> {
    let n = intervals.max(1);
    (0..=n)
        .map(|i| {
            let f = f64::from(i) / f64::from(n);
            Tick {
                value:    min + f * (max - min),
                position: origin + f * extent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::{GroupKind, TelemetrySnapshot};
    use crate::window::{SmoothedWindow, WindowSettings};

    fn mapper() -> AxisMapper {
        AxisMapper::new(60.0, 14.0, CanvasSize::new(1920, 1080))
    }

    fn group_since(earliest: f64) -> MetricGroup {
        let mut window = SmoothedWindow::new(
            GroupKind::Util,
            WindowSettings {
                window_secs: 3600.0,
                capacity: 16,
                alpha: 0.3,
            },
        );
        window.refresh_at(earliest, &TelemetrySnapshot::default());
        window.group().clone()
    }

    #[test]
    fn empty_group_starts_at_zero() {
        let group = MetricGroup::new(GroupKind::Util, 8);
        let spec = mapper().compute_axes(&group, 123.0, (0.0, 100.0), CanvasSize::new(400, 200), 4, 2);

        assert_eq!(spec.x.min, 0.0);
        assert_eq!(spec.x.max, 0.0);
        assert_eq!(spec.x.ticks.len(), 1);
        assert!(spec.project(0.0, 50.0).is_none());
    }

    #[test]
    fn x_min_snaps_near_full_window() {
        let m = mapper();
        assert_eq!(m.x_min(Some(41.0), 100.0), -60.0); // -59
        assert_eq!(m.x_min(Some(39.0), 100.0), -60.0); // -61
        assert_eq!(m.x_min(Some(55.0), 100.0), -45.0);
        assert_eq!(m.x_min(Some(37.0), 100.0), -63.0);
    }

    #[test]
    fn x_min_rounds_to_whole_seconds() {
        assert_eq!(mapper().x_min(Some(0.0), 12.4), -12.0);
        assert_eq!(mapper().x_min(Some(0.0), 12.6), -13.0);
    }

    #[test]
    fn y_domain_is_taken_verbatim() {
        let group = group_since(0.0);
        let spec = mapper().compute_axes(&group, 30.0, (35.0, 95.0), CanvasSize::new(800, 300), 4, 2);

        assert_eq!((spec.y.min, spec.y.max), (35.0, 95.0));
        let values: Vec<f64> = spec.y.ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, [35.0, 65.0, 95.0]);
        assert_eq!(spec.x.ticks.len(), 5);
        assert_eq!(spec.x.ticks[0].value, -30.0);
        assert_eq!(spec.x.ticks[4].value, 0.0);
    }

    #[test]
    fn degenerate_canvas_yields_empty_layout() {
        let group = group_since(0.0);
        for canvas in [CanvasSize::new(0, 0), CanvasSize::new(-5, 100), CanvasSize::new(20, 10)] {
            let spec = mapper().compute_axes(&group, 10.0, (0.0, 100.0), canvas, 4, 2);
            assert!(spec.is_degenerate(), "{canvas:?}");
            assert!(spec.x.ticks.is_empty() && spec.y.ticks.is_empty());
            assert!(spec.project(-1.0, 10.0).is_none());
        }
    }

    #[test]
    fn nan_font_size_is_degenerate() {
        let group = group_since(0.0);
        let m = AxisMapper::new(60.0, f64::NAN, CanvasSize::new(1920, 1080));
        let spec = m.compute_axes(&group, 10.0, (0.0, 100.0), CanvasSize::new(600, 300), 4, 2);

        assert!(spec.is_degenerate());
        assert!(spec.x.ticks.is_empty() && spec.y.ticks.is_empty());
        assert!(spec.project(-1.0, 10.0).is_none());
    }

    #[test]
    fn projection_maps_corners_and_clamps_values() {
        let group = group_since(0.0);
        let spec = mapper().compute_axes(&group, 60.0, (0.0, 100.0), CanvasSize::new(600, 300), 4, 2);
        let p = spec.plot;

        let close = |got: Option<(f64, f64)>, want: (f64, f64)| {
            let (x, y) = got.expect("projectable");
            assert!((x - want.0).abs() < 1e-9 && (y - want.1).abs() < 1e-9, "{x},{y} != {want:?}");
        };

        close(spec.project(-60.0, 0.0), (p.x, p.y + p.height));
        close(spec.project(0.0, 100.0), (p.x + p.width, p.y));
        close(spec.project(-30.0, 50.0), (p.x + p.width / 2.0, p.y + p.height / 2.0));
        assert_eq!(spec.project(0.0, 250.0), spec.project(0.0, 100.0));
    }

    #[test]
    fn main_window_scales_fonts_and_margins() {
        let mut m = mapper();
        m.set_main_window(CanvasSize::new(960, 540));
        assert_eq!(m.scale(), 0.5);

        let group = group_since(0.0);
        let spec = m.compute_axes(&group, 1.0, (0.0, 100.0), CanvasSize::new(400, 200), 4, 2);
        assert_eq!(spec.font_size, 7.0);
        assert_eq!(spec.plot.x, 21.0);

        m.set_main_window(CanvasSize::new(0, 0));
        assert_eq!(m.scale(), 0.5);
    }

    #[test]
    fn thermal_axis_carries_unit_label() {
        let group = MetricGroup::new(GroupKind::Thermal, 4);
        let spec = mapper().compute_axes(&group, 0.0, (35.0, 95.0), CanvasSize::new(400, 200), 4, 2);
        assert_eq!(spec.y.label, "°C");
        assert_eq!(spec.x.label, "seconds");
    }
}
