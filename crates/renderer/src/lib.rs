//! Per-draw pipeline between the telemetry windows and the toolkit.
//!
//! On every draw request: refresh the window from the sample source, lay out
//! axes for the current canvas, project the series, and hand the resulting
//! [`GraphFrame`] to a [`RenderBridge`] for rasterizing.

pub mod layout;
pub mod plot;

pub use layout::{graph_width, needs_resize, SidePanel};
pub use plot::{polylines, Polyline};

use kiosk_config::GraphConfig;
use kiosk_core::{CanvasSize, GroupKind, Result, SampleSource};
use kiosk_telemetry::{AxisMapper, AxisSpec, MetricGroup, SmoothedWindow};
use kiosk_theme::Palette;
use tracing::trace;

/// Everything the toolkit needs to paint one graph.
#[derive(Debug, Clone)]
pub struct GraphFrame<'a> {
    pub kind:  GroupKind,
    pub group: &'a MetricGroup,
    pub axes:  AxisSpec,
    pub lines: Vec<Polyline>,
    pub palette: &'a Palette,
}

/// Implemented by the GUI collaborator that owns the drawing surfaces.
pub trait RenderBridge {
    /// Current allocation of the graph area for `kind`.
    fn canvas_size(&self, kind: GroupKind) -> CanvasSize;

    /// Request a new allocation for the graph area of `kind`.
    fn resize_graph(&mut self, kind: GroupKind, size: CanvasSize);

    /// Rasterize one frame.
    fn paint(&mut self, frame: &GraphFrame<'_>) -> Result<()>;
}

/// Fixed per-chart inputs to the axis mapper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec {
    pub y_domain: (f64, f64),
    pub x_ticks:  u32,
    pub y_ticks:  u32,
}

impl ChartSpec {
    pub fn from_config(kind: GroupKind, cfg: &GraphConfig) -> Self {
        let [lo, hi] = match kind {
            GroupKind::Util    => cfg.util_range,
            GroupKind::Thermal => cfg.thermal_range,
        };
        Self {
            y_domain: (lo, hi),
            x_ticks:  cfg.x_ticks,
            y_ticks:  cfg.y_ticks,
        }
    }
}

/// What a draw request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Painted,
    /// Canvas had no usable area; the window was still refreshed.
    Skipped,
}

/// Service one draw request for `window`.
///
/// The window always takes its sample, even when the canvas cannot be drawn
/// on, so the time axis keeps moving while the toolkit is resizing.
pub fn draw<S, R>(
    window: &mut SmoothedWindow,
    source: &S,
    mapper: &AxisMapper,
    chart: &ChartSpec,
    palette: &Palette,
    bridge: &mut R,
) -> Result<DrawOutcome>
where
    S: SampleSource + ?Sized,
    R: RenderBridge + ?Sized,
{
    let now = window.now();
    window.refresh_at(now, source);

    let group  = window.group();
    let canvas = bridge.canvas_size(group.kind());
    let axes = mapper.compute_axes(group, now, chart.y_domain, canvas, chart.x_ticks, chart.y_ticks);

    if axes.is_degenerate() {
        trace!("{:?} graph skipped: canvas {canvas:?}", group.kind());
        return Ok(DrawOutcome::Skipped);
    }

    let lines = polylines(group, &axes, now, palette);
    let frame = GraphFrame {
        kind: group.kind(),
        group,
        axes,
        lines,
        palette,
    };
    bridge.paint(&frame)?;
    Ok(DrawOutcome::Painted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::{MetricKey, TelemetrySnapshot};
    use kiosk_telemetry::WindowSettings;

    struct Recorder {
        canvas: CanvasSize,
        frames: Vec<(GroupKind, usize, usize)>,
    }

    impl RenderBridge for Recorder {
        fn canvas_size(&self, _kind: GroupKind) -> CanvasSize {
            self.canvas
        }

        fn resize_graph(&mut self, _kind: GroupKind, size: CanvasSize) {
            self.canvas = size;
        }

        fn paint(&mut self, frame: &GraphFrame<'_>) -> Result<()> {
            self.frames.push((frame.kind, frame.group.len(), frame.lines.len()));
            Ok(())
        }
    }

    fn setup(kind: GroupKind) -> (SmoothedWindow, AxisMapper, ChartSpec) {
        let cfg = GraphConfig::default();
        (
            SmoothedWindow::new(kind, WindowSettings::default()),
            AxisMapper::from_config(60, &cfg),
            ChartSpec::from_config(kind, &cfg),
        )
    }

    #[test]
    fn chart_spec_picks_range_per_kind() {
        let cfg = GraphConfig::default();
        assert_eq!(ChartSpec::from_config(GroupKind::Util, &cfg).y_domain, (0.0, 100.0));
        assert_eq!(ChartSpec::from_config(GroupKind::Thermal, &cfg).y_domain, (35.0, 95.0));
    }

    #[test]
    fn draw_refreshes_then_paints() {
        let (mut window, mapper, chart) = setup(GroupKind::Util);
        let source = TelemetrySnapshot::default().with(MetricKey::CpuUtil, 50.0);
        let mut bridge = Recorder {
            canvas: CanvasSize::new(640, 240),
            frames: Vec::new(),
        };

        for _ in 0..3 {
            let outcome = draw(&mut window, &source, &mapper, &chart, &Palette::default(), &mut bridge);
            assert_eq!(outcome.unwrap(), DrawOutcome::Painted);
        }

        assert_eq!(bridge.frames.len(), 3);
        assert_eq!(bridge.frames[2], (GroupKind::Util, 3, 3));
    }

    #[test]
    fn degenerate_canvas_skips_paint_but_samples() {
        let (mut window, mapper, chart) = setup(GroupKind::Thermal);
        let mut bridge = Recorder {
            canvas: CanvasSize::new(0, 0),
            frames: Vec::new(),
        };

        let outcome = draw(
            &mut window,
            &TelemetrySnapshot::default(),
            &mapper,
            &chart,
            &Palette::default(),
            &mut bridge,
        );

        assert_eq!(outcome.unwrap(), DrawOutcome::Skipped);
        assert!(bridge.frames.is_empty());
        assert_eq!(window.group().len(), 1);
    }

    #[test]
    fn polylines_carry_palette_colours() {
        let (mut window, mapper, chart) = setup(GroupKind::Util);
        window.refresh_at(0.0, &TelemetrySnapshot::default().with(MetricKey::GpuUtil, 80.0));
        window.refresh_at(10.0, &TelemetrySnapshot::default().with(MetricKey::GpuUtil, 80.0));

        let axes = mapper.compute_axes(window.group(), 10.0, chart.y_domain, CanvasSize::new(640, 240), 4, 2);
        let palette = Palette::default();
        let lines = polylines(window.group(), &axes, 10.0, &palette);

        let gpu = lines.iter().find(|l| l.key == MetricKey::GpuUtil).unwrap();
        assert_eq!(gpu.color, palette.gpu);
        assert_eq!(gpu.points.len(), 2);
        // Oldest point on the left edge, newest on the right.
        assert_eq!(gpu.points[0].0, axes.plot.x);
        assert!((gpu.points[1].0 - (axes.plot.x + axes.plot.width)).abs() < 1e-9);
    }
}
