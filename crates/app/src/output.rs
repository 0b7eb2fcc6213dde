use kiosk_core::{CanvasSize, GroupKind, KioskError, Result};
use kiosk_renderer::{GraphFrame, Polyline, RenderBridge};
use kiosk_telemetry::AxisSpec;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Headless render bridge.
///
/// Keeps the graph allocations the host asks for and, when enabled, writes
/// every painted frame as one JSON line to `out`.
pub struct FrameSink<W> {
    out:      W,
    emit:     bool,
    canvases: [CanvasSize; 2],
    painted:  u64,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    seq:     u64,
    kind:    GroupKind,
    samples: usize,
    axes:    &'a AxisSpec,
    lines:   &'a [Polyline],
}

impl<W: Write> FrameSink<W> {
    pub fn new(out: W, emit: bool) -> Self {
        Self {
            out,
            emit,
            canvases: [CanvasSize::default(); 2],
            painted:  0,
        }
    }

    /// Frames painted so far.
    pub fn painted(&self) -> u64 {
        self.painted
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderBridge for FrameSink<W> {
    fn canvas_size(&self, kind: GroupKind) -> CanvasSize {
        self.canvases[kind.index()]
    }

    fn resize_graph(&mut self, kind: GroupKind, size: CanvasSize) {
        debug!("{kind:?} graph allocated {}x{}", size.width, size.height);
        self.canvases[kind.index()] = size;
    }

    fn paint(&mut self, frame: &GraphFrame<'_>) -> Result<()> {
        self.painted += 1;
        if !self.emit {
            return Ok(());
        }

        let record = FrameRecord {
            seq:     self.painted,
            kind:    frame.kind,
            samples: frame.group.len(),
            axes:    &frame.axes,
            lines:   &frame.lines,
        };
        serde_json::to_writer(&mut self.out, &record)
            .map_err(|e| KioskError::Render(format!("cannot encode frame: {e}")))?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
