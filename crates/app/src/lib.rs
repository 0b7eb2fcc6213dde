//! Headless kiosk host.
//!
//! Owns the event loop and wires together every background task:
//! - System poller (CPU, memory, GPU load and temperatures)
//! - Profiling helper process (optional, from config)
//! - Config file watcher (live reload on change)
//! - 1-second timer (demo rotation)
//! - Redraw timer (one sample + paint per graph)

pub mod context;
pub mod output;
pub mod selector;

pub use context::AppContext;
pub use output::FrameSink;
pub use selector::DemoSelectors;

use kiosk_config::ConfigWatcher;
use kiosk_core::{CanvasSize, GroupKind, Message, Result};
use kiosk_system::{spawn_monitor, SampleHub};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{info, warn};

/// Rotation tick period.
const TICK: Duration = Duration::from_secs(1);

/// Event bus depth; producers wait when the loop falls this far behind.
const BUS_CAPACITY: usize = 64;

/// Command-line choices forwarded by the binary.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    /// Write every painted frame to stdout as a JSON line.
    pub emit_frames: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run the kiosk until Ctrl-C.
pub fn run(options: RunOptions) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(host_loop(options))
}

async fn host_loop(options: RunOptions) -> Result<()> {
    let config = kiosk_config::load(&options.config_path)?;
    let hub = SampleHub::new();
    let mut monitor = spawn_monitor(
        Duration::from_millis(config.telemetry.poll_interval_ms),
        hub.clone(),
    );

    // Without a toolkit the main window is the reference resolution.
    let [width, height] = config
        .graphs
        .reference_resolution
        .map(|v| i32::try_from(v).unwrap_or(i32::MAX));

    let sink = FrameSink::new(std::io::stdout(), options.emit_frames);
    let mut ctx = AppContext::new(options.config_path.clone(), config, hub, sink)?;
    ctx.start_profiler();

    let (tx, mut rx) = mpsc::channel::<Message>(BUS_CAPACITY);
    let _watcher = ConfigWatcher::spawn(&options.config_path, tx.clone());
    tokio::spawn(shutdown_on_ctrl_c(tx.clone()));

    ctx.on_resize(CanvasSize::new(width, height));

    let mut tick = timer(TICK);
    let mut draw_ms = ctx.config().graphs.draw_interval_ms;
    let mut redraw = timer(Duration::from_millis(draw_ms));

    info!("Kiosk running; Ctrl-C to quit");

    loop {
        let flow = tokio::select! {
            _ = tick.tick() => ctx.update(Message::Tick),
            _ = redraw.tick() => {
                for kind in GroupKind::ALL {
                    if let Err(e) = ctx.on_draw(kind) {
                        warn!("{kind:?} graph not painted: {e}");
                    }
                }
                ControlFlow::Continue(())
            }
            message = rx.recv() => match message {
                Some(message) => ctx.update(message),
                None => ControlFlow::Break(()),
            },
        };
        if flow.is_break() {
            break;
        }

        let wanted = ctx.config().graphs.draw_interval_ms;
        if wanted != draw_ms {
            info!("Redraw interval {draw_ms} ms -> {wanted} ms");
            draw_ms = wanted;
            redraw = timer(Duration::from_millis(draw_ms));
        }
    }

    ctx.shutdown();
    monitor.stop();
    info!("Kiosk stopped after {} frames", ctx.bridge().painted());
    Ok(())
}

fn timer(period: Duration) -> Interval {
    let mut timer = interval(period.max(Duration::from_millis(1)));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

async fn shutdown_on_ctrl_c(bus: mpsc::Sender<Message>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            let _ = bus.send(Message::Shutdown).await;
        }
        Err(e) => warn!("Cannot listen for Ctrl-C: {e}"),
    }
}
