use crate::selector::{DemoSelectors, SELECTOR_NAMES};
use kiosk_config::KioskConfig;
use kiosk_core::{CanvasSize, GroupKind, Message, Result, Slot, WidgetRegistry};
use kiosk_renderer::{draw, graph_width, needs_resize, ChartSpec, DrawOutcome, RenderBridge, SidePanel};
use kiosk_rotation::{DemoRotationScheduler, DemoSelector};
use kiosk_system::{ProfilerProcess, SampleHub};
use kiosk_telemetry::{AxisMapper, SmoothedWindow, WindowSettings};
use kiosk_theme::Palette;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Read-out panels beside the graphs (cpu/mem/gpu figures), left to right.
pub const READOUT_PANELS: [SidePanel; 2] = [
    SidePanel { width: 320, margin_start: 16, margin_end: 16 },
    SidePanel { width: 320, margin_start: 16, margin_end: 16 },
];

/// Everything the host loop mutates, owned in one place.
///
/// Entry points (`on_tick`, `on_draw`, `on_resize`, `update`) take `&mut self`
/// and must be called from a single thread, one at a time.
pub struct AppContext<B> {
    config_path: PathBuf,
    config:      KioskConfig,
    palette:     Palette,
    hub:         SampleHub,
    /// One window per [`GroupKind`], created on its first draw.
    windows:     [Option<SmoothedWindow>; 2],
    mapper:      AxisMapper,
    charts:      [ChartSpec; 2],
    main_window: CanvasSize,
    scheduler:   DemoRotationScheduler,
    selectors:   DemoSelectors,
    slots:       [Slot; 2],
    profiler:    Option<ProfilerProcess>,
    bridge:      B,
}

impl<B: RenderBridge> AppContext<B> {
    pub fn new(
        config_path: impl Into<PathBuf>,
        config: KioskConfig,
        hub: SampleHub,
        bridge: B,
    ) -> Result<Self> {
        let selectors = DemoSelectors::from_config(&config.rotation);
        let slots = [
            selectors.require(SELECTOR_NAMES[0])?,
            selectors.require(SELECTOR_NAMES[1])?,
        ];
        let profiler = config
            .profiler
            .clone()
            .map(|cfg| ProfilerProcess::new(cfg, hub.clone()));

        Ok(Self {
            config_path: config_path.into(),
            palette:     Palette::from_config(&config.theme),
            windows:     [None, None],
            mapper:      AxisMapper::from_config(config.telemetry.window_secs, &config.graphs),
            charts:      GroupKind::ALL.map(|kind| ChartSpec::from_config(kind, &config.graphs)),
            main_window: CanvasSize::default(),
            scheduler:   DemoRotationScheduler::new(config.rotation.switch_period_secs),
            selectors,
            slots,
            profiler,
            hub,
            bridge,
            config,
        })
    }

    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn hub(&self) -> &SampleHub {
        &self.hub
    }

    pub fn selectors(&self) -> &DemoSelectors {
        &self.selectors
    }

    pub fn scheduler(&self) -> &DemoRotationScheduler {
        &self.scheduler
    }

    pub fn window(&self, kind: GroupKind) -> Option<&SmoothedWindow> {
        self.windows[kind.index()].as_ref()
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    // ── Entry points ──────────────────────────────────────────────────────────

    /// One-second tick: advance demo rotation.
    pub fn on_tick(&mut self) {
        let outcome = self.scheduler.tick(&mut self.selectors);
        if !outcome.is_idle() {
            debug!("rotation tick applied {:?}", outcome.switches);
        }
    }

    /// Pull a sample into the `kind` window and repaint its graph.
    pub fn on_draw(&mut self, kind: GroupKind) -> Result<DrawOutcome> {
        let settings = WindowSettings::from_config(&self.config.telemetry);
        let window = self.windows[kind.index()]
            .get_or_insert_with(|| SmoothedWindow::new(kind, settings));

        draw(
            window,
            &self.hub,
            &self.mapper,
            &self.charts[kind.index()],
            &self.palette,
            &mut self.bridge,
        )
    }

    /// Main window allocation changed: rescale labels and split the width
    /// left over by the read-out panels between the two graphs.
    pub fn on_resize(&mut self, size: CanvasSize) {
        self.main_window = size;
        self.mapper.set_main_window(size);

        let Some(half) = graph_width(size.width, &READOUT_PANELS) else {
            debug!("no room for graphs at {}x{}", size.width, size.height);
            return;
        };
        let current = GroupKind::ALL.map(|kind| self.bridge.canvas_size(kind));
        let height_changed = current.iter().any(|c| c.height != size.height);

        if needs_resize(current.map(|c| c.width), half) || height_changed {
            for kind in GroupKind::ALL {
                self.bridge.resize_graph(kind, CanvasSize::new(half, size.height));
            }
        }
    }

    /// Dispatch one bus message. `Break` asks the host loop to exit.
    pub fn update(&mut self, message: Message) -> ControlFlow<()> {
        match message {
            Message::Tick => self.on_tick(),
            Message::DrawRequested(kind) => {
                if let Err(e) = self.on_draw(kind) {
                    warn!("{kind:?} graph not painted: {e}");
                }
            }
            Message::Resized { width, height } => self.on_resize(CanvasSize::new(width, height)),
            Message::Telemetry(snapshot) => self.hub.publish(&snapshot),
            Message::ConfigReloaded => self.reload(),
            Message::CycleToggled { slot, enabled } => {
                let slot = self.slot(slot);
                self.selectors.set_cycle(slot, enabled);
            }
            Message::DualRunningChanged { slot, running } => {
                let slot = self.slot(slot);
                self.selectors.set_dual_running(slot, running);
            }
            Message::DemoSelected { slot, index } => {
                let slot = self.slot(slot);
                self.selectors.set_active(slot, index);
                self.scheduler.sync_running_index(slot, index);
            }
            Message::Shutdown => {
                info!("Shutdown requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    // ── Profiler ──────────────────────────────────────────────────────────────

    /// Launch the configured profiling helper, if any.
    pub fn start_profiler(&mut self) {
        if let Some(profiler) = self.profiler.as_mut() {
            if let Err(e) = profiler.start() {
                warn!("{e}; GPU readings limited to sysfs");
            }
        }
    }

    pub fn profiler_running(&mut self) -> bool {
        self.profiler.as_mut().is_some_and(ProfilerProcess::is_running)
    }

    /// Stop background helpers owned by the context.
    pub fn shutdown(&mut self) {
        if let Some(profiler) = self.profiler.as_mut() {
            profiler.stop();
        }
    }

    // ── Config ────────────────────────────────────────────────────────────────

    fn reload(&mut self) {
        match kiosk_config::load(&self.config_path) {
            Ok(cfg) => {
                info!("Config reloaded");
                self.apply_config(cfg);
            }
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    /// Apply a new configuration without dropping collected history.
    pub fn apply_config(&mut self, config: KioskConfig) {
        let settings = WindowSettings::from_config(&config.telemetry);
        for window in self.windows.iter_mut().flatten() {
            window.reconfigure(settings);
        }

        self.palette = Palette::from_config(&config.theme);
        self.mapper = AxisMapper::from_config(config.telemetry.window_secs, &config.graphs);
        self.mapper.set_main_window(self.main_window);
        self.charts = GroupKind::ALL.map(|kind| ChartSpec::from_config(kind, &config.graphs));
        self.scheduler.set_period(config.rotation.switch_period_secs);
        self.selectors.replace_demos(&config.rotation);

        if config.profiler != self.config.profiler {
            if let Some(mut old) = self.profiler.take() {
                old.stop();
            }
            self.profiler = config
                .profiler
                .clone()
                .map(|cfg| ProfilerProcess::new(cfg, self.hub.clone()));
            self.start_profiler();
        }

        self.config = config;
    }

    /// Widget handle resolved for `slot` at startup.
    fn slot(&self, slot: Slot) -> Slot {
        self.slots[slot.index()]
    }
}
