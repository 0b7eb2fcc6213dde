pub mod hub;
pub mod profiler;
pub mod sensors;

pub use hub::SampleHub;
pub use profiler::{parse_line, ProfilerProcess};

use kiosk_core::{MetricKey, TelemetrySnapshot};
use std::time::Duration;
use sysinfo::{Components, System};
use tokio::sync::oneshot;
use tokio::task::{self, JoinHandle};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Handle to the background poller; stopping or dropping it ends the task.
pub struct MonitorHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Ask the poller to exit after its current refresh.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn a background Tokio task that polls CPU/memory load, GPU load and
/// sensor temperatures every `interval` and publishes them into `hub`.
///
/// sysinfo refreshes block for a moment, so each poll runs on the blocking
/// pool. Must be called from within a Tokio runtime.
pub fn spawn_monitor(interval: Duration, hub: SampleHub) -> MonitorHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel();

    let handle = tokio::spawn(async move {
        let mut ticker = time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut probe: Option<Probe> = None;

        loop {
            tokio::select! {
                _ = &mut stop_rx => break, // stopped, or handle dropped
                _ = ticker.tick() => {}
            }

            let polled = task::spawn_blocking(move || {
                let mut probe = probe.unwrap_or_else(Probe::new);
                let snapshot = probe.poll();
                (probe, snapshot)
            })
            .await;

            match polled {
                Ok((p, snapshot)) => {
                    debug!("polled {snapshot:?}");
                    hub.publish(&snapshot);
                    probe = Some(p);
                }
                Err(e) => {
                    warn!("telemetry poll failed: {e}");
                    break;
                }
            }
        }
        debug!("telemetry poller stopped");
    });

    info!("Telemetry poller running every {} ms", interval.as_millis());
    MonitorHandle {
        stop: Some(stop_tx),
        task: handle,
    }
}

/// sysinfo state kept between polls so CPU usage has a previous sample.
struct Probe {
    sys:        System,
    components: Components,
}

impl Probe {
    fn new() -> Self {
        Self {
            sys:        System::new(),
            components: Components::new_with_refreshed_list(),
        }
    }

    fn poll(&mut self) -> TelemetrySnapshot {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.components.refresh(false);
        take_snapshot(&self.sys, &self.components)
    }
}

fn take_snapshot(sys: &System, components: &Components) -> TelemetrySnapshot {
    let mut snapshot = TelemetrySnapshot::default();

    // ── Utilization ──────────────────────────────────────────────────────────
    snapshot.set(MetricKey::CpuUtil, f64::from(sys.global_cpu_usage()));
    if sys.total_memory() > 0 {
        let used = sys.used_memory() as f64 / sys.total_memory() as f64;
        snapshot.set(MetricKey::MemUtil, used * 100.0);
    }
    if let Some(gpu) = sensors::read_gpu_busy() {
        snapshot.set(MetricKey::GpuUtil, gpu);
    }

    // ── Thermals ─────────────────────────────────────────────────────────────
    let readings = components.list().iter().map(|c| (c.label(), c.temperature()));
    let thermals = [
        (MetricKey::CpuThermal, sensors::CPU_SENSOR_LABELS),
        (MetricKey::GpuThermal, sensors::GPU_SENSOR_LABELS),
        (MetricKey::MemThermal, sensors::MEM_SENSOR_LABELS),
    ];
    for (key, labels) in thermals {
        if let Some(temp) = sensors::match_sensor(readings.clone(), labels) {
            snapshot.set(key, temp);
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn monitor_publishes_until_stopped() {
        let hub = SampleHub::new();
        let mut monitor = spawn_monitor(Duration::from_millis(10), hub.clone());

        let deadline = Instant::now() + Duration::from_secs(5);
        while hub.snapshot().get(MetricKey::CpuUtil).is_none() && Instant::now() < deadline {
            time::sleep(Duration::from_millis(10)).await;
        }
        assert!(hub.snapshot().get(MetricKey::CpuUtil).is_some());

        monitor.stop();
        while !monitor.is_finished() && Instant::now() < deadline {
            time::sleep(Duration::from_millis(10)).await;
        }
        assert!(monitor.is_finished());
    }

    #[tokio::test]
    async fn dropping_the_handle_ends_the_task() {
        let monitor = spawn_monitor(Duration::from_millis(10), SampleHub::new());
        let MonitorHandle { stop, task } = monitor;
        drop(stop);

        time::timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    }
}
