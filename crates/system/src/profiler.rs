use crate::hub::SampleHub;
use kiosk_config::ProfilerConfig;
use kiosk_core::{KioskError, MetricKey, Result, TelemetrySnapshot};
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Supervised handle to the external profiling helper.
///
/// The helper prints one line per reading on stdout, formatted as
/// whitespace- or comma-separated `key=value` pairs using the metric wire
/// names, e.g. `gpu_util=41.0 gpu_thermal=57.3`. Every parsed line is
/// published into the [`SampleHub`].
pub struct ProfilerProcess {
    config: ProfilerConfig,
    hub:    SampleHub,
    child:  Option<Child>,
    reader: Option<JoinHandle<()>>,
}

impl ProfilerProcess {
    pub fn new(config: ProfilerConfig, hub: SampleHub) -> Self {
        Self {
            config,
            hub,
            child: None,
            reader: None,
        }
    }

    /// Launch the helper. A no-op if it is already running.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.reap();

        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                KioskError::Profiler(format!("cannot launch '{}': {e}", self.config.command))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| KioskError::Profiler("helper has no stdout".into()))?;

        let hub = self.hub.clone();
        let reader = thread::Builder::new()
            .name("profiler-reader".into())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    match line {
                        Ok(line) => hub.publish(&parse_line(&line)),
                        Err(e) => {
                            warn!("profiler output unreadable: {e}");
                            break;
                        }
                    }
                }
                debug!("profiler stdout closed");
            })
            .map_err(|e| KioskError::Profiler(format!("cannot spawn reader: {e}")))?;

        info!("Profiler '{}' started (pid {})", self.config.command, child.id());
        self.child = Some(child);
        self.reader = Some(reader);
        Ok(())
    }

    /// Terminate the helper.
    ///
    /// Returns once the helper itself has exited. Processes it forked may
    /// still hold its stdout open; the reader thread ends on its own when
    /// they close it.
    pub fn stop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            match child.try_wait() {
                Ok(Some(_)) => {}
                _ => {
                    if let Err(e) = child.kill() {
                        warn!("cannot kill profiler: {e}");
                    }
                }
            }
            info!("Profiler '{}' stopped", self.config.command);
        }
        self.reap();
    }

    /// `true` while the helper process is alive.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(status))) => {
                debug!("profiler exited: {status}");
                false
            }
            Some(Err(e)) => {
                warn!("cannot query profiler: {e}");
                false
            }
            None => false,
        }
    }

    fn reap(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
        if let Some(reader) = self.reader.take() {
            if reader.is_finished() {
                let _ = reader.join();
            } else {
                debug!("profiler output still open; detaching reader");
            }
        }
    }
}

impl Drop for ProfilerProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Parse one helper line. Unknown keys and malformed pairs are skipped.
pub fn parse_line(line: &str) -> TelemetrySnapshot {
    let mut snapshot = TelemetrySnapshot::default();

    for pair in line.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let (Ok(key), Ok(value)) = (key.trim().parse::<MetricKey>(), value.trim().parse::<f64>())
        else {
            debug!("ignoring profiler field '{pair}'");
            continue;
        };
        if value.is_finite() {
            snapshot.set(key, value);
        }
    }

    snapshot
}
