use crate::{ema::ema, group::MetricGroup};
use kiosk_config::TelemetryConfig;
use kiosk_core::{GroupKind, SampleSource};
use std::time::Instant;
use tracing::{debug, trace};

/// Tunables shared by every window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    /// Retained span in seconds.
    pub window_secs: f64,
    /// Maximum rows kept regardless of age.
    pub capacity: usize,
    /// Smoothing factor.
    pub alpha: f64,
}

impl WindowSettings {
    pub fn from_config(cfg: &TelemetryConfig) -> Self {
        Self {
            window_secs: f64::from(cfg.window_secs),
            capacity:    cfg.capacity,
            alpha:       cfg.alpha,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::from_config(&TelemetryConfig::default())
    }
}

/// Sliding, exponentially smoothed history of one metric group.
///
/// Timestamps are monotonic seconds since the window was created.
#[derive(Debug, Clone)]
pub struct SmoothedWindow {
    settings: WindowSettings,
    epoch:    Instant,
    group:    MetricGroup,
}

impl SmoothedWindow {
    pub fn new(kind: GroupKind, settings: WindowSettings) -> Self {
        Self {
            settings,
            epoch: Instant::now(),
            group: MetricGroup::new(kind, settings.capacity),
        }
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    /// Apply new settings. Alpha and span take effect on the next refresh;
    /// the capacity of the existing series is kept.
    pub fn reconfigure(&mut self, settings: WindowSettings) {
        if settings.capacity != self.settings.capacity {
            debug!(
                "capacity change {} -> {} applies to new windows only",
                self.settings.capacity, settings.capacity
            );
        }
        self.settings = WindowSettings {
            capacity: self.settings.capacity,
            ..settings
        };
    }

    /// Read-only view for the renderer.
    pub fn group(&self) -> &MetricGroup {
        &self.group
    }

    /// Current time on this window's clock.
    pub fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Pull one reading per metric at the current time.
    pub fn refresh<S: SampleSource + ?Sized>(&mut self, source: &S) -> &MetricGroup {
        let now = self.now();
        self.refresh_at(now, source)
    }

    /// Pull one reading per metric, timestamped `now`.
    ///
    /// A metric the source cannot provide repeats its last smoothed value
    /// (or 0.0 if it never had one) so the group stays aligned.
    pub fn refresh_at<S: SampleSource + ?Sized>(&mut self, now: f64, source: &S) -> &MetricGroup {
        let kind   = self.group.kind();
        let alpha  = self.settings.alpha;
        let last   = self.group.last_values();
        let mut row = [0.0; 3];

        for ((slot, key), previous) in row.iter_mut().zip(kind.metrics()).zip(last) {
            let raw = source.sample(key).filter(|v| v.is_finite());
            *slot = match (raw, previous) {
                (Some(raw), Some(prev)) => ema(raw, prev, alpha),
                (Some(raw), None)       => raw,
                (None, Some(prev))      => {
                    trace!("{key} unavailable; holding {prev:.1}");
                    prev
                }
                (None, None) => {
                    debug!("{key} unavailable and no history; plotting 0");
                    0.0
                }
            };
        }

        self.group.push(now, row);
        let evicted = self.group.evict_older_than(now, self.settings.window_secs);
        if evicted > 0 {
            trace!("{kind:?} window evicted {evicted} stale rows");
        }

        &self.group
    }
}
