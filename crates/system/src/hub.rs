use kiosk_core::{MetricKey, SampleSource, TelemetrySnapshot};
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe hand-off point between telemetry producers (poller task,
/// profiler reader) and the loop thread that smooths and draws.
///
/// Producers publish partial snapshots that are merged under the write lock;
/// readers always see a whole, consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct SampleHub {
    inner: Arc<RwLock<TelemetrySnapshot>>,
}

impl SampleHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge every reading present in `update`; absent readings keep their
    /// previous (possibly stale) value.
    pub fn publish(&self, update: &TelemetrySnapshot) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.merge(update);
    }

    /// Forget a metric, e.g. when its sensor disappeared.
    pub fn invalidate(&self, key: MetricKey) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.clear(key);
    }

    /// Copy of the current readings.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SampleSource for SampleHub {
    fn sample(&self, key: MetricKey) -> Option<f64> {
        self.snapshot().get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_merges_partial_updates() {
        let hub = SampleHub::new();
        hub.publish(&TelemetrySnapshot::default().with(MetricKey::CpuUtil, 10.0));
        hub.publish(&TelemetrySnapshot::default().with(MetricKey::GpuThermal, 61.5));

        assert_eq!(hub.sample(MetricKey::CpuUtil), Some(10.0));
        assert_eq!(hub.sample(MetricKey::GpuThermal), Some(61.5));
        assert_eq!(hub.sample(MetricKey::MemUtil), None);
    }

    #[test]
    fn clones_share_state_across_threads() {
        let hub = SampleHub::new();
        let producer = hub.clone();

        std::thread::spawn(move || {
            producer.publish(&TelemetrySnapshot::default().with(MetricKey::MemUtil, 33.0));
        })
        .join()
        .unwrap();

        assert_eq!(hub.sample(MetricKey::MemUtil), Some(33.0));
        hub.invalidate(MetricKey::MemUtil);
        assert_eq!(hub.sample(MetricKey::MemUtil), None);
    }
}
