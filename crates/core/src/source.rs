use crate::state::{MetricKey, TelemetrySnapshot};

/// Supplies the most recent raw reading for a metric.
///
/// Implementations must not block and may return stale data. `None` means the
/// metric is currently unavailable; consumers treat that as "no change".
pub trait SampleSource {
    fn sample(&self, key: MetricKey) -> Option<f64>;
}

impl SampleSource for TelemetrySnapshot {
    fn sample(&self, key: MetricKey) -> Option<f64> {
        self.get(key)
    }
}

impl<S: SampleSource + ?Sized> SampleSource for &S {
    fn sample(&self, key: MetricKey) -> Option<f64> {
        (**self).sample(key)
    }
}
