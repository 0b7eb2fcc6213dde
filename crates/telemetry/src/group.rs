use kiosk_core::{GroupKind, MetricKey};
use std::collections::VecDeque;

/// Smoothed values of a single metric. Index `i` belongs to timestamp `i`
/// of the owning [`MetricGroup`].
#[derive(Debug, Clone)]
pub struct MetricSeries {
    key:    MetricKey,
    values: VecDeque<f64>,
}

impl MetricSeries {
    fn new(key: MetricKey, capacity: usize) -> Self {
        Self {
            key,
            values: VecDeque::with_capacity(capacity),
        }
    }

    pub fn key(&self) -> MetricKey {
        self.key
    }

    pub fn values(&self) -> &VecDeque<f64> {
        &self.values
    }

    /// Most recent smoothed value.
    pub fn last(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Time-aligned series sharing one time axis.
///
/// Mutation is crate-private and always applied to the time axis and every
/// series together, so `times().len() == series.len()` holds for every
/// series at every point in time.
#[derive(Debug, Clone)]
pub struct MetricGroup {
    kind:     GroupKind,
    capacity: usize,
    times:    VecDeque<f64>,
    series:   [MetricSeries; 3],
}

impl MetricGroup {
    pub fn new(kind: GroupKind, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            kind,
            capacity,
            times: VecDeque::with_capacity(capacity),
            series: kind.metrics().map(|key| MetricSeries::new(key, capacity)),
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sample timestamps, monotonic seconds, oldest first.
    pub fn times(&self) -> &VecDeque<f64> {
        &self.times
    }

    pub fn earliest(&self) -> Option<f64> {
        self.times.front().copied()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn series(&self, key: MetricKey) -> Option<&MetricSeries> {
        self.series.iter().find(|s| s.key == key)
    }

    pub fn iter_series(&self) -> impl Iterator<Item = &MetricSeries> {
        self.series.iter()
    }

    /// `(timestamp, value)` pairs of one metric, oldest first.
    pub fn points(&self, key: MetricKey) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.series(key)
            .into_iter()
            .flat_map(move |s| self.times.iter().copied().zip(s.values.iter().copied()))
    }

    /// Last smoothed value per series, in [`GroupKind::metrics`] order.
    pub(crate) fn last_values(&self) -> [Option<f64>; 3] {
        [self.series[0].last(), self.series[1].last(), self.series[2].last()]
    }

    /// Append one row. At capacity the oldest row is dropped first.
    pub(crate) fn push(&mut self, timestamp: f64, values: [f64; 3]) {
        if self.times.len() >= self.capacity {
            self.pop_front();
        }
        self.times.push_back(timestamp);
        for (series, value) in self.series.iter_mut().zip(values) {
            series.values.push_back(value);
        }
    }

    /// Drop rows older than `window` seconds relative to `now`.
    /// Returns the number of rows removed.
    pub(crate) fn evict_older_than(&mut self, now: f64, window: f64) -> usize {
        let mut evicted = 0;
        while self.times.front().is_some_and(|&ts| now - ts > window) {
            self.pop_front();
            evicted += 1;
        }
        evicted
    }

    fn pop_front(&mut self) {
        self.times.pop_front();
        for series in &mut self.series {
            series.values.pop_front();
        }
    }
}
