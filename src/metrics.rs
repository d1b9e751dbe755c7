//! Routing Metrics
//!
//! Lookup counters and dispatch latency tracking per backend node.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// Metrics collector for the routing path
#[derive(Debug)]
pub struct Metrics {
    /// Total ring lookups attempted
    total_lookups: AtomicU64,

    /// Lookups rejected because the ring had no members
    failed_lookups: AtomicU64,

    /// Dispatched requests per backend node
    dispatches_by_node: RwLock<HashMap<String, u64>>,

    /// Dispatch latency tracking (simplified)
    latency_sum_us: AtomicU64,
    latency_count: AtomicU64,
    latency_min_us: AtomicU64,
    latency_max_us: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            total_lookups: AtomicU64::new(0),
            failed_lookups: AtomicU64::new(0),
            dispatches_by_node: RwLock::new(HashMap::new()),
            latency_sum_us: AtomicU64::new(0),
            latency_count: AtomicU64::new(0),
            latency_min_us: AtomicU64::new(u64::MAX),
            latency_max_us: AtomicU64::new(0),
        }
    }

    /// Record a ring lookup attempt
    pub fn record_lookup(&self) {
        self.total_lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that failed on an empty ring
    pub fn record_failed_lookup(&self) {
        self.failed_lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed dispatch to a backend node
    pub fn record_dispatch(&self, node: &str, latency: Duration) {
        {
            let mut dispatches = self.dispatches_by_node.write().unwrap();
            *dispatches.entry(node.to_string()).or_insert(0) += 1;
        }

        let latency_us = latency.as_micros() as u64;
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);

        // Update min (atomic min)
        let mut current_min = self.latency_min_us.load(Ordering::Relaxed);
        while latency_us < current_min {
            match self.latency_min_us.compare_exchange_weak(
                current_min,
                latency_us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current_min = c,
            }
        }

        // Update max (atomic max)
        let mut current_max = self.latency_max_us.load(Ordering::Relaxed);
        while latency_us > current_max {
            match self.latency_max_us.compare_exchange_weak(
                current_max,
                latency_us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current_max = c,
            }
        }
    }

    /// Get total lookup count
    pub fn total_lookups(&self) -> u64 {
        self.total_lookups.load(Ordering::Relaxed)
    }

    /// Get empty-ring lookup failures
    pub fn failed_lookups(&self) -> u64 {
        self.failed_lookups.load(Ordering::Relaxed)
    }

    /// Get dispatch counts per backend node
    pub fn dispatches_by_node(&self) -> HashMap<String, u64> {
        self.dispatches_by_node.read().unwrap().clone()
    }

    /// Get average dispatch latency in microseconds
    pub fn avg_latency_us(&self) -> f64 {
        let count = self.latency_count.load(Ordering::Relaxed);
        if count == 0 {
            return 0.0;
        }
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        sum as f64 / count as f64
    }

    /// Get min dispatch latency in microseconds
    pub fn min_latency_us(&self) -> u64 {
        let min = self.latency_min_us.load(Ordering::Relaxed);
        if min == u64::MAX {
            0
        } else {
            min
        }
    }

    /// Get max dispatch latency in microseconds
    pub fn max_latency_us(&self) -> u64 {
        self.latency_max_us.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = Metrics::new();

        metrics.record_lookup();
        metrics.record_lookup();
        metrics.record_lookup();
        metrics.record_failed_lookup();

        metrics.record_dispatch("cache0", Duration::from_micros(100));
        metrics.record_dispatch("cache0", Duration::from_micros(200));
        metrics.record_dispatch("cache1", Duration::from_micros(150));

        assert_eq!(metrics.total_lookups(), 3);
        assert_eq!(metrics.failed_lookups(), 1);
        assert_eq!(metrics.min_latency_us(), 100);
        assert_eq!(metrics.max_latency_us(), 200);
        assert!((metrics.avg_latency_us() - 150.0).abs() < 0.1);

        let by_node = metrics.dispatches_by_node();
        assert_eq!(by_node.get("cache0"), Some(&2));
        assert_eq!(by_node.get("cache1"), Some(&1));
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = Metrics::new();
        assert_eq!(metrics.total_lookups(), 0);
        assert_eq!(metrics.min_latency_us(), 0);
        assert_eq!(metrics.avg_latency_us(), 0.0);
    }
}
