//! Resolution metrics.
//!
//! Each translator counts how its lookups were satisfied: directly, through
//! the fallback language, or not at all.

use crate::translator::resolver::Source;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-translator resolution counters.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Keys found in the resolution language
    hits: AtomicUsize,

    /// Keys found only in the fallback language
    fallback_hits: AtomicUsize,

    /// Keys rendered as placeholders
    misses: AtomicUsize,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolution by its source.
    pub fn record(&self, source: Source) {
        let counter = match source {
            Source::Language => &self.hits,
            Source::Fallback => &self.fallback_hits,
            Source::Placeholder => &self.misses,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallback_hits = self.fallback_hits();
        let misses = self.misses();
        let total = hits + fallback_hits + misses;
        let hit_rate = if total > 0 {
            ((hits + fallback_hits) as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            fallback_hits,
            misses,
            hit_rate,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.fallback_hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of resolution statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub hits: usize,
    pub fallback_hits: usize,
    pub misses: usize,

    /// Share of resolutions that produced a translation, as a percentage (0-100)
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = ResolutionMetrics::new().report();
        assert_eq!(report.hits + report.fallback_hits + report.misses, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_record_and_report() {
        let metrics = ResolutionMetrics::new();
        metrics.record(Source::Language);
        metrics.record(Source::Language);
        metrics.record(Source::Fallback);
        metrics.record(Source::Placeholder);

        let report = metrics.report();
        assert_eq!(report.hits, 2);
        assert_eq!(report.fallback_hits, 1);
        assert_eq!(report.misses, 1);
        assert!((report.hit_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let metrics = ResolutionMetrics::new();
        metrics.record(Source::Placeholder);
        metrics.reset();
        assert_eq!(metrics.misses(), 0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = ResolutionMetrics::new();
        metrics.record(Source::Language);
        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["hit_rate"], 100.0);
    }
}
