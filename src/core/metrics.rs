//! Logger metrics for observability
//!
//! Counters for records emitted, records filtered by the level gate, and
//! records lost to formatter or sink failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_pooled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_emitted();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_emitted(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records written to the sink
    emitted: AtomicU64,

    /// Calls rejected by the level gate
    filtered: AtomicU64,

    /// Records lost to a formatter or sink failure
    dropped: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Record an emitted entry, returning the previous count
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a filtered call, returning the previous count
    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped entry, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been attempted.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count();
        let total = dropped + self.total_emitted();
        if total == 0 {
            0.0
        } else {
            (dropped as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_emitted(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.drop_rate(), 0.0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_dropped(), 0);
        assert_eq!(metrics.record_dropped(), 1);
        assert_eq!(metrics.record_filtered(), 0);
        assert_eq!(metrics.dropped_count(), 2);
        assert_eq!(metrics.filtered_count(), 1);
    }

    #[test]
    fn test_drop_rate() {
        let metrics = LoggerMetrics::new();
        for _ in 0..90 {
            metrics.record_emitted();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }
        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }
}
