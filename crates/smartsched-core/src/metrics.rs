//! Operation counting and elapsed-time instrumentation.
//!
//! Every algorithm owns a [`Metrics`] value and exposes it through the
//! [`Instrumented`] trait. Counters are diagnostics only: they never feed
//! back into an algorithm's result.
//!
//! Counts are not shared between algorithms. When one algorithm runs another
//! internally it adds the inner count to its own with
//! [`Instrumented::increment_operation_count`].

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Operation counter plus a restartable wall clock.
#[derive(Debug, Clone)]
pub struct Metrics {
    operations: u64,
    started: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a zeroed counter with the clock started now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operations: 0,
            started: Instant::now(),
        }
    }

    /// Zero the counter and restart the clock.
    pub fn reset(&mut self) {
        self.operations = 0;
        self.started = Instant::now();
    }

    /// Number of operations counted since the last reset.
    #[must_use]
    pub const fn operation_count(&self) -> u64 {
        self.operations
    }

    /// Wall-clock time since the last reset.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Add `delta` operations (saturating).
    pub const fn increment(&mut self, delta: u64) {
        self.operations = self.operations.saturating_add(delta);
    }

    /// Freeze the current count and elapsed time.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            operations: self.operations,
            elapsed_ns: u64::try_from(self.elapsed().as_nanos()).unwrap_or(u64::MAX),
        }
    }
}

/// Counting/timing capability shared by the graph algorithms.
///
/// Implementors only provide access to their [`Metrics`]; the rest of the
/// contract comes from the provided methods.
pub trait Instrumented {
    fn metrics(&self) -> &Metrics;

    fn metrics_mut(&mut self) -> &mut Metrics;

    /// Zero the counter and restart the clock.
    fn reset(&mut self) {
        self.metrics_mut().reset();
    }

    fn operation_count(&self) -> u64 {
        self.metrics().operation_count()
    }

    fn elapsed(&self) -> Duration {
        self.metrics().elapsed()
    }

    fn increment_operation_count(&mut self, delta: u64) {
        self.metrics_mut().increment(delta);
    }
}

/// Immutable diagnostics attached to every algorithm result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Operations counted during the run.
    pub operations: u64,
    /// Elapsed wall-clock time in nanoseconds.
    pub elapsed_ns: u64,
}

impl MetricsSnapshot {
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_ns)
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Operations: {}, Time: {}",
            group_thousands(self.operations),
            format_duration(self.elapsed())
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros >= 1_000_000 {
        let secs = micros / 1_000_000;
        let millis = (micros % 1_000_000) / 1_000;
        format!("{secs}.{millis:03}s")
    } else if micros >= 1_000 {
        let millis = micros / 1_000;
        let rem = micros % 1_000;
        format!("{millis}.{rem:03}ms")
    } else if micros > 0 {
        format!("{micros}µs")
    } else {
        format!("{}ns", duration.as_nanos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        metrics: Metrics,
    }

    impl Instrumented for Probe {
        fn metrics(&self) -> &Metrics {
            &self.metrics
        }

        fn metrics_mut(&mut self) -> &mut Metrics {
            &mut self.metrics
        }
    }

    #[test]
    fn increments_accumulate_and_reset_clears() {
        let mut probe = Probe {
            metrics: Metrics::new(),
        };
        probe.increment_operation_count(1);
        probe.increment_operation_count(41);
        assert_eq!(probe.operation_count(), 42);

        probe.reset();
        assert_eq!(probe.operation_count(), 0);
    }

    #[test]
    fn increment_saturates() {
        let mut metrics = Metrics::new();
        metrics.increment(u64::MAX);
        metrics.increment(5);
        assert_eq!(metrics.operation_count(), u64::MAX);
    }

    #[test]
    fn snapshot_copies_count() {
        let mut metrics = Metrics::new();
        metrics.increment(7);
        let snap = metrics.snapshot();
        metrics.increment(3);
        assert_eq!(snap.operations, 7);
        assert_eq!(metrics.operation_count(), 10);
    }

    #[test]
    fn display_groups_thousands() {
        let snap = MetricsSnapshot {
            operations: 1_234_567,
            elapsed_ns: 2_500_000,
        };
        assert_eq!(snap.to_string(), "Operations: 1,234,567, Time: 2.500ms");
    }

    #[test]
    fn small_values_render_without_separator() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(format_duration(Duration::from_nanos(420)), "420ns");
        assert_eq!(format_duration(Duration::from_micros(12)), "12µs");
    }
}
