//! Delivery counters.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::sink::SinkKind;

/// Per-sink delivery counters, updated by the dispatch engine.
#[derive(Debug, Default)]
pub struct DeliveryStats {
    console: AtomicU64,
    inspector: AtomicU64,
    remote: AtomicU64,
    failed_inspector: AtomicU64,
    failed_remote: AtomicU64,
}

/// Point-in-time copy of [`DeliveryStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliverySnapshot {
    pub console: u64,
    pub inspector: u64,
    pub remote: u64,
    pub failed_inspector: u64,
    pub failed_remote: u64,
}

impl DeliverySnapshot {
    /// Failed deliveries across all sinks.
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed_inspector + self.failed_remote
    }
}

impl DeliveryStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_delivered(&self, kind: SinkKind) {
        let counter = match kind {
            SinkKind::Console => &self.console,
            SinkKind::Inspector => &self.inspector,
            SinkKind::Remote => &self.remote,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Console sinks cannot fail, so a console failure is never recorded.
    pub fn record_failed(&self, kind: SinkKind) {
        match kind {
            SinkKind::Console => {}
            SinkKind::Inspector => {
                self.failed_inspector.fetch_add(1, Ordering::Relaxed);
            }
            SinkKind::Remote => {
                self.failed_remote.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> DeliverySnapshot {
        DeliverySnapshot {
            console: self.console.load(Ordering::Relaxed),
            inspector: self.inspector.load(Ordering::Relaxed),
            remote: self.remote.load(Ordering::Relaxed),
            failed_inspector: self.failed_inspector.load(Ordering::Relaxed),
            failed_remote: self.failed_remote.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_sink() {
        let stats = DeliveryStats::new();
        stats.record_delivered(SinkKind::Console);
        stats.record_delivered(SinkKind::Console);
        stats.record_delivered(SinkKind::Remote);
        stats.record_failed(SinkKind::Inspector);
        stats.record_failed(SinkKind::Console);

        let snap = stats.snapshot();
        assert_eq!(snap.console, 2);
        assert_eq!(snap.remote, 1);
        assert_eq!(snap.inspector, 0);
        assert_eq!(snap.failed_inspector, 1);
        assert_eq!(snap.failed(), 1);
    }
}
