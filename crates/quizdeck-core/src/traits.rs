//! Core trait definitions for statistics persistence.
//!
//! The engine reports misses through this seam; the `quizdeck-store` crate
//! provides the durable implementation.

/// Receiver for wrong-answer events.
///
/// Each incorrect answer produces one call carrying the labels the miss is
/// credited under (category and subcategory, deduplicated when they
/// coincide). Implementations add one to each label's tally and one to a
/// running total per call.
pub trait StatsSink: Send + Sync {
    fn record_miss(&self, labels: &[&str]);
}

/// A sink that discards every event. The default when no persistence is
/// attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl StatsSink for NoopSink {
    fn record_miss(&self, _labels: &[&str]) {}
}
