// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// The global pipeline sink, set once at startup.
pub static PIPELINE_SINK: OnceCell<&'static dyn PipelineMetricsSink> = OnceCell::new();
/// The global error sink, set once at startup.
pub static ERROR_SINK: OnceCell<&'static dyn ErrorMetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns the configured pipeline metrics sink, or a no-op sink.
pub fn pipeline_metrics() -> &'static dyn PipelineMetricsSink {
    PIPELINE_SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns the configured error metrics sink, or a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    ERROR_SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics related to the evidence store.
pub trait StoreMetricsSink: Send + Sync + std::fmt::Debug {
    /// Adds to the bytes submitted to a backend.
    fn inc_bytes_stored(&self, backend: &str, bytes: u64);
    /// Observes the latency of a backend call (`put` or `get`), including timeouts.
    fn observe_store_latency(&self, op: &'static str, duration_secs: f64);
}
impl StoreMetricsSink for NopSink {
    fn inc_bytes_stored(&self, _backend: &str, _bytes: u64) {}
    fn observe_store_latency(&self, _op: &'static str, _duration_secs: f64) {}
}

/// A sink for metrics related to match pipeline runs.
pub trait PipelineMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter for a completed run, labeled by verdict.
    fn inc_verdict(&self, verdict: &'static str);
    /// Observes the duration of one pipeline stage (`sign`, `encrypt`, `store`, `ledger`).
    fn observe_stage_duration(&self, stage: &'static str, duration_secs: f64);
}
impl PipelineMetricsSink for NopSink {
    fn inc_verdict(&self, _verdict: &'static str) {}
    fn observe_stage_duration(&self, _stage: &'static str, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its stage and stable code.
    fn inc_error(&self, stage: &'static str, code: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _stage: &'static str, _code: &'static str) {}
}
