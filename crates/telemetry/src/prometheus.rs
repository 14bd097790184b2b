// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter_vec, Encoder,
    HistogramVec, IntCounterVec, TextEncoder,
};

static STORE_BYTES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static STORE_LATENCY_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static PIPELINE_VERDICTS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static PIPELINE_STAGE_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

/// Records into the process-wide Prometheus registry.
#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs `$body` against the collector if `install()` has run; otherwise the
/// observation is dropped.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl StoreMetricsSink for PrometheusSink {
    fn inc_bytes_stored(&self, backend: &str, bytes: u64) {
        with_metric!(STORE_BYTES_TOTAL, |m| m
            .with_label_values(&[backend])
            .inc_by(bytes));
    }
    fn observe_store_latency(&self, op: &'static str, duration_secs: f64) {
        with_metric!(STORE_LATENCY_SECONDS, |m| m
            .with_label_values(&[op])
            .observe(duration_secs));
    }
}

impl PipelineMetricsSink for PrometheusSink {
    fn inc_verdict(&self, verdict: &'static str) {
        with_metric!(PIPELINE_VERDICTS_TOTAL, |m| m
            .with_label_values(&[verdict])
            .inc());
    }
    fn observe_stage_duration(&self, stage: &'static str, duration_secs: f64) {
        with_metric!(PIPELINE_STAGE_SECONDS, |m| m
            .with_label_values(&[stage])
            .observe(duration_secs));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, stage: &'static str, code: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[stage, code]).inc());
    }
}

fn already_installed() -> prometheus::Error {
    prometheus::Error::Msg("prometheus sink already installed".into())
}

/// Registers every collector with the default registry, points the global
/// pipeline and error sinks at Prometheus, and returns the sink so callers
/// can hand it to the store's own sink cell.
///
/// Call once at startup; a second call fails.
pub fn install() -> Result<&'static PrometheusSink, prometheus::Error> {
    STORE_BYTES_TOTAL
        .set(register_int_counter_vec!(
            "sentinel_store_bytes_total",
            "Total bytes submitted to the content-addressed store.",
            &["backend"]
        )?)
        .map_err(|_| already_installed())?;
    STORE_LATENCY_SECONDS
        .set(register_histogram_vec!(
            "sentinel_store_call_duration_seconds",
            "Latency of content store calls, including timeouts.",
            &["op"],
            exponential_buckets(0.0005, 2.0, 16)?
        )?)
        .map_err(|_| already_installed())?;
    PIPELINE_VERDICTS_TOTAL
        .set(register_int_counter_vec!(
            "sentinel_pipeline_verdicts_total",
            "Completed match pipeline runs, by verdict.",
            &["verdict"]
        )?)
        .map_err(|_| already_installed())?;
    PIPELINE_STAGE_SECONDS
        .set(register_histogram_vec!(
            "sentinel_pipeline_stage_duration_seconds",
            "Latency of each match pipeline stage.",
            &["stage"],
            exponential_buckets(0.0001, 2.0, 18)?
        )?)
        .map_err(|_| already_installed())?;
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "sentinel_errors_total",
            "Total number of errors, by pipeline stage and error code.",
            &["stage", "code"]
        )?)
        .map_err(|_| already_installed())?;

    static SINK: PrometheusSink = PrometheusSink;
    PIPELINE_SINK.set(&SINK).map_err(|_| already_installed())?;
    ERROR_SINK.set(&SINK).map_err(|_| already_installed())?;
    Ok(&SINK)
}

/// Encodes the default registry in the Prometheus text exposition format.
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninstalled_sink_drops_observations() {
        // Nothing is registered in this test binary, so these must be no-ops.
        PrometheusSink.inc_verdict("no_match");
        PrometheusSink.observe_stage_duration("sign", 0.001);
        PrometheusSink.inc_error("store", "STORE_UNAVAILABLE");
        assert!(!render().unwrap().contains("sentinel_errors_total"));
    }
}
