// Path: crates/storage/src/metrics.rs
use once_cell::sync::OnceCell;
use sentinel_telemetry::sinks::{NopSink, StoreMetricsSink};

static NOP_SINK: NopSink = NopSink;
pub static SINK: OnceCell<&'static dyn StoreMetricsSink> = OnceCell::new();

pub fn metrics() -> &'static dyn StoreMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}
