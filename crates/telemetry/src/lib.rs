// Path: crates/telemetry/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Sentinel Telemetry
//!
//! Structured logging initialization and abstract metrics sinks, so the
//! store and pipeline can be instrumented without depending on a backend.

/// The initialization routine for global structured logging.
pub mod init;
/// The concrete implementation of metrics sinks using the `prometheus` crate.
pub mod prometheus;
/// Abstract traits (`*MetricsSink`) that define the contract for metrics reporting.
pub mod sinks;
/// An RAII timer for measuring the duration of a pipeline stage.
pub mod time;

pub use sinks::{error_metrics, pipeline_metrics};
