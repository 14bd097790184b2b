// Path: crates/pipeline/src/lib.rs
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

//! # Sentinel Match Pipeline
//!
//! Given a quantized embedding and its capture metadata, a
//! [`MatchPipeline`] run:
//!
//! 1. signs the embedding against the deployment's hyperplanes,
//! 2. encrypts `{embedding, lsh, metadata}` and stores it, then stores the
//!    signature → evidence mapping,
//! 3. asks the ledger for the profile registered under the signature,
//! 4. returns a [`MatchReport`](sentinel_types::MatchReport) with the verdict
//!    and the addresses written in step 2.
//!
//! Evidence is written before the ledger is consulted and is never rolled
//! back. A ledger failure after that point is reported as
//! [`PipelineError::Verification`], which carries the receipt.
//!
//! The key and the hyperplanes are loaded once by [`Deployment::load`] and
//! shared read-only by every pipeline built from it.

pub mod deployment;
pub mod error;
pub mod pipeline;

pub use deployment::{Deployment, DeploymentError};
pub use error::PipelineError;
pub use pipeline::{open_evidence, MatchPipeline};
