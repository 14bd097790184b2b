// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Sentinel Types
//!
//! The foundational library for sentinel, containing the data model shared by
//! the signer, the cipher, the evidence store, the ledger client and the match
//! pipeline, together with the error taxonomy and configuration objects.
//!
//! ## Architectural Role
//!
//! `sentinel-types` has minimal dependencies and is a dependency of every other
//! crate in the workspace. Keeping `Embedding`, `Signature`, `ContentAddress`,
//! `ProfileRecord` and the error enums here prevents circular dependencies
//! between the component crates.

/// Biometric, evidence and ledger data structures.
pub mod app;
/// Deployment configuration (`sentinel.toml`).
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;

pub use app::{
    ContentAddress, Embedding, EncryptedBlob, EvidencePayload, EvidenceReceipt, GeoPoint,
    KeyPacking, LedgerKey, MappingRecord, MatchReport, Metadata, ProfileRecord, Signature,
    Verdict,
};
