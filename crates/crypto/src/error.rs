// Path: crates/crypto/src/error.rs
//! Local error types for the `sentinel-crypto` crate.

// Re-export the canonical error types from the types crate.
pub use sentinel_types::error::{CryptoError, SignatureError};
