// Path: crates/crypto/src/lib.rs
//! # Sentinel Crypto Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free code. Panics are disallowed in non-test code to promote robust
//! error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # Sentinel Cryptography
//!
//! The deterministic and the secret-bearing halves of the core:
//!
//! *   **Signatures:** random-hyperplane LSH over quantized embeddings
//!     ([`lsh::HyperplaneSet`]), fixed per deployment.
//! *   **Confidentiality:** AES-256-CBC with an HMAC-SHA256 tag over IV and
//!     ciphertext ([`cipher`]).
//! *   **Key material:** the base64 key file and its zeroizing in-memory form
//!     ([`key_store::SymmetricKey`]).

pub mod algorithms;
pub mod cipher;
pub mod error;
pub mod key_store;
pub mod lsh;

pub use cipher::{decrypt, encrypt};
pub use key_store::{load_key_file, write_key_file, SymmetricKey, KEY_LEN};
pub use lsh::{sign, HyperplaneSet};
