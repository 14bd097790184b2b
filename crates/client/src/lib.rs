// Path: crates/client/src/lib.rs
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

//! # Sentinel Ledger Client
//!
//! Turns a [`Signature`](sentinel_types::Signature) into a 32-byte ledger
//! key, issues the read-only `consultarPerfil(bytes32)` view call through a
//! [`LedgerOracle`](sentinel_api::LedgerOracle), and validates the returned
//! ABI tuple at the boundary.

pub mod abi;
pub mod key;
pub mod ledger;
pub mod mock;

pub use key::pack_signature;
pub use ledger::LedgerClient;
pub use mock::MockLedger;
