// Path: crates/api/src/lib.rs
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

//! # Sentinel API
//!
//! Traits for the collaborators the core talks to but does not implement:
//! a content-addressed store (put/get by content hash) and a read-only ledger
//! oracle. Component crates wrap these with timeouts, wire formats and typed
//! decoding; test doubles and local backends implement them directly.

pub mod ledger;
pub mod storage;

pub use ledger::LedgerOracle;
pub use storage::ContentStore;
