// Path: crates/test_utils/src/lib.rs
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

//! # Sentinel Test Utilities
//!
//! Seeded embedding fixtures, collaborators that fail on demand, and
//! assertion macros shared by the test suites of every sentinel crate.

pub mod assertions;
pub mod doubles;
pub mod fixtures;
pub mod randomness;

#[doc(hidden)]
pub use sentinel_types as __types;
