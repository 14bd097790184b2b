// Path: crates/storage/src/lib.rs
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

//! Evidence persistence over a content-addressed store.
//!
//! [`EvidenceStore`] owns the JSON wire format for encrypted evidence and for
//! signature → evidence mappings, and bounds every backend call with a
//! timeout. Two [`ContentStore`](sentinel_api::ContentStore) backends are
//! provided: an in-process map and a sharded directory that survives restarts.

pub mod evidence;
pub mod fs;
pub mod memory;
pub mod metrics;
pub mod wire;

pub use evidence::EvidenceStore;
pub use fs::FsContentStore;
pub use memory::MemoryContentStore;
