// Path: crates/crypto/src/algorithms/mod.rs
//! Primitive algorithms shared by the rest of the crate.

pub mod hash;
