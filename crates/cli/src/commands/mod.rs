// Path: crates/cli/src/commands/mod.rs

pub mod config;
pub mod evidence;
pub mod keys;
pub mod planes;
pub mod sign;
