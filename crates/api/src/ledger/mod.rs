// Path: crates/api/src/ledger/mod.rs

//! API for the read-only ledger oracle.

use async_trait::async_trait;
use sentinel_types::error::LedgerError;

/// A read-only view-call endpoint on the profile registry contract.
///
/// The oracle carries raw ABI bytes: the caller supplies encoded calldata
/// (selector + arguments) and receives the encoded return data. Typed
/// encoding and validation live in the ledger client, at the boundary.
#[async_trait]
pub trait LedgerOracle: Send + Sync {
    /// Executes a view call and returns the raw return data.
    ///
    /// Connection or transport failures map to [`LedgerError::Unavailable`].
    async fn call(&self, calldata: &[u8]) -> Result<Vec<u8>, LedgerError>;
}
