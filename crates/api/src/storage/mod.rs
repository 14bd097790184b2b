// Path: crates/api/src/storage/mod.rs

//! API for a content-addressed blob store.

use async_trait::async_trait;
use sentinel_types::error::StoreError;
use sentinel_types::ContentAddress;

/// A store that addresses content by a hash of its exact bytes.
///
/// Implementations must be idempotent: submitting byte-identical content twice,
/// even across process restarts, yields the same address. Different content
/// must yield different addresses with overwhelming probability.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Stores `bytes` and returns their address.
    ///
    /// Transport failures map to [`StoreError::Unavailable`].
    async fn put(&self, bytes: &[u8]) -> Result<ContentAddress, StoreError>;

    /// Returns the bytes stored at `address`.
    ///
    /// Fails with [`StoreError::NotFound`] if nothing is stored there.
    async fn get(&self, address: &ContentAddress) -> Result<Vec<u8>, StoreError>;

    /// A short name for logs, e.g. `"memory"` or `"fs"`.
    fn backend_name(&self) -> &'static str;
}
