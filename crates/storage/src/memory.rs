// Path: crates/storage/src/memory.rs
//! An in-process content store keyed by hex SHA-256.

use async_trait::async_trait;
use parking_lot::RwLock;
use sentinel_api::ContentStore;
use sentinel_crypto::algorithms::hash::sha256;
use sentinel_types::error::StoreError;
use sentinel_types::ContentAddress;
use std::collections::HashMap;

/// Holds content in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    blobs: RwLock<HashMap<ContentAddress, Vec<u8>>>,
}

impl MemoryContentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct blobs held.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    /// Overwrites the bytes at `address` without re-addressing them, as a
    /// compromised or corrupting backend would.
    pub fn overwrite(&self, address: &ContentAddress, bytes: Vec<u8>) {
        self.blobs.write().insert(address.clone(), bytes);
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn put(&self, bytes: &[u8]) -> Result<ContentAddress, StoreError> {
        let address = ContentAddress::from_digest(&sha256(bytes));
        self.blobs
            .write()
            .entry(address.clone())
            .or_insert_with(|| bytes.to_vec());
        Ok(address)
    }

    async fn get(&self, address: &ContentAddress) -> Result<Vec<u8>, StoreError> {
        self.blobs
            .read()
            .get(address)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(address.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
