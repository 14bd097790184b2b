// Path: crates/storage/src/evidence.rs
//! The evidence store used by the match pipeline.

use crate::metrics::metrics;
use crate::wire;
use sentinel_api::ContentStore;
use sentinel_types::error::StoreError;
use sentinel_types::{ContentAddress, EncryptedBlob, MappingRecord, Signature};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Wraps a [`ContentStore`] with the evidence/mapping wire format and a
/// per-call timeout. Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct EvidenceStore {
    backend: Arc<dyn ContentStore>,
    timeout: Duration,
}

impl std::fmt::Debug for EvidenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceStore")
            .field("backend", &self.backend.backend_name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EvidenceStore {
    /// Creates a store over `backend`; every backend call is bounded by `timeout`.
    pub fn new(backend: Arc<dyn ContentStore>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// The backend's name, for logs.
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Stores raw bytes. Identical bytes always yield the same address.
    pub async fn put(&self, bytes: &[u8]) -> Result<ContentAddress, StoreError> {
        let address = self.bounded("put", self.backend.put(bytes)).await?;
        metrics().inc_bytes_stored(self.backend_name(), bytes.len() as u64);
        Ok(address)
    }

    /// Fetches raw bytes.
    pub async fn get(&self, address: &ContentAddress) -> Result<Vec<u8>, StoreError> {
        self.bounded("get", self.backend.get(address)).await
    }

    /// Serializes and stores an encrypted blob, returning its address.
    pub async fn store_evidence(
        &self,
        signature: &Signature,
        blob: &EncryptedBlob,
    ) -> Result<ContentAddress, StoreError> {
        let bytes = wire::encode_evidence(blob)?;
        let address = self.put(&bytes).await?;
        tracing::info!(
            target: "store",
            backend = self.backend_name(),
            lsh = %signature,
            %address,
            "stored evidence"
        );
        Ok(address)
    }

    /// Stores the signature → evidence mapping, returning the mapping's own address.
    pub async fn store_mapping(
        &self,
        signature: &Signature,
        evidence: &ContentAddress,
    ) -> Result<ContentAddress, StoreError> {
        let bytes = wire::encode_mapping(signature, evidence)?;
        let address = self.put(&bytes).await?;
        tracing::info!(
            target: "store",
            backend = self.backend_name(),
            lsh = %signature,
            %evidence,
            mapping = %address,
            "stored mapping"
        );
        Ok(address)
    }

    /// Reads back an encrypted blob. Does not decrypt it.
    pub async fn load_evidence(&self, address: &ContentAddress) -> Result<EncryptedBlob, StoreError> {
        let bytes = self.get(address).await?;
        wire::decode_evidence(&bytes)
    }

    /// Reads back a mapping record.
    pub async fn load_mapping(&self, address: &ContentAddress) -> Result<MappingRecord, StoreError> {
        let bytes = self.get(address).await?;
        wire::decode_mapping(&bytes)
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        let start = Instant::now();
        let result = match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Unavailable(format!(
                "{} on {} timed out after {:?}",
                op,
                self.backend_name(),
                self.timeout
            ))),
        };
        metrics().observe_store_latency(op, start.elapsed().as_secs_f64());
        if let Err(e) = &result {
            tracing::warn!(target: "store", backend = self.backend_name(), op, error = %e, "store call failed");
        }
        result
    }
}
