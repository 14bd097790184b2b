//! Collaborators that fail or stall on demand.
//!
//! Each double counts the calls it receives so tests can assert that a
//! pipeline short-circuited before reaching it.

use async_trait::async_trait;
use sentinel_api::{ContentStore, LedgerOracle};
use sentinel_types::error::{LedgerError, StoreError};
use sentinel_types::ContentAddress;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A content store whose transport is down.
#[derive(Debug, Default)]
pub struct UnavailableStore {
    calls: AtomicUsize,
}

impl UnavailableStore {
    /// Creates a store that rejects every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many `put`/`get` calls were attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for UnavailableStore {
    async fn put(&self, _bytes: &[u8]) -> Result<ContentAddress, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _address: &ContentAddress) -> Result<Vec<u8>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

/// A content store that never answers within a reasonable time.
#[derive(Debug)]
pub struct SlowStore {
    delay: Duration,
}

impl SlowStore {
    /// Creates a store that sleeps for `delay` before answering.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ContentStore for SlowStore {
    async fn put(&self, _bytes: &[u8]) -> Result<ContentAddress, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(ContentAddress::new("late"))
    }

    async fn get(&self, address: &ContentAddress) -> Result<Vec<u8>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Err(StoreError::NotFound(address.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "slow"
    }
}

/// A ledger node that refuses connections.
#[derive(Debug, Default)]
pub struct UnavailableOracle {
    calls: AtomicUsize,
}

impl UnavailableOracle {
    /// Creates an oracle that rejects every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many view calls were attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerOracle for UnavailableOracle {
    async fn call(&self, _calldata: &[u8]) -> Result<Vec<u8>, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LedgerError::Unavailable("connection refused".into()))
    }
}

/// A ledger node that stalls, then returns `response`.
#[derive(Debug)]
pub struct SlowOracle {
    delay: Duration,
    response: Vec<u8>,
}

impl SlowOracle {
    /// Creates an oracle that sleeps for `delay` before answering.
    pub fn new(delay: Duration, response: Vec<u8>) -> Self {
        Self { delay, response }
    }
}

#[async_trait]
impl LedgerOracle for SlowOracle {
    async fn call(&self, _calldata: &[u8]) -> Result<Vec<u8>, LedgerError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.response.clone())
    }
}

/// Returns the raw bytes `response` for every call and counts them.
#[derive(Debug, Default)]
pub struct FixedOracle {
    response: Vec<u8>,
    calls: AtomicUsize,
}

impl FixedOracle {
    /// Creates an oracle that always answers with `response`.
    pub fn new(response: Vec<u8>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many view calls were made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerOracle for FixedOracle {
    async fn call(&self, _calldata: &[u8]) -> Result<Vec<u8>, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}
