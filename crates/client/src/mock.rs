// Path: crates/client/src/mock.rs
//! An in-process ledger that speaks the same ABI as the deployed contract.

use crate::abi::{decode_query_call, encode_profile_output};
use crate::key::pack_signature;
use async_trait::async_trait;
use parking_lot::RwLock;
use sentinel_api::LedgerOracle;
use sentinel_types::error::LedgerError;
use sentinel_types::{ContentAddress, KeyPacking, LedgerKey, ProfileRecord, Signature};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A profile registry held in memory.
///
/// Unknown keys answer with the all-default tuple, as a Solidity mapping does.
#[derive(Debug, Default)]
pub struct MockLedger {
    packing: KeyPacking,
    profiles: RwLock<HashMap<LedgerKey, ProfileRecord>>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MockLedger {
    /// Creates an empty registry keyed with `packing`.
    pub fn new(packing: KeyPacking) -> Self {
        Self {
            packing,
            ..Self::default()
        }
    }

    /// Registers (or replaces) the profile for `signature`.
    pub fn register(
        &self,
        signature: &Signature,
        person_id: impl Into<String>,
        evidence_address: ContentAddress,
        timestamp: u64,
        active: bool,
    ) -> Result<(), LedgerError> {
        let key = pack_signature(signature, self.packing)?;
        self.profiles.write().insert(
            key,
            ProfileRecord {
                active,
                person_id: person_id.into(),
                evidence_address,
                timestamp,
            },
        );
        Ok(())
    }

    /// Flips the `active` flag of an existing profile. Returns `false` if none exists.
    pub fn set_active(&self, signature: &Signature, active: bool) -> Result<bool, LedgerError> {
        let key = pack_signature(signature, self.packing)?;
        Ok(match self.profiles.write().get_mut(&key) {
            Some(record) => {
                record.active = active;
                true
            }
            None => false,
        })
    }

    /// Makes every subsequent call fail as a refused connection would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// How many view calls have been made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerOracle for MockLedger {
    async fn call(&self, calldata: &[u8]) -> Result<Vec<u8>, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("mock ledger is offline".into()));
        }
        let key = decode_query_call(calldata)?;
        let record = self
            .profiles
            .read()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| ProfileRecord {
                active: false,
                person_id: String::new(),
                evidence_address: ContentAddress::new(""),
                timestamp: 0,
            });
        Ok(encode_profile_output(&record))
    }
}
