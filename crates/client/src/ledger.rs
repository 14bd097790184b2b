// Path: crates/client/src/ledger.rs
//! The ledger client used by the match pipeline.

use crate::abi::{decode_profile_output, encode_query_call};
use crate::key::pack_signature;
use sentinel_api::LedgerOracle;
use sentinel_types::error::LedgerError;
use sentinel_types::{KeyPacking, ProfileRecord, Signature};
use std::sync::Arc;
use std::time::Duration;

/// Issues profile queries against a [`LedgerOracle`].
///
/// Stateless: every call goes to the oracle, nothing is cached, and there
/// are no retries beyond what the transport does itself.
#[derive(Clone)]
pub struct LedgerClient {
    oracle: Arc<dyn LedgerOracle>,
    packing: KeyPacking,
    timeout: Duration,
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("packing", &self.packing)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl LedgerClient {
    /// Creates a client; `timeout` bounds each query.
    pub fn new(oracle: Arc<dyn LedgerOracle>, packing: KeyPacking, timeout: Duration) -> Self {
        Self {
            oracle,
            packing,
            timeout,
        }
    }

    /// The key packing this client uses.
    pub fn packing(&self) -> KeyPacking {
        self.packing
    }

    /// Looks up the profile registered under `signature`.
    ///
    /// Returns `Ok(None)` when the ledger holds no record (it answers with the
    /// all-default tuple), and `Ok(Some(_))` for any registered record, active
    /// or not.
    pub async fn query_profile(
        &self,
        signature: &Signature,
    ) -> Result<Option<ProfileRecord>, LedgerError> {
        let key = pack_signature(signature, self.packing)?;
        let calldata = encode_query_call(&key);

        let output = tokio::time::timeout(self.timeout, self.oracle.call(&calldata))
            .await
            .map_err(|_| {
                LedgerError::Unavailable(format!("profile query timed out after {:?}", self.timeout))
            })?
            .inspect_err(|e| {
                tracing::warn!(target: "ledger", lsh = %signature, error = %e, "profile query failed")
            })?;

        let record = decode_profile_output(&output)?;
        if record.is_vacant() {
            tracing::debug!(target: "ledger", lsh = %signature, "no profile registered");
            return Ok(None);
        }
        tracing::debug!(
            target: "ledger",
            lsh = %signature,
            active = record.active,
            person_id = %record.person_id,
            "profile found"
        );
        Ok(Some(record))
    }
}
