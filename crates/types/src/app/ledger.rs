// Path: crates/types/src/app/ledger.rs

use super::biometric::Signature;
use super::evidence::{ContentAddress, EvidenceReceipt};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the ledger's fixed key, matching the contract's `bytes32` parameter.
pub const LEDGER_KEY_LEN: usize = 32;

/// The 32-byte key a signature is packed into for the ledger query.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedgerKey(pub [u8; LEDGER_KEY_LEN]);

impl fmt::Debug for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerKey({})", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for LedgerKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// How a signature bit string is turned into a [`LedgerKey`].
///
/// The choice changes the effective collision space, so it is part of the
/// deployment configuration and must match whatever registered the profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPacking {
    /// Bits packed MSB-first, left-aligned in 32 bytes, zero padded. At most 256 bits.
    #[default]
    BitPacked,
    /// SHA-256 of the ASCII bit string. Any length.
    Sha256,
}

/// A profile as returned by the ledger. Owned and mutated only by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Whether the profile is currently active.
    pub active: bool,
    /// The ledger's identifier for the person.
    pub person_id: String,
    /// The evidence address the ledger stored at registration time.
    pub evidence_address: ContentAddress,
    /// Registration timestamp (seconds since the Unix epoch).
    pub timestamp: u64,
}

impl ProfileRecord {
    /// `true` for the all-default tuple a ledger mapping returns for unknown keys.
    pub fn is_vacant(&self) -> bool {
        !self.active
            && self.person_id.is_empty()
            && self.evidence_address.is_empty()
            && self.timestamp == 0
    }
}

/// The outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The signature maps to an active profile.
    ActiveMatch {
        /// The ledger's identifier for the person.
        person_id: String,
        /// Address of the evidence captured by *this* run.
        evidence_address: ContentAddress,
        /// The ledger's timestamp for the profile.
        timestamp: u64,
    },
    /// No ledger record exists for the signature.
    NoMatch,
    /// A record exists but is not active.
    ProfileInactive,
}

impl Verdict {
    /// A stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ActiveMatch { .. } => "active_match",
            Self::NoMatch => "no_match",
            Self::ProfileInactive => "profile_inactive",
        }
    }

    /// `true` only for [`Verdict::ActiveMatch`].
    pub fn is_match(&self) -> bool {
        matches!(self, Self::ActiveMatch { .. })
    }
}

/// Everything a successful pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    /// The signature computed for the embedding.
    pub signature: Signature,
    /// Where the evidence and mapping were stored.
    pub receipt: EvidenceReceipt,
    /// The ledger verdict.
    pub verdict: Verdict,
}
