// Path: crates/types/src/app/mod.rs
//! Core application-level data structures.

/// Embeddings and LSH signatures.
pub mod biometric;
/// Encrypted evidence records and their content addresses.
pub mod evidence;
/// Ledger keys, profile records and match verdicts.
pub mod ledger;

pub use biometric::{Embedding, Signature, DEFAULT_PRECISION, MAX_PRECISION};
pub use evidence::{
    ContentAddress, EncryptedBlob, EvidencePayload, EvidenceReceipt, GeoPoint, MappingRecord,
    Metadata, IV_LEN, MAC_LEN,
};
pub use ledger::{KeyPacking, LedgerKey, MatchReport, ProfileRecord, Verdict, LEDGER_KEY_LEN};
