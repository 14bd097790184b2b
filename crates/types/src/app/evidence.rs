// Path: crates/types/src/app/evidence.rs

use super::biometric::{Embedding, Signature};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Length of the CBC initialisation vector in bytes.
pub const IV_LEN: usize = 16;
/// Length of the HMAC-SHA256 tag in bytes.
pub const MAC_LEN: usize = 32;

/// An opaque identifier returned by the content-addressed store.
///
/// It is a deterministic function of the exact bytes submitted; the core never
/// interprets it beyond equality.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Wraps an address string produced by a store.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Renders a 32-byte digest as a lowercase hex address.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    /// The address as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if the address is the empty string (an unset ledger field).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentAddress({})", self.0)
    }
}

/// The output of one authenticated encryption call.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    /// Fresh random IV, never reused under the same key.
    pub iv: [u8; IV_LEN],
    /// PKCS#7-padded AES-256-CBC ciphertext.
    pub ciphertext: Vec<u8>,
    /// HMAC-SHA256 over the IV and ciphertext.
    pub mac: [u8; MAC_LEN],
}

impl fmt::Debug for EncryptedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedBlob")
            .field("iv", &hex::encode(self.iv))
            .field("ciphertext_len", &self.ciphertext.len())
            .field("mac", &hex::encode(self.mac))
            .finish()
    }
}

/// Links a signature to the address of the evidence captured for it.
///
/// The mapping is itself stored as content, so substituting the evidence
/// address changes the mapping's own address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRecord {
    /// The signature the evidence was captured under.
    pub signature: Signature,
    /// Where the encrypted evidence lives.
    pub address: ContentAddress,
}

/// A GPS fix attached to a capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// Capture metadata supplied by the caller alongside the embedding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// UTC capture time, RFC 3339.
    pub timestamp: String,
    /// Where the capture happened, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GeoPoint>,
    /// Any additional caller-defined fields.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The cleartext record that is serialized, encrypted and stored per pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidencePayload {
    /// The quantized embedding.
    pub embedding: Embedding,
    /// The signature computed from it.
    pub lsh: Signature,
    /// Capture metadata.
    pub metadata: Metadata,
}

/// Where one pipeline run left its records in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceReceipt {
    /// Address of the encrypted evidence.
    pub evidence_address: ContentAddress,
    /// Address of the signature → evidence mapping.
    pub mapping_address: ContentAddress,
}
