// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions.

use crate::error::CryptoError;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use sha3::Keccak256;

type HmacSha256 = Hmac<Sha256>;

/// Create a SHA-256 hash of any type that can be referenced as bytes
pub fn sha256<T: AsRef<[u8]>>(data: T) -> [u8; 32] {
    Sha256::digest(data.as_ref()).into()
}

/// Create a Keccak-256 hash (the pre-standard SHA-3 used for contract selectors).
pub fn keccak256<T: AsRef<[u8]>>(data: T) -> [u8; 32] {
    Keccak256::digest(data.as_ref()).into()
}

/// HMAC-SHA256 over the concatenation of `parts`.
pub fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> Result<[u8; 32], CryptoError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| CryptoError::Encryption(format!("HMAC key rejected: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().into())
}
