// Path: crates/client/src/key.rs
//! Packing a signature into the ledger's `bytes32` key.
//!
//! * [`KeyPacking::BitPacked`]: bit `i` of the signature becomes bit
//!   `7 - i % 8` of byte `i / 8` (MSB first), left-aligned, zero padded.
//!   Distinct signatures of one length (at most 256) get distinct keys. Longer
//!   signatures are rejected rather than truncated.
//! * [`KeyPacking::Sha256`]: SHA-256 of the ASCII `'0'`/`'1'` string. Accepts
//!   any length at the cost of a (negligible) collision probability.

use sentinel_crypto::algorithms::hash::sha256;
use sentinel_types::config::MAX_BIT_PACKED_BITS;
use sentinel_types::error::LedgerError;
use sentinel_types::{KeyPacking, LedgerKey, Signature};

/// Derives the ledger key for `signature`.
pub fn pack_signature(signature: &Signature, packing: KeyPacking) -> Result<LedgerKey, LedgerError> {
    match packing {
        KeyPacking::BitPacked => bit_pack(signature),
        KeyPacking::Sha256 => Ok(LedgerKey(sha256(signature.as_str().as_bytes()))),
    }
}

fn bit_pack(signature: &Signature) -> Result<LedgerKey, LedgerError> {
    if signature.len() > MAX_BIT_PACKED_BITS {
        return Err(LedgerError::InvalidSignatureEncoding(format!(
            "{} bits do not fit a {}-bit key",
            signature.len(),
            MAX_BIT_PACKED_BITS
        )));
    }
    let mut key = [0u8; 32];
    for (i, bit) in signature.bits().enumerate() {
        if let (true, Some(byte)) = (bit, key.get_mut(i / 8)) {
            *byte |= 0x80 >> (i % 8);
        }
    }
    Ok(LedgerKey(key))
}
