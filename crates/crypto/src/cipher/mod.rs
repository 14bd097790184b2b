// Path: crates/crypto/src/cipher/mod.rs
//! AES-256-CBC with encrypt-then-MAC.
//!
//! The cipher key is the loaded 32-byte key. A separate MAC key is derived
//! from it with HMAC-SHA256 under a fixed label, and the tag covers a domain
//! label, the IV and the ciphertext. `decrypt` checks the tag before touching
//! the cipher, so a flipped IV or ciphertext byte is rejected outright instead
//! of decrypting to corrupted plaintext.

use crate::algorithms::hash::hmac_sha256;
use crate::error::CryptoError;
use crate::key_store::SymmetricKey;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sentinel_types::app::IV_LEN;
use sentinel_types::EncryptedBlob;
use sha2::Sha256;
use zeroize::Zeroizing;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const BLOCK_LEN: usize = 16;
const MAC_KEY_LABEL: &[u8] = b"sentinel/mac-key/v1";
const TAG_LABEL: &[u8] = b"sentinel/evidence/v1";

fn mac_key(key: &SymmetricKey) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    hmac_sha256(key.as_bytes(), &[MAC_KEY_LABEL]).map(Zeroizing::new)
}

/// Encrypts `plaintext` under `key` with a fresh random IV.
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> Result<EncryptedBlob, CryptoError> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| CryptoError::Encryption(format!("entropy source failed: {}", e)))?;

    let ciphertext = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mac_key = mac_key(key)?;
    let mac = hmac_sha256(mac_key.as_slice(), &[TAG_LABEL, iv.as_slice(), ciphertext.as_slice()])?;

    Ok(EncryptedBlob {
        iv,
        ciphertext,
        mac,
    })
}

/// Authenticates and decrypts `blob`.
///
/// Any tag mismatch, misaligned ciphertext or bad padding yields
/// [`CryptoError::AuthenticationOrPadding`] and no plaintext.
pub fn decrypt(blob: &EncryptedBlob, key: &SymmetricKey) -> Result<Vec<u8>, CryptoError> {
    let mac_key = mac_key(key)?;
    let mut verifier = <Hmac<Sha256> as Mac>::new_from_slice(mac_key.as_slice())
        .map_err(|_| CryptoError::AuthenticationOrPadding)?;
    verifier.update(TAG_LABEL);
    verifier.update(&blob.iv);
    verifier.update(&blob.ciphertext);
    verifier
        .verify_slice(&blob.mac)
        .map_err(|_| CryptoError::AuthenticationOrPadding)?;

    if blob.ciphertext.is_empty() || blob.ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::AuthenticationOrPadding);
    }

    Aes256CbcDec::new_from_slices(key.as_bytes(), &blob.iv)
        .map_err(|_| CryptoError::AuthenticationOrPadding)?
        .decrypt_padded_vec_mut::<Pkcs7>(&blob.ciphertext)
        .map_err(|_| CryptoError::AuthenticationOrPadding)
}

#[cfg(test)]
mod tests;
