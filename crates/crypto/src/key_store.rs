// Path: crates/crypto/src/key_store.rs
//! The long-lived symmetric key and its on-disk form.
//!
//! File format: a single line holding the standard-alphabet base64 encoding
//! of exactly 32 random bytes. Surrounding whitespace is ignored.

use crate::error::CryptoError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use std::io::Write;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of the symmetric key in bytes.
pub const KEY_LEN: usize = 32;

/// A 32-byte key that zeroizes on drop and never prints its contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LEN]);

impl SymmetricKey {
    /// Wraps raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Copies key bytes from a slice, which must be exactly 32 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_LEN,
                    got: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Draws a fresh key from the operating system's CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::Encryption(format!("entropy source failed: {}", e)))?;
        Ok(Self(bytes))
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(BASE64.encode(self.0))
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// Loads the key file. Absence, bad base64 or a wrong length are all errors;
/// callers treat them as fatal at startup.
pub fn load_key_file(path: &Path) -> Result<SymmetricKey, CryptoError> {
    let key_file_err = |reason: String| CryptoError::KeyFile {
        path: path.display().to_string(),
        reason,
    };

    let text = Zeroizing::new(
        std::fs::read_to_string(path).map_err(|e| key_file_err(e.to_string()))?,
    );
    let decoded = Zeroizing::new(
        BASE64
            .decode(text.trim())
            .map_err(|e| key_file_err(format!("invalid base64: {}", e)))?,
    );
    if decoded.len() != KEY_LEN {
        return Err(key_file_err(format!(
            "expected {} key bytes, found {}",
            KEY_LEN,
            decoded.len()
        )));
    }
    SymmetricKey::try_from_slice(&decoded)
}

/// Writes `key` as a new key file. Refuses to overwrite an existing file.
pub fn write_key_file(path: &Path, key: &SymmetricKey) -> Result<(), CryptoError> {
    let key_file_err = |reason: String| CryptoError::KeyFile {
        path: path.display().to_string(),
        reason,
    };

    let mut opts = std::fs::OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path).map_err(|e| key_file_err(e.to_string()))?;
    let encoded = key.to_base64();
    file.write_all(encoded.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .and_then(|_| file.sync_all())
        .map_err(|e| key_file_err(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aes_key.txt");
        let key = SymmetricKey::generate().unwrap();

        write_key_file(&path, &key).unwrap();
        let loaded = load_key_file(&path).unwrap();
        assert_eq!(loaded.as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aes_key.txt");
        write_key_file(&path, &SymmetricKey::from_bytes([1; KEY_LEN])).unwrap();

        let err = write_key_file(&path, &SymmetricKey::from_bytes([2; KEY_LEN])).unwrap_err();
        assert!(matches!(err, CryptoError::KeyFile { .. }));
        assert_eq!(load_key_file(&path).unwrap().as_bytes(), &[1; KEY_LEN]);
    }

    #[test]
    fn test_load_tolerates_surrounding_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aes_key.txt");
        std::fs::write(&path, format!("  {}\r\n", BASE64.encode([7u8; KEY_LEN]))).unwrap();
        assert_eq!(load_key_file(&path).unwrap().as_bytes(), &[7; KEY_LEN]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_key_file(Path::new("/nonexistent/aes_key.txt")).unwrap_err();
        assert!(matches!(err, CryptoError::KeyFile { .. }));
    }

    #[test]
    fn test_wrong_length_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        std::fs::write(&path, BASE64.encode([0u8; 16])).unwrap();

        match load_key_file(&path).unwrap_err() {
            CryptoError::KeyFile { reason, .. } => assert!(reason.contains("found 16")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_not_base64_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.txt");
        std::fs::write(&path, "not base64 at all!").unwrap();
        assert!(load_key_file(&path).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = SymmetricKey::from_bytes([0xAA; KEY_LEN]);
        let rendered = format!("{:?}", key);
        assert_eq!(rendered, "SymmetricKey(<redacted>)");
        assert!(!rendered.contains("aa"));
    }
}
