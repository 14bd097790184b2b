// Path: crates/types/src/error/mod.rs
//! Core error types for sentinel.
//!
//! Every component surfaces a typed failure to its caller. The split between
//! transient infrastructure failures (`StoreError::Unavailable`,
//! `LedgerError::Unavailable`) and permanent ones is what lets the caller decide
//! whether a retry with backoff makes sense.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while quantizing a raw embedding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    /// The embedding has no components.
    #[error("Embedding is empty")]
    Empty,
    /// A component is NaN or infinite and cannot be quantized deterministically.
    #[error("Embedding component {index} is not a finite number")]
    NonFinite {
        /// The position of the offending component.
        index: usize,
    },
    /// The requested decimal precision cannot be represented in an f64.
    #[error("Unsupported quantization precision: {0} decimals")]
    InvalidPrecision(u32),
}

impl ErrorCode for EmbeddingError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "EMBEDDING_EMPTY",
            Self::NonFinite { .. } => "EMBEDDING_NON_FINITE",
            Self::InvalidPrecision(_) => "EMBEDDING_INVALID_PRECISION",
        }
    }
}

/// Errors related to hyperplane sets and LSH signatures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignatureError {
    /// The embedding length does not match the number of rows of the hyperplane set.
    #[error("Dimension mismatch. Expected {expected}, got {got}")]
    DimensionMismatch {
        /// The dimension of the hyperplane set.
        expected: usize,
        /// The length of the embedding that was submitted.
        got: usize,
    },
    /// The hyperplane set is empty, ragged, or contains non-finite coefficients.
    #[error("Invalid hyperplane set: {0}")]
    InvalidPlanes(String),
    /// A persisted hyperplane file could not be read or written.
    #[error("Hyperplane file error: {0}")]
    PlaneFile(String),
    /// A signature string contains characters other than '0' and '1', or is empty.
    #[error("Malformed signature bits: {0}")]
    MalformedBits(String),
    /// Two signatures of different lengths cannot be compared.
    #[error("Signature length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left-hand signature.
        left: usize,
        /// Length of the right-hand signature.
        right: usize,
    },
}

impl ErrorCode for SignatureError {
    fn code(&self) -> &'static str {
        match self {
            Self::DimensionMismatch { .. } => "LSH_DIMENSION_MISMATCH",
            Self::InvalidPlanes(_) => "LSH_INVALID_PLANES",
            Self::PlaneFile(_) => "LSH_PLANE_FILE_ERROR",
            Self::MalformedBits(_) => "LSH_MALFORMED_BITS",
            Self::LengthMismatch { .. } => "LSH_LENGTH_MISMATCH",
        }
    }
}

/// Errors related to the symmetric cipher and key material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Encryption could not be performed (cipher setup, entropy source).
    #[error("Encryption failed: {0}")]
    Encryption(String),
    /// The MAC did not verify or the padding was invalid after decryption.
    /// The record must be treated as tampered or corrupted.
    #[error("Authentication or padding check failed")]
    AuthenticationOrPadding,
    /// The key file is missing, unreadable, not base64, or not 32 bytes.
    #[error("Key file {path}: {reason}")]
    KeyFile {
        /// The path that was being loaded or written.
        path: String,
        /// A description of what went wrong.
        reason: String,
    },
    /// Key bytes of the wrong length were supplied.
    #[error("Invalid key length. Expected {expected}, got {got}")]
    InvalidKeyLength {
        /// The required key length in bytes.
        expected: usize,
        /// The length that was supplied.
        got: usize,
    },
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::Encryption(_) => "CRYPTO_ENCRYPTION_FAILED",
            Self::AuthenticationOrPadding => "CRYPTO_AUTHENTICATION_OR_PADDING",
            Self::KeyFile { .. } => "CRYPTO_KEY_FILE_ERROR",
            Self::InvalidKeyLength { .. } => "CRYPTO_INVALID_KEY_LENGTH",
        }
    }
}

/// Errors raised by the content-addressed evidence store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No content exists at the requested address.
    #[error("Content not found: {0}")]
    NotFound(String),
    /// The store could not be reached, failed in transport, or timed out.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// A record could not be serialized for storage.
    #[error("Encode error: {0}")]
    Encode(String),
    /// A stored record could not be deserialized or failed its integrity check.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "STORE_NOT_FOUND",
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::Encode(_) => "STORE_ENCODE_ERROR",
            Self::Decode(_) => "STORE_DECODE_ERROR",
        }
    }
}

/// Errors raised by the ledger client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger could not be reached, failed in transport, or timed out.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
    /// The signature cannot be packed into the ledger's 32-byte key format.
    #[error("Invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),
    /// The ledger returned data that does not match the profile query ABI.
    #[error("Malformed ledger response: {0}")]
    MalformedResponse(String),
}

impl ErrorCode for LedgerError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "LEDGER_UNAVAILABLE",
            Self::InvalidSignatureEncoding(_) => "LEDGER_INVALID_SIGNATURE_ENCODING",
            Self::MalformedResponse(_) => "LEDGER_MALFORMED_RESPONSE",
        }
    }
}

/// Errors raised while loading `sentinel.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// The path that was being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for `SentinelConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration parsed but is semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CONFIG_IO_ERROR",
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}
