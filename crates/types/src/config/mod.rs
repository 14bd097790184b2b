// Path: crates/types/src/config/mod.rs

//! Deployment configuration (`sentinel.toml`).
//!
//! The key file and the hyperplane set are process-wide: they are resolved
//! once at startup from this configuration and shared read-only afterwards.

use crate::app::{KeyPacking, DEFAULT_PRECISION, MAX_PRECISION};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest signature that fits the ledger key when packed bit-for-bit.
pub const MAX_BIT_PACKED_BITS: usize = 256;

/// Location of the symmetric key file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct KeyConfig {
    /// Path to a text file holding a base64-encoded 32-byte key.
    pub path: PathBuf,
}

/// Parameters of the locality-sensitive signature.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LshConfig {
    /// Embedding dimension `D`.
    pub dimension: usize,
    /// Signature length `L` in bits.
    pub bits: usize,
    /// Seed for deterministic hyperplane generation.
    #[serde(default)]
    pub seed: Option<u64>,
    /// A persisted hyperplane matrix. Takes precedence over `seed` when present.
    #[serde(default)]
    pub planes_path: Option<PathBuf>,
    /// Hex SHA-256 fingerprint the loaded planes must match.
    #[serde(default)]
    pub expected_fingerprint: Option<String>,
    /// Decimal places embeddings are quantized to.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

/// Settings for the content-addressed evidence store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    /// Root directory of the file-backed store.
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
    /// Per-call timeout for `put`/`get`, in milliseconds.
    #[serde(default = "default_store_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_store_root() -> PathBuf {
    PathBuf::from("evidence")
}
fn default_store_timeout_ms() -> u64 {
    10_000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
            timeout_ms: default_store_timeout_ms(),
        }
    }
}

/// Settings for the ledger oracle client.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LedgerConfig {
    /// Per-query timeout, in milliseconds.
    #[serde(default = "default_ledger_timeout_ms")]
    pub timeout_ms: u64,
    /// How signatures are packed into the 32-byte ledger key.
    #[serde(default)]
    pub key_packing: KeyPacking,
}

fn default_ledger_timeout_ms() -> u64 {
    5_000
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_ledger_timeout_ms(),
            key_packing: KeyPacking::default(),
        }
    }
}

/// Top-level configuration for a sentinel deployment.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SentinelConfig {
    /// The symmetric key.
    pub key: KeyConfig,
    /// The signature parameters.
    pub lsh: LshConfig,
    /// The evidence store.
    #[serde(default)]
    pub store: StoreConfig,
    /// The ledger client.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl SentinelConfig {
    /// Reads and validates a TOML file.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Parses and validates TOML text without touching the filesystem.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lsh.dimension == 0 || self.lsh.bits == 0 {
            return Err(ConfigError::Invalid(
                "lsh.dimension and lsh.bits must be positive".into(),
            ));
        }
        if self.lsh.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "lsh.precision must be at most {}",
                MAX_PRECISION
            )));
        }
        if self.lsh.seed.is_none() && self.lsh.planes_path.is_none() {
            return Err(ConfigError::Invalid(
                "either lsh.seed or lsh.planes_path is required; per-process random planes are not comparable".into(),
            ));
        }
        if self.ledger.key_packing == KeyPacking::BitPacked && self.lsh.bits > MAX_BIT_PACKED_BITS
        {
            return Err(ConfigError::Invalid(format!(
                "bit_packed ledger keys hold at most {} bits, lsh.bits is {}",
                MAX_BIT_PACKED_BITS, self.lsh.bits
            )));
        }
        if self.store.timeout_ms == 0 || self.ledger.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeouts must be positive".into()));
        }
        Ok(())
    }

    /// The store call timeout.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store.timeout_ms)
    }

    /// The ledger query timeout.
    pub fn ledger_timeout(&self) -> Duration {
        Duration::from_millis(self.ledger.timeout_ms)
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.key.path);
        join(&mut self.store.root);
        if let Some(p) = self.lsh.planes_path.as_mut() {
            join(p);
        }
    }
}
