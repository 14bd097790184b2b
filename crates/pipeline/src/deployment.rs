// Path: crates/pipeline/src/deployment.rs
//! Process-wide state, resolved once at startup.

use crate::pipeline::MatchPipeline;
use sentinel_api::{ContentStore, LedgerOracle};
use sentinel_client::LedgerClient;
use sentinel_crypto::{load_key_file, HyperplaneSet, SymmetricKey};
use sentinel_storage::EvidenceStore;
use sentinel_types::config::SentinelConfig;
use sentinel_types::error::{ConfigError, CryptoError, ErrorCode, SignatureError};
use std::sync::Arc;
use thiserror::Error;

/// Fatal startup failures.
#[derive(Error, Debug)]
pub enum DeploymentError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The key file is missing or malformed.
    #[error(transparent)]
    Key(#[from] CryptoError),
    /// The plane file is unreadable or the planes could not be generated.
    #[error(transparent)]
    Planes(#[from] SignatureError),
    /// Neither a seed nor a plane file was configured.
    #[error("No hyperplane source configured: set lsh.seed or lsh.planes_path")]
    NoHyperplanes,
    /// The loaded planes do not have the configured shape.
    #[error("Hyperplanes are {got_dimension}x{got_bits}, config expects {dimension}x{bits}")]
    PlaneShape {
        /// Configured dimension.
        dimension: usize,
        /// Configured bit count.
        bits: usize,
        /// Loaded dimension.
        got_dimension: usize,
        /// Loaded bit count.
        got_bits: usize,
    },
    /// The loaded planes are not the ones this deployment pinned.
    #[error("Hyperplane fingerprint {actual} does not match expected {expected}")]
    FingerprintMismatch {
        /// The configured fingerprint.
        expected: String,
        /// The fingerprint of the loaded planes.
        actual: String,
    },
}

impl ErrorCode for DeploymentError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Key(e) => e.code(),
            Self::Planes(e) => e.code(),
            Self::NoHyperplanes => "DEPLOYMENT_NO_HYPERPLANES",
            Self::PlaneShape { .. } => "DEPLOYMENT_PLANE_SHAPE_MISMATCH",
            Self::FingerprintMismatch { .. } => "DEPLOYMENT_FINGERPRINT_MISMATCH",
        }
    }
}

/// Resolves the hyperplanes named by `config` without touching the key.
///
/// A plane file takes precedence over a seed. Shape and, when pinned,
/// fingerprint are checked against the configuration.
pub fn load_planes(config: &SentinelConfig) -> Result<HyperplaneSet, DeploymentError> {
    let lsh = &config.lsh;
    let planes = match (&lsh.planes_path, lsh.seed) {
        (Some(path), _) => HyperplaneSet::load(path)?,
        (None, Some(seed)) => HyperplaneSet::generate(lsh.dimension, lsh.bits, seed)?,
        (None, None) => return Err(DeploymentError::NoHyperplanes),
    };
    if planes.dimension() != lsh.dimension || planes.bits() != lsh.bits {
        return Err(DeploymentError::PlaneShape {
            dimension: lsh.dimension,
            bits: lsh.bits,
            got_dimension: planes.dimension(),
            got_bits: planes.bits(),
        });
    }
    if let Some(expected) = &lsh.expected_fingerprint {
        let actual = planes.fingerprint_hex();
        if !expected.trim().eq_ignore_ascii_case(&actual) {
            return Err(DeploymentError::FingerprintMismatch {
                expected: expected.clone(),
                actual,
            });
        }
    }
    Ok(planes)
}

/// The configuration, the key and the hyperplanes of one deployment.
///
/// Key and planes are immutable and shared by reference with every pipeline
/// built from this deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    config: SentinelConfig,
    key: Arc<SymmetricKey>,
    planes: Arc<HyperplaneSet>,
}

impl Deployment {
    /// Loads the key file and the hyperplanes named by `config`.
    pub fn load(config: &SentinelConfig) -> Result<Self, DeploymentError> {
        config.validate()?;
        let key = load_key_file(&config.key.path)?;
        let planes = load_planes(config)?;

        tracing::info!(
            target: "deployment",
            dimension = planes.dimension(),
            bits = planes.bits(),
            fingerprint = %planes.fingerprint_hex(),
            key_packing = ?config.ledger.key_packing,
            "deployment loaded"
        );
        Ok(Self::from_parts(config.clone(), key, planes))
    }

    /// Assembles a deployment from already-loaded parts.
    pub fn from_parts(config: SentinelConfig, key: SymmetricKey, planes: HyperplaneSet) -> Self {
        Self {
            config,
            key: Arc::new(key),
            planes: Arc::new(planes),
        }
    }

    /// The configuration this deployment was loaded from.
    pub fn config(&self) -> &SentinelConfig {
        &self.config
    }

    /// The shared hyperplanes.
    pub fn planes(&self) -> &Arc<HyperplaneSet> {
        &self.planes
    }

    /// The shared key.
    pub fn key(&self) -> &Arc<SymmetricKey> {
        &self.key
    }

    /// Builds a pipeline over the given collaborators, using the configured
    /// precision, timeouts and key packing.
    pub fn pipeline(
        &self,
        store: Arc<dyn ContentStore>,
        oracle: Arc<dyn LedgerOracle>,
    ) -> MatchPipeline {
        MatchPipeline::new(
            self.config.lsh.precision,
            Arc::clone(&self.planes),
            Arc::clone(&self.key),
            EvidenceStore::new(store, self.config.store_timeout()),
            LedgerClient::new(
                oracle,
                self.config.ledger.key_packing,
                self.config.ledger_timeout(),
            ),
        )
    }
}
