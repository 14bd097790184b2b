// Path: crates/crypto/src/lsh/mod.rs
//! Random-hyperplane locality-sensitive signatures.
//!
//! A [`HyperplaneSet`] holds `L` planes of `D` standard-normal coefficients.
//! Signing projects a quantized embedding onto every plane and emits one bit
//! per plane: `1` when the projection is `>= 0`, `0` otherwise. Near-duplicate
//! embeddings land in the same half-space on most planes, so the Hamming
//! distance between signatures tracks the angle between embeddings.
//!
//! The set is fixed per deployment. It can only be built from a seed or from
//! an explicit matrix, never drawn from an unseeded RNG, and it carries a
//! SHA-256 fingerprint so processes can check they hold the same planes.

use crate::error::SignatureError;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, StandardNormal};
use sentinel_types::{Embedding, Signature};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// On-disk form of a hyperplane set.
#[derive(Serialize, Deserialize)]
struct PlaneFile {
    dimension: usize,
    bits: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    planes: Vec<Vec<f64>>,
}

/// An immutable `L x D` matrix of hyperplane normals.
#[derive(Clone, PartialEq)]
pub struct HyperplaneSet {
    dimension: usize,
    planes: Vec<Vec<f64>>,
    seed: Option<u64>,
    fingerprint: [u8; 32],
}

impl HyperplaneSet {
    /// Draws `bits` planes of `dimension` standard-normal values from a
    /// ChaCha20 stream seeded with `seed`, plane by plane.
    ///
    /// The same `(dimension, bits, seed)` yields the same set on every platform.
    pub fn generate(dimension: usize, bits: usize, seed: u64) -> Result<Self, SignatureError> {
        if dimension == 0 || bits == 0 {
            return Err(SignatureError::InvalidPlanes(format!(
                "dimension and bits must be positive (got {}x{})",
                dimension, bits
            )));
        }
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let planes: Vec<Vec<f64>> = (0..bits)
            .map(|_| {
                (0..dimension)
                    .map(|_| -> f64 { StandardNormal.sample(&mut rng) })
                    .collect()
            })
            .collect();
        let set = Self::build(dimension, planes, Some(seed));
        tracing::debug!(
            target: "lsh",
            dimension,
            bits,
            seed,
            fingerprint = %set.fingerprint_hex(),
            "generated hyperplane set"
        );
        Ok(set)
    }

    /// Wraps an explicit matrix of `L` planes, each of length `D`.
    ///
    /// Fails on an empty matrix, ragged rows or non-finite coefficients.
    pub fn from_planes(planes: Vec<Vec<f64>>, seed: Option<u64>) -> Result<Self, SignatureError> {
        let dimension = match planes.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                return Err(SignatureError::InvalidPlanes(
                    "hyperplane set is empty".into(),
                ))
            }
        };
        for (i, plane) in planes.iter().enumerate() {
            if plane.len() != dimension {
                return Err(SignatureError::InvalidPlanes(format!(
                    "plane {} has {} coefficients, expected {}",
                    i,
                    plane.len(),
                    dimension
                )));
            }
            if plane.iter().any(|c| !c.is_finite()) {
                return Err(SignatureError::InvalidPlanes(format!(
                    "plane {} contains a non-finite coefficient",
                    i
                )));
            }
        }
        Ok(Self::build(dimension, planes, seed))
    }

    /// Reads a plane file written by [`HyperplaneSet::save`].
    pub fn load(path: &Path) -> Result<Self, SignatureError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SignatureError::PlaneFile(format!("{}: {}", path.display(), e)))?;
        let file: PlaneFile = serde_json::from_str(&text)
            .map_err(|e| SignatureError::PlaneFile(format!("{}: {}", path.display(), e)))?;
        let set = Self::from_planes(file.planes, file.seed)?;
        if set.dimension != file.dimension || set.bits() != file.bits {
            return Err(SignatureError::PlaneFile(format!(
                "{}: header says {}x{}, matrix is {}x{}",
                path.display(),
                file.dimension,
                file.bits,
                set.dimension,
                set.bits()
            )));
        }
        tracing::info!(
            target: "lsh",
            path = %path.display(),
            dimension = set.dimension,
            bits = set.bits(),
            fingerprint = %set.fingerprint_hex(),
            "loaded hyperplane set"
        );
        Ok(set)
    }

    /// Writes the set as JSON. Coefficients round-trip exactly, so the
    /// fingerprint of the reloaded set is unchanged.
    pub fn save(&self, path: &Path) -> Result<(), SignatureError> {
        let file = PlaneFile {
            dimension: self.dimension,
            bits: self.bits(),
            seed: self.seed,
            planes: self.planes.clone(),
        };
        let json = serde_json::to_vec(&file)
            .map_err(|e| SignatureError::PlaneFile(format!("encode: {}", e)))?;
        std::fs::write(path, json)
            .map_err(|e| SignatureError::PlaneFile(format!("{}: {}", path.display(), e)))
    }

    /// The embedding dimension `D` this set accepts.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The signature length `L`.
    pub fn bits(&self) -> usize {
        self.planes.len()
    }

    /// The seed the set was generated from, if it was.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// SHA-256 over the dimension, the bit count and every coefficient.
    pub fn fingerprint(&self) -> &[u8; 32] {
        &self.fingerprint
    }

    /// The fingerprint as lowercase hex.
    pub fn fingerprint_hex(&self) -> String {
        hex::encode(self.fingerprint)
    }

    /// Computes the signature of `embedding`. Pure; safe to call concurrently.
    pub fn sign(&self, embedding: &Embedding) -> Result<Signature, SignatureError> {
        if embedding.len() != self.dimension {
            return Err(SignatureError::DimensionMismatch {
                expected: self.dimension,
                got: embedding.len(),
            });
        }
        let values = embedding.values();
        Signature::from_bools(self.planes.iter().map(|plane| {
            let projection: f64 = plane.iter().zip(values).map(|(p, v)| p * v).sum();
            projection >= 0.0
        }))
    }

    fn build(dimension: usize, planes: Vec<Vec<f64>>, seed: Option<u64>) -> Self {
        let fingerprint = fingerprint_of(dimension, &planes);
        Self {
            dimension,
            planes,
            seed,
            fingerprint,
        }
    }
}

impl std::fmt::Debug for HyperplaneSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperplaneSet")
            .field("dimension", &self.dimension)
            .field("bits", &self.bits())
            .field("seed", &self.seed)
            .field("fingerprint", &self.fingerprint_hex())
            .finish()
    }
}

fn fingerprint_of(dimension: usize, planes: &[Vec<f64>]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update((dimension as u64).to_le_bytes());
    hasher.update((planes.len() as u64).to_le_bytes());
    for c in planes.iter().flatten() {
        hasher.update(c.to_le_bytes());
    }
    hasher.finalize().into()
}

/// Free-function form of [`HyperplaneSet::sign`].
pub fn sign(embedding: &Embedding, planes: &HyperplaneSet) -> Result<Signature, SignatureError> {
    planes.sign(embedding)
}

#[cfg(test)]
mod tests;
