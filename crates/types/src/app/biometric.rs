// Path: crates/types/src/app/biometric.rs

use crate::error::{EmbeddingError, SignatureError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The default number of decimal places an embedding is rounded to.
pub const DEFAULT_PRECISION: u32 = 3;
/// The largest precision that still round-trips through an `f64`.
pub const MAX_PRECISION: u32 = 15;

/// A face embedding quantized to a fixed decimal precision.
///
/// Quantization happens once, at construction, so that numerically equal
/// real-world embeddings produce bit-identical inputs for the signer and the
/// evidence serializer. The vector is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Embedding {
    values: Vec<f64>,
}

impl Embedding {
    /// Rounds every component of `raw` to `decimals` places.
    ///
    /// Negative zero is normalised to `0.0` so both render identically in JSON.
    pub fn quantize(raw: &[f64], decimals: u32) -> Result<Self, EmbeddingError> {
        if decimals > MAX_PRECISION {
            return Err(EmbeddingError::InvalidPrecision(decimals));
        }
        if raw.is_empty() {
            return Err(EmbeddingError::Empty);
        }
        let scale = 10f64.powi(decimals as i32);
        let mut values = Vec::with_capacity(raw.len());
        for (index, &x) in raw.iter().enumerate() {
            let q = (x * scale).round() / scale;
            if !x.is_finite() || !q.is_finite() {
                return Err(EmbeddingError::NonFinite { index });
            }
            values.push(if q == 0.0 { 0.0 } else { q });
        }
        Ok(Self { values })
    }

    /// Wraps values that were already quantized (e.g. read back from evidence).
    ///
    /// No rounding is applied here; the match pipeline re-quantizes its input
    /// to the deployment's precision.
    pub fn from_quantized(values: Vec<f64>) -> Result<Self, EmbeddingError> {
        if values.is_empty() {
            return Err(EmbeddingError::Empty);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(EmbeddingError::NonFinite { index });
        }
        Ok(Self { values })
    }

    /// The quantized components.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The embedding dimension `D`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; an `Embedding` cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Vec<f64>> for Embedding {
    type Error = EmbeddingError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_quantized(values)
    }
}

impl From<Embedding> for Vec<f64> {
    fn from(e: Embedding) -> Self {
        e.values
    }
}

/// A locality-sensitive signature: one bit per hyperplane, rendered as `'0'`/`'1'`.
///
/// Used verbatim as the lookup key of the evidence mapping and, once packed,
/// as the ledger key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature(String);

impl Signature {
    /// Parses a bit string. Fails on empty input or any character other than `0`/`1`.
    pub fn from_bits(bits: impl Into<String>) -> Result<Self, SignatureError> {
        let bits = bits.into();
        if bits.is_empty() {
            return Err(SignatureError::MalformedBits("empty signature".into()));
        }
        if let Some((pos, c)) = bits.char_indices().find(|(_, c)| *c != '0' && *c != '1') {
            return Err(SignatureError::MalformedBits(format!(
                "unexpected {:?} at position {}",
                c, pos
            )));
        }
        Ok(Self(bits))
    }

    /// Builds a signature from sign bits, in hyperplane order.
    pub fn from_bools<I: IntoIterator<Item = bool>>(bits: I) -> Result<Self, SignatureError> {
        let s: String = bits
            .into_iter()
            .map(|b| if b { '1' } else { '0' })
            .collect();
        Self::from_bits(s)
    }

    /// The signature as a bit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number of bits `L`.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a `Signature` cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the bits in hyperplane order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }

    /// Number of positions at which the two signatures differ.
    pub fn hamming_distance(&self, other: &Signature) -> Result<usize, SignatureError> {
        if self.len() != other.len() {
            return Err(SignatureError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(self.bits().zip(other.bits()).filter(|(a, b)| a != b).count())
    }
}

impl TryFrom<String> for Signature {
    type Error = SignatureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_bits(s)
    }
}

impl From<Signature> for String {
    fn from(s: Signature) -> Self {
        s.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.0)
    }
}
