//! Test fixtures for reproducible tests

use crate::randomness::TestRng;
use sentinel_types::app::DEFAULT_PRECISION;
use sentinel_types::{Embedding, GeoPoint, Metadata};
use std::collections::BTreeMap;

/// A quantized embedding of `dimension` N(0, 1) components, reproducible
/// from `seed`.
pub fn synthetic_embedding(dimension: usize, seed: u64) -> Embedding {
    let raw = TestRng::new(seed).standard_normal(dimension.max(1));
    quantized(&raw)
}

/// `base` plus independent N(0, `sigma`) noise on every component, as a
/// second capture of the same face would look.
pub fn near_duplicate(base: &Embedding, sigma: f64, seed: u64) -> Embedding {
    let noise = TestRng::new(seed).normal(base.len(), sigma);
    let raw: Vec<f64> = base
        .values()
        .iter()
        .zip(noise)
        .map(|(v, n)| v + n)
        .collect();
    quantized(&raw)
}

/// Capture metadata with a fixed timestamp, a GPS fix and one extra field.
pub fn sample_metadata() -> Metadata {
    let mut extra = BTreeMap::new();
    extra.insert("camera".to_string(), serde_json::json!("gate-3"));
    Metadata {
        timestamp: "2025-03-14T09:26:53Z".to_string(),
        gps: Some(GeoPoint {
            lat: -16.6869,
            lng: -49.2648,
        }),
        extra,
    }
}

fn quantized(raw: &[f64]) -> Embedding {
    // Draws are finite and non-empty, so quantization only fails if that breaks.
    match Embedding::quantize(raw, DEFAULT_PRECISION) {
        Ok(e) => e,
        Err(e) => unreachable!("fixture embedding rejected: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_reproducible() {
        assert_eq!(synthetic_embedding(16, 3), synthetic_embedding(16, 3));
        assert_ne!(synthetic_embedding(16, 3), synthetic_embedding(16, 4));
    }

    #[test]
    fn near_duplicate_stays_close() {
        let base = synthetic_embedding(64, 1);
        let near = near_duplicate(&base, 0.01, 2);
        assert_eq!(near.len(), 64);
        let max_delta = base
            .values()
            .iter()
            .zip(near.values())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(max_delta < 0.1);
    }
}
