//! Tests for the hyperplane signer

use super::*;
use proptest::prelude::*;
use sentinel_test_utils::fixtures::{near_duplicate, synthetic_embedding};

const D: usize = 512;
const L: usize = 64;

#[test]
fn test_generate_is_reproducible_from_seed() {
    let a = HyperplaneSet::generate(D, L, 7).unwrap();
    let b = HyperplaneSet::generate(D, L, 7).unwrap();
    let c = HyperplaneSet::generate(D, L, 8).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_eq!(a.dimension(), D);
    assert_eq!(a.bits(), L);
    assert_eq!(a.seed(), Some(7));
}

#[test]
fn test_generate_rejects_zero_sizes() {
    assert!(matches!(
        HyperplaneSet::generate(0, L, 1),
        Err(SignatureError::InvalidPlanes(_))
    ));
    assert!(matches!(
        HyperplaneSet::generate(D, 0, 1),
        Err(SignatureError::InvalidPlanes(_))
    ));
}

#[test]
fn test_scenario_a_signature_is_64_bits_and_repeatable() {
    let planes = HyperplaneSet::generate(D, L, 42).unwrap();
    let mut raw = vec![0.12, -0.03, 0.44];
    raw.extend((3..D).map(|i| ((i as f64) * 0.37).sin() * 0.5));
    let embedding = Embedding::quantize(&raw, 3).unwrap();

    let first = planes.sign(&embedding).unwrap();
    let second = sign(&embedding, &planes).unwrap();

    assert_eq!(first.len(), 64);
    assert!(first.as_str().chars().all(|c| c == '0' || c == '1'));
    assert_eq!(first, second);

    // A second process holding the same seeded planes agrees.
    let elsewhere = HyperplaneSet::generate(D, L, 42).unwrap();
    assert_eq!(elsewhere.sign(&embedding).unwrap(), first);
}

#[test]
fn test_projection_of_zero_is_a_one_bit() {
    let planes = HyperplaneSet::generate(8, 16, 3).unwrap();
    let zero = Embedding::quantize(&[0.0; 8], 3).unwrap();
    let sig = planes.sign(&zero).unwrap();
    assert_eq!(sig.as_str(), "1".repeat(16));
}

#[test]
fn test_sign_follows_projection_sign() {
    let planes = HyperplaneSet::from_planes(
        vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, -1.0]],
        None,
    )
    .unwrap();
    let e = Embedding::quantize(&[0.5, -0.25], 3).unwrap();
    // projections: 0.5, -0.25, -0.25
    assert_eq!(planes.sign(&e).unwrap().as_str(), "100");
}

#[test]
fn test_near_duplicates_have_small_hamming_distance() {
    let planes = HyperplaneSet::generate(D, L, 2024).unwrap();
    let trials = 40u64;

    let mut near_total = 0usize;
    let mut far_total = 0usize;
    for t in 0..trials {
        let base = synthetic_embedding(D, 1_000 + t);
        let noisy = near_duplicate(&base, 0.05, 5_000 + t);
        let unrelated = synthetic_embedding(D, 9_000 + t);

        let s_base = planes.sign(&base).unwrap();
        near_total += s_base.hamming_distance(&planes.sign(&noisy).unwrap()).unwrap();
        far_total += s_base
            .hamming_distance(&planes.sign(&unrelated).unwrap())
            .unwrap();
    }

    let near_mean = near_total as f64 / trials as f64;
    let far_mean = far_total as f64 / trials as f64;
    assert!(near_mean < 6.0, "near-duplicate mean distance {}", near_mean);
    assert!(far_mean > 24.0, "unrelated mean distance {}", far_mean);
}

#[test]
fn test_from_planes_rejects_bad_matrices() {
    assert!(HyperplaneSet::from_planes(vec![], None).is_err());
    assert!(HyperplaneSet::from_planes(vec![vec![]], None).is_err());
    assert!(matches!(
        HyperplaneSet::from_planes(vec![vec![1.0, 2.0], vec![1.0]], None),
        Err(SignatureError::InvalidPlanes(_))
    ));
    assert!(matches!(
        HyperplaneSet::from_planes(vec![vec![1.0, f64::NAN]], None),
        Err(SignatureError::InvalidPlanes(_))
    ));
}

#[test]
fn test_save_and_load_preserve_fingerprint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planes.json");
    let planes = HyperplaneSet::generate(D, L, 99).unwrap();

    planes.save(&path).unwrap();
    let loaded = HyperplaneSet::load(&path).unwrap();

    assert_eq!(loaded.fingerprint_hex(), planes.fingerprint_hex());
    assert_eq!(loaded.seed(), Some(99));

    let e = synthetic_embedding(D, 1);
    assert_eq!(loaded.sign(&e).unwrap(), planes.sign(&e).unwrap());
}

#[test]
fn test_load_rejects_inconsistent_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planes.json");
    std::fs::write(
        &path,
        r#"{"dimension":3,"bits":1,"planes":[[1.0,2.0],[3.0,4.0]]}"#,
    )
    .unwrap();

    assert!(matches!(
        HyperplaneSet::load(&path),
        Err(SignatureError::PlaneFile(_))
    ));
}

#[test]
fn test_load_missing_file() {
    assert!(matches!(
        HyperplaneSet::load(Path::new("/nonexistent/planes.json")),
        Err(SignatureError::PlaneFile(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_wrong_dimension_always_fails(len in 1usize..64) {
        prop_assume!(len != 16);
        let planes = HyperplaneSet::generate(16, 8, 11).unwrap();
        let e = Embedding::quantize(&vec![0.5; len], 3).unwrap();
        prop_assert_eq!(
            planes.sign(&e),
            Err(SignatureError::DimensionMismatch { expected: 16, got: len })
        );
    }

    #[test]
    fn prop_sign_is_deterministic(values in proptest::collection::vec(-1.0f64..1.0, 16)) {
        let planes = HyperplaneSet::generate(16, 8, 11).unwrap();
        let e = Embedding::quantize(&values, 3).unwrap();
        let s = planes.sign(&e).unwrap();
        prop_assert_eq!(s.len(), 8);
        prop_assert_eq!(planes.sign(&e).unwrap(), s);
    }
}
