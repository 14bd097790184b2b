// Path: crates/crypto/src/cipher/tests/mod.rs
use super::*;
use proptest::prelude::*;
use sentinel_test_utils::{assert_err, assert_ok};

fn key(byte: u8) -> SymmetricKey {
    SymmetricKey::from_bytes([byte; 32])
}

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let k = key(0x11);
    let plaintext = br#"{"embedding":[0.12,-0.03],"lsh":"10","metadata":{"timestamp":"t"}}"#;

    let blob = assert_ok!(encrypt(plaintext, &k));
    assert_eq!(blob.ciphertext.len() % BLOCK_LEN, 0);
    assert!(blob.ciphertext.len() > plaintext.len());

    let opened = assert_ok!(decrypt(&blob, &k));
    assert_eq!(opened, plaintext);
}

#[test]
fn test_empty_plaintext_is_one_padding_block() {
    let k = key(0x22);
    let blob = encrypt(b"", &k).unwrap();
    assert_eq!(blob.ciphertext.len(), BLOCK_LEN);
    assert_eq!(decrypt(&blob, &k).unwrap(), b"");
}

#[test]
fn test_same_plaintext_twice_yields_distinct_blobs() {
    let k = key(0x33);
    let a = encrypt(b"same evidence", &k).unwrap();
    let b = encrypt(b"same evidence", &k).unwrap();

    assert_ne!(a.iv, b.iv);
    assert_ne!(a.ciphertext, b.ciphertext);
    assert_ne!(a.mac, b.mac);
}

#[test]
fn test_flipping_any_iv_byte_is_detected() {
    let k = key(0x44);
    let blob = encrypt(b"tamper target, two blocks long....", &k).unwrap();

    for i in 0..IV_LEN {
        let mut tampered = blob.clone();
        if let Some(b) = tampered.iv.get_mut(i) {
            *b ^= 0x01;
        }
        assert_eq!(
            decrypt(&tampered, &k),
            Err(CryptoError::AuthenticationOrPadding),
            "iv byte {} flip went undetected",
            i
        );
    }
}

#[test]
fn test_flipping_any_ciphertext_byte_is_detected() {
    let k = key(0x55);
    let blob = encrypt(b"tamper target, two blocks long....", &k).unwrap();

    for i in 0..blob.ciphertext.len() {
        let mut tampered = blob.clone();
        if let Some(b) = tampered.ciphertext.get_mut(i) {
            *b ^= 0x80;
        }
        let err = assert_err!(decrypt(&tampered, &k));
        assert_eq!(err, CryptoError::AuthenticationOrPadding);
    }
}

#[test]
fn test_flipping_any_mac_byte_is_detected() {
    let k = key(0x66);
    let blob = encrypt(b"payload", &k).unwrap();

    for i in 0..blob.mac.len() {
        let mut tampered = blob.clone();
        if let Some(b) = tampered.mac.get_mut(i) {
            *b ^= 0xFF;
        }
        assert!(decrypt(&tampered, &k).is_err());
    }
}

#[test]
fn test_wrong_key_is_rejected() {
    let blob = encrypt(b"payload", &key(0x77)).unwrap();
    assert_eq!(
        decrypt(&blob, &key(0x78)),
        Err(CryptoError::AuthenticationOrPadding)
    );
}

#[test]
fn test_truncated_or_misaligned_ciphertext_is_rejected() {
    let k = key(0x88);
    let blob = encrypt(b"a payload spanning more than one block", &k).unwrap();

    let mut truncated = blob.clone();
    truncated.ciphertext.truncate(BLOCK_LEN);
    assert!(decrypt(&truncated, &k).is_err());

    let mut misaligned = blob.clone();
    misaligned.ciphertext.pop();
    assert!(decrypt(&misaligned, &k).is_err());

    let mut emptied = blob;
    emptied.ciphertext.clear();
    assert!(decrypt(&emptied, &k).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_decrypt_inverts_encrypt(
        payload in proptest::collection::vec(any::<u8>(), 0..512),
        key_bytes in any::<[u8; 32]>(),
    ) {
        let k = SymmetricKey::from_bytes(key_bytes);
        let blob = encrypt(&payload, &k).unwrap();
        prop_assert_eq!(decrypt(&blob, &k).unwrap(), payload);
    }
}
