// Path: crates/storage/src/wire.rs
//! JSON records as they are submitted to the content-addressed store.
//!
//! Field order is fixed by the struct definitions, so equal records always
//! serialize to equal bytes and therefore to equal addresses.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sentinel_types::app::{IV_LEN, MAC_LEN};
use sentinel_types::error::StoreError;
use sentinel_types::{ContentAddress, EncryptedBlob, MappingRecord, Signature};
use serde::{Deserialize, Serialize};

/// `{"iv": b64, "ciphertext": b64, "mac": b64}`
#[derive(Debug, Serialize, Deserialize)]
struct EvidenceEnvelope {
    iv: String,
    ciphertext: String,
    mac: String,
}

/// `{"lsh": bits, "cid": address}`
#[derive(Debug, Serialize, Deserialize)]
struct MappingEnvelope {
    lsh: String,
    cid: String,
}

/// Serializes an encrypted blob.
pub fn encode_evidence(blob: &EncryptedBlob) -> Result<Vec<u8>, StoreError> {
    let envelope = EvidenceEnvelope {
        iv: BASE64.encode(blob.iv),
        ciphertext: BASE64.encode(&blob.ciphertext),
        mac: BASE64.encode(blob.mac),
    };
    serde_json::to_vec(&envelope).map_err(|e| StoreError::Encode(e.to_string()))
}

/// Parses an encrypted blob. Records without a MAC are rejected.
pub fn decode_evidence(bytes: &[u8]) -> Result<EncryptedBlob, StoreError> {
    let envelope: EvidenceEnvelope =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(EncryptedBlob {
        iv: decode_fixed::<IV_LEN>("iv", &envelope.iv)?,
        ciphertext: decode_b64("ciphertext", &envelope.ciphertext)?,
        mac: decode_fixed::<MAC_LEN>("mac", &envelope.mac)?,
    })
}

/// Serializes a signature → evidence mapping.
pub fn encode_mapping(
    signature: &Signature,
    address: &ContentAddress,
) -> Result<Vec<u8>, StoreError> {
    let envelope = MappingEnvelope {
        lsh: signature.as_str().to_string(),
        cid: address.as_str().to_string(),
    };
    serde_json::to_vec(&envelope).map_err(|e| StoreError::Encode(e.to_string()))
}

/// Parses a mapping record, validating the signature bits.
pub fn decode_mapping(bytes: &[u8]) -> Result<MappingRecord, StoreError> {
    let envelope: MappingEnvelope =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))?;
    let signature =
        Signature::from_bits(envelope.lsh).map_err(|e| StoreError::Decode(e.to_string()))?;
    if envelope.cid.is_empty() {
        return Err(StoreError::Decode("mapping has an empty cid".into()));
    }
    Ok(MappingRecord {
        signature,
        address: ContentAddress::new(envelope.cid),
    })
}

fn decode_b64(field: &str, value: &str) -> Result<Vec<u8>, StoreError> {
    BASE64
        .decode(value)
        .map_err(|e| StoreError::Decode(format!("{}: {}", field, e)))
}

fn decode_fixed<const N: usize>(field: &str, value: &str) -> Result<[u8; N], StoreError> {
    let bytes = decode_b64(field, value)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| StoreError::Decode(format!("{}: expected {} bytes, got {}", field, N, len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> EncryptedBlob {
        EncryptedBlob {
            iv: [1; IV_LEN],
            ciphertext: vec![2; 32],
            mac: [3; MAC_LEN],
        }
    }

    #[test]
    fn evidence_json_has_fixed_keys_in_order() {
        let json = String::from_utf8(encode_evidence(&blob()).unwrap()).unwrap();
        assert!(json.starts_with(r#"{"iv":"AQEBAQEBAQEBAQEBAQEBAQ==","ciphertext":""#));
        assert!(json.contains(r#","mac":""#));
        assert_eq!(decode_evidence(json.as_bytes()).unwrap(), blob());
    }

    #[test]
    fn equal_blobs_encode_identically() {
        assert_eq!(
            encode_evidence(&blob()).unwrap(),
            encode_evidence(&blob()).unwrap()
        );
    }

    #[test]
    fn untagged_or_malformed_evidence_is_rejected() {
        let legacy = br#"{"iv":"AQEBAQEBAQEBAQEBAQEBAQ==","ciphertext":"AgI="}"#;
        assert!(matches!(decode_evidence(legacy), Err(StoreError::Decode(_))));

        let short_iv = br#"{"iv":"AQE=","ciphertext":"AgI=","mac":"AwM="}"#;
        assert!(matches!(
            decode_evidence(short_iv),
            Err(StoreError::Decode(_))
        ));

        assert!(decode_evidence(b"not json").is_err());
    }

    #[test]
    fn mapping_json_uses_lsh_and_cid() {
        let sig = Signature::from_bits("1011").unwrap();
        let addr = ContentAddress::new("abc123");
        let bytes = encode_mapping(&sig, &addr).unwrap();
        assert_eq!(bytes, br#"{"lsh":"1011","cid":"abc123"}"#);

        let record = decode_mapping(&bytes).unwrap();
        assert_eq!(record.signature, sig);
        assert_eq!(record.address, addr);
    }

    #[test]
    fn mapping_with_bad_bits_is_rejected() {
        assert!(matches!(
            decode_mapping(br#"{"lsh":"10x1","cid":"abc"}"#),
            Err(StoreError::Decode(_))
        ));
        assert!(decode_mapping(br#"{"lsh":"101","cid":""}"#).is_err());
    }
}
