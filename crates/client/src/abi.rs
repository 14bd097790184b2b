// Path: crates/client/src/abi.rs
//! Solidity ABI for `consultarPerfil(bytes32) returns (bool, string, string, uint256)`.
//!
//! Return data layout (32-byte words):
//!
//! ```text
//! 0x00  bool            active
//! 0x20  offset          person_id
//! 0x40  offset          evidence_address
//! 0x60  uint256         timestamp
//! ...   len, bytes...   each string, right-padded to a word boundary
//! ```

use sentinel_crypto::algorithms::hash::keccak256;
use sentinel_types::error::LedgerError;
use sentinel_types::{ContentAddress, LedgerKey, ProfileRecord};

/// Canonical signature of the profile query.
pub const QUERY_PROFILE_SIGNATURE: &str = "consultarPerfil(bytes32)";

const WORD: usize = 32;
const HEAD_WORDS: usize = 4;

/// First four bytes of `keccak256("consultarPerfil(bytes32)")`.
pub fn query_selector() -> [u8; 4] {
    let [a, b, c, d, ..] = keccak256(QUERY_PROFILE_SIGNATURE.as_bytes());
    [a, b, c, d]
}

/// Selector followed by the key word.
pub fn encode_query_call(key: &LedgerKey) -> Vec<u8> {
    let mut calldata = Vec::with_capacity(4 + WORD);
    calldata.extend_from_slice(&query_selector());
    calldata.extend_from_slice(&key.0);
    calldata
}

/// Inverse of [`encode_query_call`]; used by in-process ledgers.
pub fn decode_query_call(calldata: &[u8]) -> Result<LedgerKey, LedgerError> {
    let (selector, arg) = calldata
        .split_first_chunk::<4>()
        .ok_or_else(|| LedgerError::MalformedResponse("calldata shorter than a selector".into()))?;
    if *selector != query_selector() {
        return Err(LedgerError::MalformedResponse(format!(
            "unknown selector 0x{}",
            hex::encode(selector)
        )));
    }
    let key: [u8; WORD] = arg.try_into().map_err(|_| {
        LedgerError::MalformedResponse(format!("expected a 32-byte argument, got {}", arg.len()))
    })?;
    Ok(LedgerKey(key))
}

/// Decodes and validates the return tuple.
pub fn decode_profile_output(data: &[u8]) -> Result<ProfileRecord, LedgerError> {
    if data.len() < HEAD_WORDS * WORD {
        return Err(malformed(format!(
            "return data is {} bytes, head alone needs {}",
            data.len(),
            HEAD_WORDS * WORD
        )));
    }
    let active = match read_uint(data, 0)? {
        0 => false,
        1 => true,
        other => return Err(malformed(format!("bool word holds {}", other))),
    };
    let person_offset = read_offset(data, WORD)?;
    let evidence_offset = read_offset(data, 2 * WORD)?;
    let timestamp = read_uint(data, 3 * WORD)?;

    Ok(ProfileRecord {
        active,
        person_id: read_string(data, person_offset)?,
        evidence_address: ContentAddress::new(read_string(data, evidence_offset)?),
        timestamp,
    })
}

/// Encodes a record the way the contract would return it.
pub fn encode_profile_output(record: &ProfileRecord) -> Vec<u8> {
    let person = record.person_id.as_bytes();
    let evidence = record.evidence_address.as_str().as_bytes();
    let person_offset = HEAD_WORDS * WORD;
    let evidence_offset = person_offset + WORD + padded_len(person.len());

    let mut out = Vec::with_capacity(evidence_offset + WORD + padded_len(evidence.len()));
    out.extend_from_slice(&uint_word(u64::from(record.active)));
    out.extend_from_slice(&uint_word(person_offset as u64));
    out.extend_from_slice(&uint_word(evidence_offset as u64));
    out.extend_from_slice(&uint_word(record.timestamp));
    push_string(&mut out, person);
    push_string(&mut out, evidence);
    out
}

fn malformed(msg: String) -> LedgerError {
    LedgerError::MalformedResponse(msg)
}

fn word_at(data: &[u8], at: usize) -> Result<&[u8; WORD], LedgerError> {
    at.checked_add(WORD)
        .and_then(|end| data.get(at..end))
        .and_then(|w| w.try_into().ok())
        .ok_or_else(|| malformed(format!("word at {} is out of bounds", at)))
}

/// A uint256 word that must fit in 64 bits.
fn read_uint(data: &[u8], at: usize) -> Result<u64, LedgerError> {
    let word = word_at(data, at)?;
    let (high, low) = word.split_at(WORD - 8);
    if high.iter().any(|b| *b != 0) {
        return Err(malformed(format!("integer at {} exceeds 64 bits", at)));
    }
    let low: [u8; 8] = low
        .try_into()
        .map_err(|_| malformed(format!("integer at {} is truncated", at)))?;
    Ok(u64::from_be_bytes(low))
}

fn read_offset(data: &[u8], at: usize) -> Result<usize, LedgerError> {
    let value = read_uint(data, at)?;
    usize::try_from(value).map_err(|_| malformed(format!("offset {} does not fit usize", value)))
}

fn read_string(data: &[u8], offset: usize) -> Result<String, LedgerError> {
    let len = read_offset(data, offset)?;
    let bytes = offset
        .checked_add(WORD)
        .and_then(|start| start.checked_add(len).map(|end| (start, end)))
        .and_then(|(start, end)| data.get(start..end))
        .ok_or_else(|| malformed(format!("string of {} bytes at {} is out of bounds", len, offset)))?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| malformed(format!("string at {} is not UTF-8", offset)))
}

fn uint_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    let (_, low) = word.split_at_mut(WORD - 8);
    low.copy_from_slice(&value.to_be_bytes());
    word
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

fn push_string(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&uint_word(bytes.len() as u64));
    out.extend_from_slice(bytes);
    out.resize(out.len() + padded_len(bytes.len()) - bytes.len(), 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record() -> ProfileRecord {
        ProfileRecord {
            active: true,
            person_id: "criminal_001".into(),
            evidence_address: ContentAddress::new("QmYwAPJzv5CZsnAzt8auVZRn1pfejsyGbbDhg4spo2Dp3J"),
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn selector_is_keccak_prefix() {
        let full = keccak256(QUERY_PROFILE_SIGNATURE.as_bytes());
        assert_eq!(&query_selector()[..], &full[..4]);
    }

    #[test]
    fn call_round_trips() {
        let key = LedgerKey([0x5A; 32]);
        let calldata = encode_query_call(&key);
        assert_eq!(calldata.len(), 36);
        assert_eq!(decode_query_call(&calldata).unwrap(), key);

        let mut wrong = calldata.clone();
        wrong[0] ^= 1;
        assert!(decode_query_call(&wrong).is_err());
        assert!(decode_query_call(&calldata[..20]).is_err());
    }

    #[test]
    fn unknown_selector_is_reported_in_hex() {
        let mut calldata = vec![0xde, 0xad, 0xbe, 0xef];
        calldata.extend_from_slice(&[0u8; 32]);
        match decode_query_call(&calldata) {
            Err(LedgerError::MalformedResponse(msg)) => {
                assert_eq!(msg, "unknown selector 0xdeadbeef")
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn output_layout_matches_solidity() {
        let out = encode_profile_output(&record());
        // head + "criminal_001" (1 len word + 1 data word) + 46-byte cid (1 + 2 words)
        assert_eq!(out.len(), (4 + 2 + 3) * 32);
        assert_eq!(out[31], 1);
        assert_eq!(out[63], 0x80);
        assert_eq!(out[95], 0xC0);
        assert_eq!(decode_profile_output(&out).unwrap(), record());
    }

    #[test]
    fn vacant_tuple_decodes_to_defaults() {
        let vacant = ProfileRecord {
            active: false,
            person_id: String::new(),
            evidence_address: ContentAddress::new(""),
            timestamp: 0,
        };
        let out = encode_profile_output(&vacant);
        assert_eq!(out.len(), 6 * 32);
        assert!(decode_profile_output(&out).unwrap().is_vacant());
    }

    #[test]
    fn malformed_outputs_are_rejected() {
        let good = encode_profile_output(&record());

        assert!(decode_profile_output(&good[..100]).is_err());

        let mut bad_bool = good.clone();
        bad_bool[31] = 2;
        assert!(decode_profile_output(&bad_bool).is_err());

        let mut wide_timestamp = good.clone();
        wide_timestamp[96] = 1;
        assert!(decode_profile_output(&wide_timestamp).is_err());

        let mut far_offset = good.clone();
        far_offset[63] = 0xFF;
        far_offset[62] = 0xFF;
        assert!(decode_profile_output(&far_offset).is_err());

        let mut bad_utf8 = good.clone();
        bad_utf8[4 * 32 + 32] = 0xFF;
        assert!(matches!(
            decode_profile_output(&bad_utf8),
            Err(LedgerError::MalformedResponse(_))
        ));
    }

    proptest! {
        #[test]
        fn decode_never_panics_on_arbitrary_bytes(data in proptest::collection::vec(any::<u8>(), 0..400)) {
            let _ = decode_profile_output(&data);
        }

        #[test]
        fn encoded_records_decode(
            active in any::<bool>(),
            person in "[a-z0-9_]{0,80}",
            cid in "[A-Za-z0-9]{0,70}",
            timestamp in any::<u64>(),
        ) {
            let r = ProfileRecord {
                active,
                person_id: person,
                evidence_address: ContentAddress::new(cid),
                timestamp,
            };
            prop_assert_eq!(decode_profile_output(&encode_profile_output(&r)).unwrap(), r);
        }
    }
}
