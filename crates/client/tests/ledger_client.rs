// Path: crates/client/tests/ledger_client.rs

use sentinel_client::abi::encode_profile_output;
use sentinel_client::{LedgerClient, MockLedger};
use sentinel_test_utils::doubles::{FixedOracle, SlowOracle, UnavailableOracle};
use sentinel_types::error::LedgerError;
use sentinel_types::{ContentAddress, KeyPacking, ProfileRecord, Signature};
use std::sync::Arc;
use std::time::Duration;

fn sig(bits: &str) -> Signature {
    Signature::from_bits(bits).unwrap()
}

fn client(oracle: Arc<MockLedger>, packing: KeyPacking) -> LedgerClient {
    LedgerClient::new(oracle, packing, Duration::from_secs(1))
}

#[tokio::test]
async fn unknown_signature_is_none() {
    let ledger = Arc::new(MockLedger::new(KeyPacking::BitPacked));
    let client = client(ledger.clone(), KeyPacking::BitPacked);

    assert_eq!(client.query_profile(&sig("0101")).await.unwrap(), None);
    assert_eq!(ledger.calls(), 1);
}

#[tokio::test]
async fn registered_profiles_are_returned_active_or_not() {
    for packing in [KeyPacking::BitPacked, KeyPacking::Sha256] {
        let ledger = Arc::new(MockLedger::new(packing));
        let s = sig("1100110011");
        ledger
            .register(&s, "criminal_001", ContentAddress::new("QmOld"), 1_700_000_000, true)
            .unwrap();
        let client = client(ledger.clone(), packing);

        let record = client.query_profile(&s).await.unwrap().unwrap();
        assert!(record.active);
        assert_eq!(record.person_id, "criminal_001");
        assert_eq!(record.evidence_address, ContentAddress::new("QmOld"));
        assert_eq!(record.timestamp, 1_700_000_000);

        assert!(ledger.set_active(&s, false).unwrap());
        let record = client.query_profile(&s).await.unwrap().unwrap();
        assert!(!record.active);
    }
}

#[tokio::test]
async fn mismatched_packing_does_not_find_the_profile() {
    let ledger = Arc::new(MockLedger::new(KeyPacking::Sha256));
    let s = sig("1010");
    ledger
        .register(&s, "p", ContentAddress::new("cid"), 1, true)
        .unwrap();

    let client = client(ledger, KeyPacking::BitPacked);
    assert_eq!(client.query_profile(&s).await.unwrap(), None);
}

#[tokio::test]
async fn oversized_signature_fails_before_calling_the_ledger() {
    let ledger = Arc::new(MockLedger::new(KeyPacking::BitPacked));
    let client = client(ledger.clone(), KeyPacking::BitPacked);

    let err = client
        .query_profile(&sig(&"1".repeat(300)))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidSignatureEncoding(_)));
    assert_eq!(ledger.calls(), 0);
}

#[tokio::test]
async fn outage_and_timeout_are_unavailable() {
    let down = LedgerClient::new(
        Arc::new(UnavailableOracle::new()),
        KeyPacking::BitPacked,
        Duration::from_secs(1),
    );
    assert!(matches!(
        down.query_profile(&sig("1")).await,
        Err(LedgerError::Unavailable(_))
    ));

    let vacant = ProfileRecord {
        active: false,
        person_id: String::new(),
        evidence_address: ContentAddress::new(""),
        timestamp: 0,
    };
    let slow = LedgerClient::new(
        Arc::new(SlowOracle::new(
            Duration::from_secs(30),
            encode_profile_output(&vacant),
        )),
        KeyPacking::BitPacked,
        Duration::from_millis(20),
    );
    assert!(matches!(
        slow.query_profile(&sig("1")).await,
        Err(LedgerError::Unavailable(_))
    ));
}

#[tokio::test]
async fn garbage_response_is_malformed() {
    let oracle = Arc::new(FixedOracle::new(vec![0xAB; 40]));
    let client = LedgerClient::new(oracle.clone(), KeyPacking::BitPacked, Duration::from_secs(1));

    assert!(matches!(
        client.query_profile(&sig("1")).await,
        Err(LedgerError::MalformedResponse(_))
    ));
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test]
async fn mock_can_be_taken_offline() {
    let ledger = Arc::new(MockLedger::new(KeyPacking::BitPacked));
    ledger.set_unavailable(true);
    let client = client(ledger.clone(), KeyPacking::BitPacked);

    assert!(matches!(
        client.query_profile(&sig("1")).await,
        Err(LedgerError::Unavailable(_))
    ));
    ledger.set_unavailable(false);
    assert!(client.query_profile(&sig("1")).await.is_ok());
}
