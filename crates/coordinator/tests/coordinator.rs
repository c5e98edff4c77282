//! Integration tests for [`SigningCoordinator`].
use alloy::primitives::{Address, Signature};
use sigil_coordinator::SigningCoordinator;
use sigil_encoding::{hash_personal_message, hex_decode};
use sigil_session::{RemoteSignRequester, SessionRouter};
use sigil_test_utils::{
    sessions::{MockLegacyTransport, MockMultiTransport, MockSessionRegistry, SignMethod},
    wallets::{MockWalletRegistry, TEST_KEYS},
};
use sigil_types::{DomainIdentity, SessionHandle, SigningError, VendorQuirks};

type TestCoordinator = SigningCoordinator<
    MockWalletRegistry,
    MockSessionRegistry,
    MockSessionRegistry,
    MockLegacyTransport,
    MockMultiTransport,
>;

/// All the mock collaborators behind a coordinator, kept around so tests can
/// inspect what each one saw.
#[derive(Default)]
struct Harness {
    wallets: MockWalletRegistry,
    legacy_sessions: MockSessionRegistry,
    multi_sessions: MockSessionRegistry,
    legacy: MockLegacyTransport,
    multi: MockMultiTransport,
}

impl Harness {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self::default()
    }

    fn coordinator(&self) -> TestCoordinator {
        SigningCoordinator::new(
            self.wallets.clone(),
            SessionRouter::new(self.legacy_sessions.clone(), self.multi_sessions.clone()),
            RemoteSignRequester::new(
                self.legacy.clone(),
                self.multi.clone(),
                VendorQuirks::default(),
            ),
        )
    }
}

fn recover(signature_hex: &str, payload: &[u8]) -> Address {
    let bytes = hex_decode(signature_hex).unwrap();
    let signature = Signature::from_raw(&bytes).unwrap();
    signature.recover_address_from_prehash(&hash_personal_message(payload)).unwrap()
}

#[tokio::test]
async fn verified_personal_sign_yields_recoverable_signature() {
    let mut harness = Harness::new();
    let wallet = harness.wallets.add_verified(TEST_KEYS[0]);

    let signature = harness.coordinator().personal_sign("hello", &wallet).await.unwrap();

    assert!(signature.starts_with("0x"));
    // 65-byte r||s||v encoding.
    assert_eq!(signature.len(), 132);
    assert_eq!(recover(&signature, b"hello"), wallet.address());
}

#[tokio::test]
async fn verified_path_never_consults_the_router() {
    let mut harness = Harness::new();
    let wallet = harness.wallets.add_verified(TEST_KEYS[0]);
    // Sessions exist, but a verified wallet must not look at them.
    harness.legacy_sessions.add_session(wallet.address(), SessionHandle::new("stale"));
    harness.multi_sessions.add_session(wallet.address(), SessionHandle::new("stale"));

    harness.coordinator().personal_sign("hello", &wallet).await.unwrap();

    assert_eq!(harness.legacy_sessions.queries(), 0);
    assert_eq!(harness.multi_sessions.queries(), 0);
    assert!(harness.legacy.requests().is_empty());
    assert!(harness.multi.requests().is_empty());
}

#[tokio::test]
async fn external_path_never_touches_local_key_material() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.legacy_sessions.add_session(address, SessionHandle::new("s1"));

    let signature = harness.coordinator().personal_sign("hello", &wallet).await.unwrap();

    assert_eq!(signature, "0xlegacy(hello)");
    assert_eq!(harness.wallets.key_queries(), 0);
}

#[tokio::test]
async fn multi_session_masks_legacy() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.legacy_sessions.add_session(address, SessionHandle::new("stale-legacy"));
    harness.multi_sessions.add_session(address, SessionHandle::new("live-multi"));

    let signature = harness.coordinator().personal_sign("hello", &wallet).await.unwrap();

    assert_eq!(signature, "0xmulti(hello)");
    assert!(harness.legacy.requests().is_empty());
    let requests = harness.multi.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].topics, vec!["live-multi".to_owned()]);
}

#[tokio::test]
async fn legacy_personal_sign_sends_text_unchanged() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.legacy_sessions.add_session(address, SessionHandle::new("s1"));

    harness.coordinator().personal_sign("hello", &wallet).await.unwrap();

    let requests = harness.legacy.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, SignMethod::PersonalSign);
    // "hello" is not valid hex, so it crosses the wire untouched.
    assert_eq!(requests[0].message, "hello");
    assert_eq!(requests[0].address, address);
}

#[tokio::test]
async fn legacy_personal_sign_rewrites_hex_to_text() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.legacy_sessions.add_session(address, SessionHandle::new("s1"));

    harness.coordinator().personal_sign("0x68656c6c6f", &wallet).await.unwrap();

    assert_eq!(harness.legacy.requests()[0].message, "hello");
}

#[tokio::test]
async fn multi_personal_sign_forwards_hex_verbatim() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.multi_sessions.add_session(address, SessionHandle::new("m1"));

    harness.coordinator().personal_sign("0x68656c6c6f", &wallet).await.unwrap();

    let requests = harness.multi.requests();
    assert_eq!(requests[0].message, "0x68656c6c6f");
    assert_eq!(requests[0].chain_id, Some(1));
}

#[tokio::test]
async fn readable_rewrite_applies_to_flagged_vendors_only() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "AlphaWallet");
    harness.multi_sessions.add_session(address, SessionHandle::new("m1"));

    harness.coordinator().personal_sign("0x68656c6c6f", &wallet).await.unwrap();

    // The multi path normally forwards hex verbatim; the vendor rewrite
    // happens before the session is even resolved.
    assert_eq!(harness.multi.requests()[0].message, "hello");
}

#[tokio::test]
async fn eth_sign_requires_hex_for_local_wallets() {
    let mut harness = Harness::new();
    let wallet = harness.wallets.add_verified(TEST_KEYS[0]);

    let err = harness.coordinator().eth_sign("hello", &wallet).await.unwrap_err();
    assert!(matches!(err, SigningError::HashingFailed(_)));
}

#[tokio::test]
async fn eth_sign_local_signs_decoded_bytes() {
    let mut harness = Harness::new();
    let wallet = harness.wallets.add_verified(TEST_KEYS[0]);

    let signature = harness.coordinator().eth_sign("0xdeadbeef", &wallet).await.unwrap();
    assert_eq!(recover(&signature, &hex_decode("0xdeadbeef").unwrap()), wallet.address());
}

#[tokio::test]
async fn eth_sign_remote_prehashes_for_ordinary_vendors() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.multi_sessions.add_session(address, SessionHandle::new("m1"));

    harness.coordinator().eth_sign("0xdeadbeef", &wallet).await.unwrap();

    let requests = harness.multi.requests();
    assert_eq!(requests[0].method, SignMethod::EthSign);
    assert_eq!(
        requests[0].message,
        "0xd1c7f1a06a4f9a535077e50ad23244ce2c6ae443fcd412965226f3df5d28eaaa"
    );
}

#[tokio::test]
async fn eth_sign_remote_skips_hashing_for_self_hashing_vendors() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "Rainbow Wallet");
    harness.multi_sessions.add_session(address, SessionHandle::new("m1"));

    harness.coordinator().eth_sign("0xdeadbeef", &wallet).await.unwrap();

    assert_eq!(harness.multi.requests()[0].message, "0xdeadbeef");
}

const MAIL_TYPED_DATA: &str = r#"{
    "types": {
        "EIP712Domain": [
            { "name": "name", "type": "string" },
            { "name": "version", "type": "string" },
            { "name": "chainId", "type": "uint256" },
            { "name": "verifyingContract", "type": "address" }
        ],
        "Person": [
            { "name": "name", "type": "string" },
            { "name": "wallet", "type": "address" }
        ],
        "Mail": [
            { "name": "from", "type": "Person" },
            { "name": "to", "type": "Person" },
            { "name": "contents", "type": "string" }
        ]
    },
    "primaryType": "Mail",
    "domain": {
        "name": "Ether Mail",
        "version": "1",
        "chainId": 1,
        "verifyingContract": "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
    },
    "message": {
        "from": { "name": "Cow", "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826" },
        "to": { "name": "Bob", "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB" },
        "contents": "Hello, Bob!"
    }
}"#;

#[tokio::test]
async fn typed_data_local_signs_canonical_hash() {
    let mut harness = Harness::new();
    let wallet = harness.wallets.add_verified(TEST_KEYS[0]);

    let signature =
        harness.coordinator().sign_typed_data(MAIL_TYPED_DATA, &wallet).await.unwrap();

    let typed: alloy::dyn_abi::TypedData = serde_json::from_str(MAIL_TYPED_DATA).unwrap();
    let hash = typed.eip712_signing_hash().unwrap();
    let bytes = hex_decode(&signature).unwrap();
    let parsed = Signature::from_raw(&bytes).unwrap();
    assert_eq!(parsed.recover_address_from_prehash(&hash).unwrap(), wallet.address());
}

#[tokio::test]
async fn typed_data_remote_forwards_payload_verbatim() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.multi_sessions.add_session(address, SessionHandle::new("m1"));

    harness.coordinator().sign_typed_data(MAIL_TYPED_DATA, &wallet).await.unwrap();

    let requests = harness.multi.requests();
    assert_eq!(requests[0].method, SignMethod::SignTypedData);
    assert_eq!(requests[0].message, MAIL_TYPED_DATA);
    assert_eq!(requests[0].chain_id, Some(1));
}

#[tokio::test]
async fn typed_data_local_rejects_malformed_payloads() {
    let mut harness = Harness::new();
    let wallet = harness.wallets.add_verified(TEST_KEYS[0]);

    let err =
        harness.coordinator().sign_typed_data("not typed data", &wallet).await.unwrap_err();
    assert!(matches!(err, SigningError::DecodingFailed(_)));
}

#[tokio::test]
async fn batch_serializes_and_preserves_order_for_external_wallets() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.legacy_sessions.add_session(address, SessionHandle::new("s1"));

    let messages = vec!["m1".to_owned(), "m2".to_owned(), "m3".to_owned()];
    let signatures =
        harness.coordinator().batch_personal_sign(&messages, &wallet).await.unwrap();

    assert_eq!(signatures, vec!["0xlegacy(m1)", "0xlegacy(m2)", "0xlegacy(m3)"]);
    let requested: Vec<_> =
        harness.legacy.requests().into_iter().map(|r| r.message).collect();
    assert_eq!(requested, vec!["m1", "m2", "m3"]);
}

#[tokio::test]
async fn batch_serial_path_propagates_failures_immediately() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.legacy_sessions.add_session(address, SessionHandle::new("s1"));
    harness.legacy.reject_next("user declined");

    let messages = vec!["m1".to_owned(), "m2".to_owned()];
    let err =
        harness.coordinator().batch_personal_sign(&messages, &wallet).await.unwrap_err();

    assert!(matches!(err, SigningError::RemoteSession(_)));
    // The second message is never attempted.
    assert_eq!(harness.legacy.requests().len(), 1);
}

#[tokio::test]
async fn batch_concurrent_path_signs_every_message() {
    let mut harness = Harness::new();
    let wallet = harness.wallets.add_verified(TEST_KEYS[0]);

    let messages = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
    let mut signatures =
        harness.coordinator().batch_personal_sign(&messages, &wallet).await.unwrap();

    // Completion order is unspecified on this path; compare as sets.
    let mut expected: Vec<String> = messages
        .iter()
        .map(|m| sigil_local::sign_personal_as_hex(m, TEST_KEYS[0]).unwrap())
        .collect();
    signatures.sort();
    expected.sort();
    assert_eq!(signatures, expected);
}

#[tokio::test]
async fn batch_concurrent_path_fails_on_count_mismatch() {
    let mut harness = Harness::new();
    // A verified wallet whose key the registry cannot produce: every
    // per-message signing fails and is silently dropped.
    let wallet = harness.wallets.add_verified_without_key(Address::repeat_byte(0xa1));

    let messages = vec!["m1".to_owned(), "m2".to_owned()];
    let err =
        harness.coordinator().batch_personal_sign(&messages, &wallet).await.unwrap_err();

    assert!(matches!(err, SigningError::IncompleteBatch { expected: 2, signed: 0 }));
}

#[tokio::test]
async fn domain_without_owner_is_rejected() {
    let harness = Harness::new();
    let domain = DomainIdentity::new("alice.example", None);

    let err = harness
        .coordinator()
        .batch_personal_sign_for_domain(&["m".to_owned()], &domain)
        .await
        .unwrap_err();
    assert!(matches!(err, SigningError::NoWalletOwner(_)));
}

#[tokio::test]
async fn domain_with_unknown_wallet_is_rejected() {
    let harness = Harness::new();
    let owner = Address::repeat_byte(0x77);
    let domain = DomainIdentity::new("alice.example", Some(owner));

    let err = harness
        .coordinator()
        .batch_personal_sign_for_domain(&["m".to_owned()], &domain)
        .await
        .unwrap_err();
    assert!(matches!(err, SigningError::WalletNotFound(a) if a == owner));
}

#[tokio::test]
async fn domain_resolves_owner_and_signs() {
    let mut harness = Harness::new();
    let wallet = harness.wallets.add_verified(TEST_KEYS[0]);
    let domain = DomainIdentity::new("alice.example", Some(wallet.address()));

    let signatures = harness
        .coordinator()
        .batch_personal_sign_for_domain(&["hello".to_owned()], &domain)
        .await
        .unwrap();

    assert_eq!(signatures.len(), 1);
    assert_eq!(recover(&signatures[0], b"hello"), wallet.address());
}

#[tokio::test]
async fn external_wallet_without_sessions_fails() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");

    let err = harness.coordinator().personal_sign("hello", &wallet).await.unwrap_err();
    assert!(matches!(err, SigningError::NoSessionFound(a) if a == address));
}

#[tokio::test]
async fn remote_rejection_propagates_verbatim() {
    let mut harness = Harness::new();
    let address = Address::repeat_byte(0xb2);
    let wallet = harness.wallets.add_external(address, "MetaMask");
    harness.multi_sessions.add_session(address, SessionHandle::new("m1"));
    harness.multi.reject_next("user declined");

    let err = harness.coordinator().personal_sign("hello", &wallet).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "request rejected by the remote wallet: user declined"
    );
}
