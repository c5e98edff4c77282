use alloy::primitives::Address;
use sigil_coordinator::{SigningCoordinator, WalletRegistry};
use sigil_session::{RemoteSignRequester, SessionRegistry, SessionRouter};
use sigil_types::{DomainIdentity, SigningError, VendorQuirks, WalletIdentity};

// implement these over your app's wallet store and session services
struct AppWallets; // impl WalletRegistry
struct LegacySessions; // impl SessionRegistry (legacy protocol table)
struct MultiSessions; // impl SessionRegistry (multi-session protocol table)
struct LegacyWire; // impl LegacyTransport over the legacy session client
struct MultiWire; // impl MultiTransport over the multi-session client

/// Wire the coordinator once at startup and share it with the layers that
/// need signatures. Every collaborator is injected here; nothing is looked
/// up globally.
fn build_coordinator(
) -> SigningCoordinator<AppWallets, LegacySessions, MultiSessions, LegacyWire, MultiWire> {
    SigningCoordinator::new(
        AppWallets,
        SessionRouter::new(LegacySessions, MultiSessions),
        // VendorQuirks::from_env() honors SIGIL_SELF_HASHING_VENDORS /
        // SIGIL_READABLE_VENDORS overrides.
        RemoteSignRequester::new(LegacyWire, MultiWire, VendorQuirks::from_env()),
    )
}

/// Sign a message for whichever wallet owns the domain.
///
/// A verified wallet signs in-process; an externally linked wallet suspends
/// here until its counterparty app approves the request. Batches over an
/// external wallet run strictly one message at a time, so expect one
/// approval prompt per message.
async fn sign_for_domain(
    owner: Address,
    messages: Vec<String>,
) -> Result<Vec<String>, SigningError> {
    let coordinator = build_coordinator();
    let domain = DomainIdentity::new("alice.example", Some(owner));
    coordinator.batch_personal_sign_for_domain(&messages, &domain).await
}
