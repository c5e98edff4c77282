//! Mock wallet registry and deterministic test keys.
use alloy::{
    primitives::Address,
    signers::local::PrivateKeySigner,
};
use sigil_coordinator::WalletRegistry;
use sigil_types::WalletIdentity;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use zeroize::Zeroizing;

/// Deterministic test private keys. Never fund these.
pub const TEST_KEYS: [&str; 2] = [
    "0x0101010101010101010101010101010101010101010101010101010101010101",
    "0x0202020202020202020202020202020202020202020202020202020202020202",
];

/// The signer for a test key.
pub fn test_signer(key_hex: &str) -> PrivateKeySigner {
    key_hex.parse().expect("test key is valid")
}

/// The address a test key controls.
pub fn test_address(key_hex: &str) -> Address {
    test_signer(key_hex).address()
}

/// A mock [`WalletRegistry`] over a fixed wallet table, counting key
/// accesses so tests can assert which signing path ran.
#[derive(Debug, Clone, Default)]
pub struct MockWalletRegistry {
    wallets: HashMap<Address, WalletIdentity>,
    keys: HashMap<Address, String>,
    key_queries: Arc<AtomicUsize>,
}

impl MockWalletRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a verified wallet from its private key, deriving the
    /// address. Returns the identity.
    pub fn add_verified(&mut self, key_hex: &str) -> WalletIdentity {
        let address = test_address(key_hex);
        let wallet = WalletIdentity::verified(address);
        self.wallets.insert(address, wallet.clone());
        self.keys.insert(address, key_hex.to_owned());
        wallet
    }

    /// Register a verified wallet whose key the registry cannot produce.
    pub fn add_verified_without_key(&mut self, address: Address) -> WalletIdentity {
        let wallet = WalletIdentity::verified(address);
        self.wallets.insert(address, wallet.clone());
        wallet
    }

    /// Register an externally linked wallet. Returns the identity.
    pub fn add_external(&mut self, address: Address, vendor_name: &str) -> WalletIdentity {
        let wallet = WalletIdentity::external_linked(address, vendor_name);
        self.wallets.insert(address, wallet.clone());
        wallet
    }

    /// How many times key material was requested.
    pub fn key_queries(&self) -> usize {
        self.key_queries.load(Ordering::SeqCst)
    }
}

impl WalletRegistry for MockWalletRegistry {
    fn wallet_by_address(&self, address: Address) -> Option<WalletIdentity> {
        self.wallets.get(&address).cloned()
    }

    fn private_key(&self, address: Address) -> Option<Zeroizing<String>> {
        self.key_queries.fetch_add(1, Ordering::SeqCst);
        self.keys.get(&address).cloned().map(Zeroizing::new)
    }
}
