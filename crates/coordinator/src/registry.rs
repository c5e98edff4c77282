use alloy::primitives::Address;
use sigil_types::WalletIdentity;
use zeroize::Zeroizing;

/// A read-only view into an externally owned wallet registry.
///
/// The registry owns wallet identities and key material; the coordinator
/// borrows an identity for the duration of one signing call and fetches key
/// material on demand for locally held wallets.
pub trait WalletRegistry {
    /// Resolve an address to its wallet identity.
    fn wallet_by_address(&self, address: Address) -> Option<WalletIdentity>;

    /// The hex-encoded private key for a locally held wallet.
    ///
    /// Returns `None` for externally linked wallets and for addresses the
    /// registry does not know. The returned buffer zeroes itself on drop.
    fn private_key(&self, address: Address) -> Option<Zeroizing<String>>;
}

impl<T: WalletRegistry> WalletRegistry for &T {
    fn wallet_by_address(&self, address: Address) -> Option<WalletIdentity> {
        (**self).wallet_by_address(address)
    }

    fn private_key(&self, address: Address) -> Option<Zeroizing<String>> {
        (**self).private_key(address)
    }
}
