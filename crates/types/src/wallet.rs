use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// How a wallet's key material is reachable.
///
/// The state deterministically selects the signing path: a wallet is in
/// exactly one state at a time, and no call mixes both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationState {
    /// Key material is available locally; signing happens in-process.
    Verified,
    /// The key lives in a counterparty wallet app; signing goes through a
    /// remote session.
    ExternalLinked,
}

/// A wallet identity as seen by the signing surface.
///
/// Owned by the wallet registry; the coordinator borrows it for the duration
/// of one signing call. The vendor name, when present, selects
/// vendor-specific encoding quirks (see [`crate::VendorQuirks`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletIdentity {
    address: Address,
    state: VerificationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_wallet_name: Option<String>,
}

impl WalletIdentity {
    /// Create a new wallet identity.
    pub const fn new(
        address: Address,
        state: VerificationState,
        external_wallet_name: Option<String>,
    ) -> Self {
        Self { address, state, external_wallet_name }
    }

    /// A wallet whose key material is held locally.
    pub const fn verified(address: Address) -> Self {
        Self::new(address, VerificationState::Verified, None)
    }

    /// A wallet linked to an external counterparty app.
    pub fn external_linked(address: Address, vendor_name: impl Into<String>) -> Self {
        Self::new(address, VerificationState::ExternalLinked, Some(vendor_name.into()))
    }

    /// The wallet address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The verification state.
    pub const fn state(&self) -> VerificationState {
        self.state
    }

    /// True if the key material is available locally.
    pub fn is_verified(&self) -> bool {
        self.state == VerificationState::Verified
    }

    /// The human-readable vendor name of the external wallet app, if any.
    pub fn external_wallet_name(&self) -> Option<&str> {
        self.external_wallet_name.as_deref()
    }
}

/// A named identity (e.g. a domain) whose signing wallet is resolved at call
/// time from its owner address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainIdentity {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<Address>,
}

impl DomainIdentity {
    /// Create a new domain identity.
    pub fn new(name: impl Into<String>, owner: Option<Address>) -> Self {
        Self { name: name.into(), owner }
    }

    /// The display name of the identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning wallet address, if one is associated.
    pub const fn owner(&self) -> Option<Address> {
        self.owner
    }
}
