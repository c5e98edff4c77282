use alloy::primitives::Address;

/// A protocol-level failure reported by a remote signing transport.
///
/// Propagated verbatim through [`SigningError::RemoteSession`]; the SDK never
/// reinterprets what the session layer reported.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RemoteSessionError {
    /// The counterparty wallet rejected the request.
    #[error("request rejected by the remote wallet: {0}")]
    Rejected(String),
    /// The session transport failed before a response arrived.
    #[error(transparent)]
    Transport(Box<dyn core::error::Error + Send + Sync>),
}

impl RemoteSessionError {
    /// Wrap a transport-level failure.
    pub fn transport(err: impl core::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// An error raised by the signing surface.
///
/// Every kind propagates to the immediate caller. The one exception is the
/// concurrent branch of batch personal-sign, where per-message failures are
/// dropped and surface collectively as [`SigningError::IncompleteBatch`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SigningError {
    /// The supplied identity has no associated owning wallet address.
    #[error("no owning wallet address for {0:?}")]
    NoWalletOwner(String),
    /// The address does not resolve in the wallet registry.
    #[error("wallet {0} not found in the registry")]
    WalletNotFound(Address),
    /// Local cryptographic signing returned no result.
    #[error("failed to sign message")]
    SigningFailed,
    /// The wallet is externally linked but neither session registry has a
    /// live session for it.
    #[error("no remote signing session found for wallet {0}")]
    NoSessionFound(Address),
    /// The message could not be reduced to its signing hash.
    #[error("failed to hash message for signing: {0}")]
    HashingFailed(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The remote session layer reported a failure; carried verbatim.
    #[error(transparent)]
    RemoteSession(#[from] RemoteSessionError),
    /// A payload or response failed to decode.
    #[error("failed to decode payload: {0}")]
    DecodingFailed(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The batch produced fewer signatures than messages.
    #[error("batch produced {signed} of {expected} signatures")]
    IncompleteBatch {
        /// Number of messages submitted.
        expected: usize,
        /// Number of signatures recovered.
        signed: usize,
    },
}

impl SigningError {
    /// Wrap a hashing failure.
    pub fn hashing(err: impl core::error::Error + Send + Sync + 'static) -> Self {
        Self::HashingFailed(Box::new(err))
    }

    /// Wrap a decoding failure.
    pub fn decoding(err: impl core::error::Error + Send + Sync + 'static) -> Self {
        Self::DecodingFailed(Box::new(err))
    }
}
