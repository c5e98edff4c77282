use crate::WalletRegistry;
use alloy::dyn_abi::TypedData;
use futures_util::{stream::FuturesUnordered, StreamExt};
use sigil_encoding::{hex_decode, hex_encode_prefixed, readable_message};
use sigil_session::{
    LegacyTransport, MultiTransport, RemoteSignRequester, SessionRegistry, SessionRouter,
};
use sigil_types::{
    DomainIdentity, SignRequest, SigningError, VerificationState, WalletIdentity,
};
use std::borrow::Cow;
use tracing::{debug, instrument};
use zeroize::Zeroizing;

/// The single signing entry point used by higher application layers.
///
/// Branches on the wallet's verification state: a `Verified` wallet signs
/// in-process with its local key, an `ExternalLinked` wallet signs through
/// whichever remote session the router resolves. No call mixes both paths,
/// and no state survives a call.
#[derive(Debug, Clone)]
pub struct SigningCoordinator<W, L, M, T1, T2> {
    wallets: W,
    router: SessionRouter<L, M>,
    requester: RemoteSignRequester<T1, T2>,
}

impl<W, L, M, T1, T2> SigningCoordinator<W, L, M, T1, T2> {
    /// Create a coordinator over its injected collaborators.
    pub const fn new(
        wallets: W,
        router: SessionRouter<L, M>,
        requester: RemoteSignRequester<T1, T2>,
    ) -> Self {
        Self { wallets, router, requester }
    }

    /// The wallet registry.
    pub const fn wallets(&self) -> &W {
        &self.wallets
    }

    /// The session router.
    pub const fn router(&self) -> &SessionRouter<L, M> {
        &self.router
    }

    /// The remote sign requester.
    pub const fn requester(&self) -> &RemoteSignRequester<T1, T2> {
        &self.requester
    }
}

impl<W, L, M, T1, T2> SigningCoordinator<W, L, M, T1, T2>
where
    W: WalletRegistry,
    L: SessionRegistry,
    M: SessionRegistry,
    T1: LegacyTransport,
    T2: MultiTransport,
{
    /// Sign a message under the personal-message envelope.
    ///
    /// For vendors in the readable-rewrite table, a hex message that is
    /// really text is first rewritten into its readable form (a
    /// compatibility shim for one wallet family, not a general rule).
    #[instrument(skip_all, fields(wallet = %wallet.address()))]
    pub async fn personal_sign(
        &self,
        message: &str,
        wallet: &WalletIdentity,
    ) -> Result<String, SigningError> {
        let message: Cow<'_, str> =
            if self.requester.quirks().prefers_readable(wallet.external_wallet_name()) {
                readable_message(message)
            } else {
                Cow::Borrowed(message)
            };

        match wallet.state() {
            VerificationState::Verified => {
                let key = self.private_key_for(wallet)?;
                sigil_local::sign_personal_as_hex(&message, &key)
            }
            VerificationState::ExternalLinked => {
                let session = self.router.resolve(wallet.address())?;
                self.requester
                    .send(&session, &SignRequest::Personal(message.into_owned()), wallet)
                    .await
            }
        }
    }

    /// Sign a raw message (`eth_sign` semantics).
    ///
    /// A locally held wallet requires the message to already be hex-encoded
    /// and signs the decoded bytes; an externally linked wallet routes
    /// through the requester, which applies the vendor hashing policy.
    #[instrument(skip_all, fields(wallet = %wallet.address()))]
    pub async fn eth_sign(
        &self,
        message: &str,
        wallet: &WalletIdentity,
    ) -> Result<String, SigningError> {
        match wallet.state() {
            VerificationState::Verified => {
                let payload = hex_decode(message).map_err(SigningError::hashing)?;
                let key = self.private_key_for(wallet)?;
                let signature = sigil_local::sign_personal_message(payload, &key)?;
                Ok(hex_encode_prefixed(signature.as_bytes()))
            }
            VerificationState::ExternalLinked => {
                let session = self.router.resolve(wallet.address())?;
                self.requester
                    .send(&session, &SignRequest::Eth(message.to_owned()), wallet)
                    .await
            }
        }
    }

    /// Sign a serialized EIP-712 typed-data document.
    ///
    /// A locally held wallet parses the document and signs its canonical
    /// signing hash; an externally linked wallet receives the payload
    /// verbatim.
    #[instrument(skip_all, fields(wallet = %wallet.address()))]
    pub async fn sign_typed_data(
        &self,
        payload: &str,
        wallet: &WalletIdentity,
    ) -> Result<String, SigningError> {
        match wallet.state() {
            VerificationState::Verified => {
                let typed: TypedData =
                    serde_json::from_str(payload).map_err(SigningError::decoding)?;
                let hash = typed.eip712_signing_hash().map_err(SigningError::hashing)?;
                let key = self.private_key_for(wallet)?;
                let signature = sigil_local::sign_hash_hex(&hash, &key)?;
                Ok(hex_encode_prefixed(signature.as_bytes()))
            }
            VerificationState::ExternalLinked => {
                let session = self.router.resolve(wallet.address())?;
                self.requester
                    .send(&session, &SignRequest::TypedData(payload.to_owned()), wallet)
                    .await
            }
        }
    }

    /// Personal-sign a batch of messages.
    ///
    /// An externally linked wallet signs strictly one message at a time, in
    /// input order — a single remote session surfaces one approval prompt at
    /// a time, so requests must not overlap — and any failure propagates
    /// immediately. A locally held wallet signs every message concurrently
    /// in an unordered group; per-message failures are dropped from the
    /// collection, and the only failure signal is the final count check.
    /// On the concurrent path the output order is NOT guaranteed to match
    /// the input order.
    #[instrument(skip_all, fields(wallet = %wallet.address(), messages = messages.len()))]
    pub async fn batch_personal_sign(
        &self,
        messages: &[String],
        wallet: &WalletIdentity,
    ) -> Result<Vec<String>, SigningError> {
        let mut signatures = Vec::with_capacity(messages.len());

        match wallet.state() {
            VerificationState::ExternalLinked => {
                for message in messages {
                    signatures.push(self.personal_sign(message, wallet).await?);
                }
            }
            VerificationState::Verified => {
                let mut pending: FuturesUnordered<_> =
                    messages.iter().map(|message| self.personal_sign(message, wallet)).collect();
                while let Some(result) = pending.next().await {
                    match result {
                        Ok(signature) => signatures.push(signature),
                        Err(e) => debug!(%e, "dropping failed signature from batch"),
                    }
                }
            }
        }

        if signatures.len() != messages.len() {
            return Err(SigningError::IncompleteBatch {
                expected: messages.len(),
                signed: signatures.len(),
            });
        }
        Ok(signatures)
    }

    /// Personal-sign a batch of messages for a named identity, resolving its
    /// owning wallet first.
    #[instrument(skip_all, fields(domain = %domain.name()))]
    pub async fn batch_personal_sign_for_domain(
        &self,
        messages: &[String],
        domain: &DomainIdentity,
    ) -> Result<Vec<String>, SigningError> {
        let owner = domain
            .owner()
            .ok_or_else(|| SigningError::NoWalletOwner(domain.name().to_owned()))?;
        let wallet =
            self.wallets.wallet_by_address(owner).ok_or(SigningError::WalletNotFound(owner))?;
        self.batch_personal_sign(messages, &wallet).await
    }

    fn private_key_for(&self, wallet: &WalletIdentity) -> Result<Zeroizing<String>, SigningError> {
        self.wallets.private_key(wallet.address()).ok_or(SigningError::SigningFailed)
    }
}
