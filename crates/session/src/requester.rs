use crate::{LegacyTransport, MultiTransport};
use alloy::primitives::Address;
use sigil_encoding::{hash_personal_message, hex_decode, hex_encode_prefixed, is_hex_encoded};
use sigil_types::{
    RemoteSession, SignRequest, SigningError, VendorQuirks, WalletIdentity, WireResponse,
};
use std::borrow::Cow;
use tracing::{debug, instrument, warn};

/// The chain id attached to every outgoing sign request.
///
/// The value is immaterial: personal and raw messages carry no chain
/// binding, and a typed-data payload pins its chain in its own domain
/// separator.
const SIGN_REQUEST_CHAIN_ID: u64 = 1;

/// Performs the network round-trip of a sign request over a resolved
/// [`RemoteSession`], applying the per-request encoding policy before
/// sending and unwrapping the counterparty's response afterwards.
///
/// Owns no timeout: each send suspends until the transport's own session
/// lifetime resolves it.
#[derive(Debug, Clone)]
pub struct RemoteSignRequester<T1, T2> {
    legacy: T1,
    multi: T2,
    quirks: VendorQuirks,
}

impl<T1, T2> RemoteSignRequester<T1, T2> {
    /// Create a requester over one transport per protocol generation.
    pub const fn new(legacy: T1, multi: T2, quirks: VendorQuirks) -> Self {
        Self { legacy, multi, quirks }
    }

    /// The vendor-quirk table consulted for `eth_sign` requests.
    pub const fn quirks(&self) -> &VendorQuirks {
        &self.quirks
    }
}

impl<T1, T2> RemoteSignRequester<T1, T2>
where
    T1: LegacyTransport,
    T2: MultiTransport,
{
    /// Send a sign request over the resolved session and await the
    /// counterparty's answer, unwrapped to the plain signature string.
    #[instrument(skip_all, fields(wallet = %wallet.address()))]
    pub async fn send(
        &self,
        session: &RemoteSession,
        request: &SignRequest,
        wallet: &WalletIdentity,
    ) -> Result<String, SigningError> {
        let address = wallet.address();
        let response = match request {
            SignRequest::Personal(message) => self.send_personal(session, address, message).await?,
            SignRequest::Eth(message) => {
                let message =
                    prepare_eth_message(&self.quirks, message, wallet.external_wallet_name())?;
                match session {
                    RemoteSession::Legacy(handle) => {
                        self.legacy.send_eth_sign(handle, address, &message).await?
                    }
                    RemoteSession::Multi(handles) => {
                        self.multi
                            .send_eth_sign(handles, SIGN_REQUEST_CHAIN_ID, address, &message)
                            .await?
                    }
                }
            }
            SignRequest::TypedData(payload) => match session {
                RemoteSession::Legacy(handle) => {
                    self.legacy.send_sign_typed_data(handle, address, payload).await?
                }
                RemoteSession::Multi(handles) => {
                    self.multi
                        .send_sign_typed_data(handles, SIGN_REQUEST_CHAIN_ID, address, payload)
                        .await?
                }
            },
        };
        unwrap_response(&response)
    }

    async fn send_personal(
        &self,
        session: &RemoteSession,
        address: Address,
        message: &str,
    ) -> Result<WireResponse, SigningError> {
        match session {
            RemoteSession::Legacy(handle) => {
                // Legacy counterparties display the message before
                // approving, so hex that is really text goes over the wire
                // in its readable form.
                let message = legacy_personal_message(message)?;
                Ok(self.legacy.send_personal_sign(handle, address, &message).await?)
            }
            RemoteSession::Multi(handles) => Ok(self
                .multi
                .send_personal_sign(handles, SIGN_REQUEST_CHAIN_ID, address, message)
                .await?),
        }
    }
}

/// Apply the vendor hashing policy to an `eth_sign` message.
///
/// Vendors known to hash the payload themselves get it unhashed; everyone
/// else gets the personal-message hash of the hex-decoded payload,
/// hex-encoded. This is a workaround catalogue, not a protocol rule.
fn prepare_eth_message(
    quirks: &VendorQuirks,
    message: &str,
    vendor_name: Option<&str>,
) -> Result<String, SigningError> {
    if quirks.hashes_internally(vendor_name) {
        debug!(vendor = ?vendor_name, "vendor hashes eth_sign payloads itself, forwarding unhashed");
        return Ok(message.to_owned());
    }
    let payload = hex_decode(message).map_err(SigningError::hashing)?;
    Ok(hex_encode_prefixed(hash_personal_message(payload)))
}

/// Rewrite a hex-encoded message into UTF-8 text for the legacy wire form.
fn legacy_personal_message(message: &str) -> Result<Cow<'_, str>, SigningError> {
    if !is_hex_encoded(message) {
        return Ok(Cow::Borrowed(message));
    }
    let bytes = hex_decode(message).map_err(SigningError::hashing)?;
    String::from_utf8(bytes).map(Cow::Owned).map_err(SigningError::decoding)
}

/// The counterparty's response must be a plain string payload.
fn unwrap_response(response: &WireResponse) -> Result<String, SigningError> {
    response
        .result::<String>()
        .inspect_err(|e| warn!(%e, "remote response did not decode as a string"))
        .map_err(SigningError::decoding)
}
