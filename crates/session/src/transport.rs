use alloy::primitives::Address;
use core::future::Future;
use sigil_types::{RemoteSessionError, SessionHandle, WireResponse};

/// A signing transport for the legacy session protocol.
///
/// Implementors own the wire protocol, the session lifetime, and any
/// timeout; each call suspends until the counterparty responds or the
/// session layer gives up. Errors are reported verbatim as
/// [`RemoteSessionError`].
pub trait LegacyTransport {
    /// Request a personal-message signature from the counterparty.
    fn send_personal_sign(
        &self,
        session: &SessionHandle,
        address: Address,
        message: &str,
    ) -> impl Future<Output = Result<WireResponse, RemoteSessionError>> + Send;

    /// Request a raw-message (`eth_sign`) signature from the counterparty.
    fn send_eth_sign(
        &self,
        session: &SessionHandle,
        address: Address,
        message: &str,
    ) -> impl Future<Output = Result<WireResponse, RemoteSessionError>> + Send;

    /// Request a typed-data signature from the counterparty.
    fn send_sign_typed_data(
        &self,
        session: &SessionHandle,
        address: Address,
        payload: &str,
    ) -> impl Future<Output = Result<WireResponse, RemoteSessionError>> + Send;
}

/// A signing transport for the multi-session protocol.
///
/// Requests address every live session handle for the wallet; the transport
/// decides which one answers. Same lifetime and error contract as
/// [`LegacyTransport`].
pub trait MultiTransport {
    /// Request a personal-message signature from the counterparty.
    fn send_personal_sign(
        &self,
        sessions: &[SessionHandle],
        chain_id: u64,
        address: Address,
        message: &str,
    ) -> impl Future<Output = Result<WireResponse, RemoteSessionError>> + Send;

    /// Request a raw-message (`eth_sign`) signature from the counterparty.
    fn send_eth_sign(
        &self,
        sessions: &[SessionHandle],
        chain_id: u64,
        address: Address,
        message: &str,
    ) -> impl Future<Output = Result<WireResponse, RemoteSessionError>> + Send;

    /// Request a typed-data signature from the counterparty.
    fn send_sign_typed_data(
        &self,
        sessions: &[SessionHandle],
        chain_id: u64,
        address: Address,
        payload: &str,
    ) -> impl Future<Output = Result<WireResponse, RemoteSessionError>> + Send;
}
