//! Mock session registries and capturing transports.
use alloy::primitives::Address;
use serde_json::json;
use sigil_session::{LegacyTransport, MultiTransport, SessionRegistry};
use sigil_types::{RemoteSessionError, SessionHandle, WireResponse};
use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

/// A mock [`SessionRegistry`] over a fixed session table, counting lookups
/// so tests can assert which signing path ran.
#[derive(Debug, Clone, Default)]
pub struct MockSessionRegistry {
    sessions: HashMap<Address, Vec<SessionHandle>>,
    queries: Arc<AtomicUsize>,
}

impl MockSessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session handle for an address.
    pub fn add_session(&mut self, address: Address, handle: SessionHandle) {
        self.sessions.entry(address).or_default().push(handle);
    }

    /// How many lookups were performed.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl SessionRegistry for MockSessionRegistry {
    fn find_sessions(&self, address: Address) -> Vec<SessionHandle> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.sessions.get(&address).cloned().unwrap_or_default()
    }
}

/// Which transport method a mock captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMethod {
    /// `send_personal_sign`.
    PersonalSign,
    /// `send_eth_sign`.
    EthSign,
    /// `send_sign_typed_data`.
    SignTypedData,
}

/// A request captured by a mock transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// The method invoked.
    pub method: SignMethod,
    /// The session topics addressed.
    pub topics: Vec<String>,
    /// The chain id sent, if the protocol carries one.
    pub chain_id: Option<u64>,
    /// The wallet address the request was for.
    pub address: Address,
    /// The message or payload, exactly as it crossed the trait boundary.
    pub message: String,
}

#[derive(Debug, Default)]
struct TransportState {
    requests: Mutex<Vec<CapturedRequest>>,
    rejections: Mutex<VecDeque<String>>,
}

impl TransportState {
    fn respond(&self, tag: &str, request: CapturedRequest) -> Result<WireResponse, RemoteSessionError> {
        let message = request.message.clone();
        self.requests.lock().unwrap().push(request);
        if let Some(reason) = self.rejections.lock().unwrap().pop_front() {
            return Err(RemoteSessionError::Rejected(reason));
        }
        Ok(WireResponse::new(json!(format!("0x{tag}({message})"))))
    }
}

/// A mock [`LegacyTransport`] that captures every request and answers with
/// `"0xlegacy(<message>)"`, unless a rejection was queued.
#[derive(Debug, Clone, Default)]
pub struct MockLegacyTransport {
    state: Arc<TransportState>,
}

impl MockLegacyTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured requests, in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Queue a rejection for the next request.
    pub fn reject_next(&self, reason: &str) {
        self.state.rejections.lock().unwrap().push_back(reason.to_owned());
    }
}

impl LegacyTransport for MockLegacyTransport {
    async fn send_personal_sign(
        &self,
        session: &SessionHandle,
        address: Address,
        message: &str,
    ) -> Result<WireResponse, RemoteSessionError> {
        self.state.respond(
            "legacy",
            CapturedRequest {
                method: SignMethod::PersonalSign,
                topics: vec![session.topic().to_owned()],
                chain_id: None,
                address,
                message: message.to_owned(),
            },
        )
    }

    async fn send_eth_sign(
        &self,
        session: &SessionHandle,
        address: Address,
        message: &str,
    ) -> Result<WireResponse, RemoteSessionError> {
        self.state.respond(
            "legacy",
            CapturedRequest {
                method: SignMethod::EthSign,
                topics: vec![session.topic().to_owned()],
                chain_id: None,
                address,
                message: message.to_owned(),
            },
        )
    }

    async fn send_sign_typed_data(
        &self,
        session: &SessionHandle,
        address: Address,
        payload: &str,
    ) -> Result<WireResponse, RemoteSessionError> {
        self.state.respond(
            "legacy",
            CapturedRequest {
                method: SignMethod::SignTypedData,
                topics: vec![session.topic().to_owned()],
                chain_id: None,
                address,
                message: payload.to_owned(),
            },
        )
    }
}

/// A mock [`MultiTransport`] that captures every request and answers with
/// `"0xmulti(<message>)"`, unless a rejection was queued.
#[derive(Debug, Clone, Default)]
pub struct MockMultiTransport {
    state: Arc<TransportState>,
}

impl MockMultiTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured requests, in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Queue a rejection for the next request.
    pub fn reject_next(&self, reason: &str) {
        self.state.rejections.lock().unwrap().push_back(reason.to_owned());
    }
}

impl MultiTransport for MockMultiTransport {
    async fn send_personal_sign(
        &self,
        sessions: &[SessionHandle],
        chain_id: u64,
        address: Address,
        message: &str,
    ) -> Result<WireResponse, RemoteSessionError> {
        self.state.respond(
            "multi",
            CapturedRequest {
                method: SignMethod::PersonalSign,
                topics: sessions.iter().map(|s| s.topic().to_owned()).collect(),
                chain_id: Some(chain_id),
                address,
                message: message.to_owned(),
            },
        )
    }

    async fn send_eth_sign(
        &self,
        sessions: &[SessionHandle],
        chain_id: u64,
        address: Address,
        message: &str,
    ) -> Result<WireResponse, RemoteSessionError> {
        self.state.respond(
            "multi",
            CapturedRequest {
                method: SignMethod::EthSign,
                topics: sessions.iter().map(|s| s.topic().to_owned()).collect(),
                chain_id: Some(chain_id),
                address,
                message: message.to_owned(),
            },
        )
    }

    async fn send_sign_typed_data(
        &self,
        sessions: &[SessionHandle],
        chain_id: u64,
        address: Address,
        payload: &str,
    ) -> Result<WireResponse, RemoteSessionError> {
        self.state.respond(
            "multi",
            CapturedRequest {
                method: SignMethod::SignTypedData,
                topics: sessions.iter().map(|s| s.topic().to_owned()).collect(),
                chain_id: Some(chain_id),
                address,
                message: payload.to_owned(),
            },
        )
    }
}
