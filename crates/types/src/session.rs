use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Opaque handle into an externally owned session table.
///
/// The transport that issued the handle knows how to reach the counterparty
/// behind it; this SDK only carries it along.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHandle {
    topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    peer_name: Option<String>,
}

impl SessionHandle {
    /// Create a handle from a session topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self { topic: topic.into(), peer_name: None }
    }

    /// Attach the counterparty's display name.
    pub fn with_peer_name(mut self, name: impl Into<String>) -> Self {
        self.peer_name = Some(name.into());
        self
    }

    /// The session topic.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The counterparty's display name, if known.
    pub fn peer_name(&self) -> Option<&str> {
        self.peer_name.as_deref()
    }
}

/// Which remote-signing protocol generation covers a wallet address at
/// lookup time.
///
/// At most one variant is active per address: the multi-session protocol
/// masks the legacy one whenever both registries report sessions, so a stale
/// legacy entry left over after a wallet migrates is never spoken to. Every
/// consumer matches exhaustively; there is no fallback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSession {
    /// A single legacy-protocol session.
    Legacy(SessionHandle),
    /// All live sessions on the multi-session protocol.
    Multi(Vec<SessionHandle>),
}

/// An opaque response payload returned by a signing transport.
///
/// Transports hand back whatever the counterparty sent; unwrapping it into a
/// plain string result is the requester's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireResponse(serde_json::Value);

impl WireResponse {
    /// Wrap a raw response payload.
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Decode the payload as the expected result type.
    pub fn result<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.0.clone())
    }

    /// The raw payload.
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for WireResponse {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}
