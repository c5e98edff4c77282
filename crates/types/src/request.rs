use serde::{Deserialize, Serialize};

/// A single signing request, constructed per call and discarded once the
/// signature is returned or the error is raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum SignRequest {
    /// Sign a message under the personal-message envelope.
    Personal(String),
    /// Sign a raw message (`eth_sign` semantics).
    Eth(String),
    /// Sign a serialized EIP-712 typed-data document.
    TypedData(String),
}

impl SignRequest {
    /// The message or payload carried by the request.
    pub fn payload(&self) -> &str {
        match self {
            Self::Personal(m) | Self::Eth(m) | Self::TypedData(m) => m,
        }
    }
}
