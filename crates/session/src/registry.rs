use alloy::primitives::Address;
use sigil_types::{RemoteSession, SessionHandle, SigningError};
use tracing::debug;

/// A read-only view into an externally owned session table.
///
/// Implementors map a wallet address to the session handles currently open
/// for it under one protocol generation.
pub trait SessionRegistry {
    /// All live session handles for the given wallet address.
    fn find_sessions(&self, address: Address) -> Vec<SessionHandle>;
}

impl<T: SessionRegistry> SessionRegistry for &T {
    fn find_sessions(&self, address: Address) -> Vec<SessionHandle> {
        (**self).find_sessions(address)
    }
}

/// Decides which remote-signing protocol generation represents a wallet
/// address, given one registry per protocol.
#[derive(Debug, Clone)]
pub struct SessionRouter<L, M> {
    legacy: L,
    multi: M,
}

impl<L, M> SessionRouter<L, M> {
    /// Create a router over the legacy and multi-session registries.
    pub const fn new(legacy: L, multi: M) -> Self {
        Self { legacy, multi }
    }

    /// The legacy-protocol registry.
    pub const fn legacy(&self) -> &L {
        &self.legacy
    }

    /// The multi-session-protocol registry.
    pub const fn multi(&self) -> &M {
        &self.multi
    }
}

impl<L, M> SessionRouter<L, M>
where
    L: SessionRegistry,
    M: SessionRegistry,
{
    /// Resolve the session covering `address`.
    ///
    /// The multi-session registry wins whenever it has any match — stale
    /// legacy session state can survive a wallet's migration to the newer
    /// protocol, and the legacy registry must not be consulted in that case.
    /// Otherwise the first legacy match is used. No match in either registry
    /// is [`SigningError::NoSessionFound`].
    pub fn resolve(&self, address: Address) -> Result<RemoteSession, SigningError> {
        let multi = self.multi.find_sessions(address);
        if !multi.is_empty() {
            return Ok(RemoteSession::Multi(multi));
        }

        match self.legacy.find_sessions(address).into_iter().next() {
            Some(session) => Ok(RemoteSession::Legacy(session)),
            None => {
                debug!(%address, "no remote signing session in either registry");
                Err(SigningError::NoSessionFound(address))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSessions(Vec<SessionHandle>);

    impl SessionRegistry for FixedSessions {
        fn find_sessions(&self, _address: Address) -> Vec<SessionHandle> {
            self.0.clone()
        }
    }

    fn handle(topic: &str) -> SessionHandle {
        SessionHandle::new(topic)
    }

    #[test]
    fn multi_masks_legacy() {
        let router = SessionRouter::new(
            FixedSessions(vec![handle("legacy-1")]),
            FixedSessions(vec![handle("multi-1"), handle("multi-2")]),
        );

        let resolved = router.resolve(Address::ZERO).unwrap();
        assert_eq!(resolved, RemoteSession::Multi(vec![handle("multi-1"), handle("multi-2")]));
    }

    #[test]
    fn legacy_first_match_when_multi_empty() {
        let router = SessionRouter::new(
            FixedSessions(vec![handle("legacy-1"), handle("legacy-2")]),
            FixedSessions(vec![]),
        );

        let resolved = router.resolve(Address::ZERO).unwrap();
        assert_eq!(resolved, RemoteSession::Legacy(handle("legacy-1")));
    }

    #[test]
    fn no_sessions_anywhere() {
        let router = SessionRouter::new(FixedSessions(vec![]), FixedSessions(vec![]));
        assert!(matches!(
            router.resolve(Address::ZERO),
            Err(SigningError::NoSessionFound(_))
        ));
    }
}
