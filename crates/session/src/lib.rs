//! Session routing and remote sign-request plumbing.
//!
//! A wallet whose key lives in a counterparty app is reachable over one of
//! two mutually incompatible session protocols: the legacy single-session
//! protocol or the newer multi-session protocol. [`SessionRouter`] decides
//! which one currently represents a wallet address, and
//! [`RemoteSignRequester`] performs the round-trip of a sign request over
//! the resolved session.
//!
//! Session tables and the wire protocols themselves are owned by external
//! collaborators, injected through the [`SessionRegistry`],
//! [`LegacyTransport`] and [`MultiTransport`] traits.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod registry;
pub use registry::{SessionRegistry, SessionRouter};

mod requester;
pub use requester::RemoteSignRequester;

mod transport;
pub use transport::{LegacyTransport, MultiTransport};
