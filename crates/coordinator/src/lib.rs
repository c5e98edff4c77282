//! The signing coordinator: one entry point for producing signatures
//! against a wallet identity, whether its key is held locally or is
//! reachable only through a remote signing session.
//!
//! The coordinator owns no state across calls and no collaborators of its
//! own. The wallet registry, session registries, and transports are
//! injected at construction; there is no ambient global lookup.

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

mod coordinator;
pub use coordinator::SigningCoordinator;

mod registry;
pub use registry::WalletRegistry;
