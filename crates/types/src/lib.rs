//! Data model and error taxonomy for the sigil signing SDK.
//!
//! Everything here is ephemeral: identities are borrowed for the duration of
//! one signing call, requests are built per call and discarded, and session
//! variants are resolved fresh at lookup time. Key material and session
//! tables are owned by external collaborators.

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

mod error;
pub use error::{RemoteSessionError, SigningError};

mod quirks;
pub use quirks::{VendorQuirks, READABLE_VENDORS_ENV, SELF_HASHING_VENDORS_ENV};

mod request;
pub use request::SignRequest;

mod session;
pub use session::{RemoteSession, SessionHandle, WireResponse};

mod wallet;
pub use wallet::{DomainIdentity, VerificationState, WalletIdentity};
