//! Hex codecs and message-hashing transforms shared across the sigil SDK.
//!
//! Everything in this crate is a pure function. Signing components and remote
//! transports must agree bit-for-bit on these transforms, so they live in one
//! leaf crate with no I/O and no state.

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

use alloy::primitives::{keccak256, B256};
use std::borrow::Cow;

/// The `0x` marker carried by hex-encoded strings.
pub const HEX_PREFIX: &str = "0x";

/// Prefix of the EIP-191 personal-message envelope. The decimal byte length
/// of the payload is appended before the payload itself.
const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// True if the string carries a `0x`/`0X` prefix.
pub fn has_hex_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2 && b[0] == b'0' && (b[1] == b'x' || b[1] == b'X')
}

/// Remove a single leading `0x`/`0X` if present. Idempotent.
pub fn strip_hex_prefix(s: &str) -> &str {
    if has_hex_prefix(s) {
        &s[2..]
    } else {
        s
    }
}

/// True iff the prefix-stripped string is wholly made of ASCII hex digits and
/// has even length. The empty string qualifies.
pub fn is_hex_encoded(s: &str) -> bool {
    let stripped = strip_hex_prefix(s);
    stripped.len() % 2 == 0 && stripped.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Encode bytes as lowercase hex without a prefix.
pub fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Encode bytes as lowercase hex with the `0x` prefix.
pub fn hex_encode_prefixed(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(bytes)
}

/// Decode a hex string, tolerating a `0x`/`0X` prefix.
pub fn hex_decode(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(strip_hex_prefix(s))
}

/// Hash a payload with the EIP-191 personal-message envelope:
/// `keccak256("\x19Ethereum Signed Message:\n" + len(payload) + payload)`.
///
/// External wallets and the local signer must agree on this transform
/// bit-for-bit; it is what distinguishes a personal-sign signature from a
/// transaction-hash signature.
pub fn hash_personal_message(payload: impl AsRef<[u8]>) -> B256 {
    let payload = payload.as_ref();
    let len = payload.len().to_string();

    let mut preimage =
        Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + len.len() + payload.len());
    preimage.extend_from_slice(PERSONAL_MESSAGE_PREFIX.as_bytes());
    preimage.extend_from_slice(len.as_bytes());
    preimage.extend_from_slice(payload);

    keccak256(preimage)
}

/// Rewrite a hex-encoded message into its human-readable form, if it has one.
///
/// Some counterparty wallets display the message verbatim before signing, so
/// a hex blob that is really UTF-8 text is decoded back to the text. Anything
/// that is not hex, or does not decode to valid UTF-8, passes through
/// unchanged.
pub fn readable_message(s: &str) -> Cow<'_, str> {
    if !is_hex_encoded(s) {
        return Cow::Borrowed(s);
    }
    let Ok(bytes) = hex_decode(s) else {
        return Cow::Borrowed(s);
    };
    match String::from_utf8(bytes) {
        Ok(text) => Cow::Owned(text),
        Err(_) => Cow::Borrowed(s),
    }
}
