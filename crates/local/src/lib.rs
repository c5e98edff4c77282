//! Local-key signing for wallets whose key material is held in-process.
//!
//! Signatures are deterministic secp256k1 with the recovery id embedded, so
//! verifiers can recover the signer's address from the signature and message
//! hash alone.
//!
//! Key material handling is governed by one hard invariant: any buffer a
//! private key is copied into is zeroed before control returns to the caller,
//! on every exit path — success, failure, or unwind.

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

use alloy::{
    primitives::{B256, Signature},
    signers::{local::PrivateKeySigner, SignerSync},
};
use sigil_encoding::{
    hash_personal_message, hex_decode, hex_encode_prefixed, is_hex_encoded, strip_hex_prefix,
};
use sigil_types::SigningError;
use zeroize::Zeroize;

/// Zeroes the borrowed key buffer when dropped, so the scrub happens on
/// every exit path including unwinds.
struct KeyGuard<'a>(&'a mut [u8; 32]);

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Sign a 32-byte message hash with a raw private key, producing a
/// recoverable signature.
///
/// The key buffer is zeroed before this function returns, whether signing
/// succeeds or not. A malformed key (not a valid curve scalar) fails with
/// [`SigningError::SigningFailed`].
pub fn sign_hash(hash: &B256, private_key: &mut [u8; 32]) -> Result<Signature, SigningError> {
    let guard = KeyGuard(private_key);
    let signer =
        PrivateKeySigner::from_slice(&guard.0[..]).map_err(|_| SigningError::SigningFailed)?;
    signer.sign_hash_sync(hash).map_err(|_| SigningError::SigningFailed)
}

/// Sign a 32-byte message hash with a hex-encoded private key.
///
/// The intermediate key buffer obeys the same zeroing rule as [`sign_hash`].
pub fn sign_hash_hex(hash: &B256, private_key_hex: &str) -> Result<Signature, SigningError> {
    let mut key = [0u8; 32];
    if hex::decode_to_slice(strip_hex_prefix(private_key_hex), &mut key).is_err() {
        key.zeroize();
        return Err(SigningError::SigningFailed);
    }
    sign_hash(hash, &mut key)
}

/// Sign a payload under the personal-message envelope.
pub fn sign_personal_message(
    payload: impl AsRef<[u8]>,
    private_key_hex: &str,
) -> Result<Signature, SigningError> {
    sign_hash_hex(&hash_personal_message(payload), private_key_hex)
}

/// Personal-sign a message string, returning the `0x`-prefixed hex encoding
/// of the 65-byte recoverable signature.
///
/// A hex-encoded message is decoded and its raw bytes become the payload —
/// the convention for messages that are already a precomputed hash. Anything
/// else is signed as its UTF-8 bytes.
pub fn sign_personal_as_hex(message: &str, private_key_hex: &str) -> Result<String, SigningError> {
    let signature = if is_hex_encoded(message) {
        let payload = hex_decode(message).map_err(SigningError::hashing)?;
        sign_personal_message(payload, private_key_hex)?
    } else {
        sign_personal_message(message.as_bytes(), private_key_hex)?
    };
    Ok(hex_encode_prefixed(signature.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    const TEST_KEY: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";

    fn test_key_bytes() -> [u8; 32] {
        [0x01; 32]
    }

    fn signer_address() -> alloy::primitives::Address {
        PrivateKeySigner::from_slice(&test_key_bytes()).unwrap().address()
    }

    #[test]
    fn key_is_zeroed_on_success() {
        let hash = b256!("0x50b2c43fd39106bafbba0da34fc430e1f91e3c96ea2acee2bc34119f92b37750");
        let mut key = test_key_bytes();
        sign_hash(&hash, &mut key).unwrap();
        assert_eq!(key, [0u8; 32]);
    }

    #[test]
    fn key_is_zeroed_on_failure() {
        // 0xff.. exceeds the curve order, so signer construction fails.
        let hash = B256::ZERO;
        let mut key = [0xffu8; 32];
        assert!(matches!(sign_hash(&hash, &mut key), Err(SigningError::SigningFailed)));
        assert_eq!(key, [0u8; 32]);
    }

    #[test]
    fn malformed_hex_key_fails() {
        let hash = B256::ZERO;
        assert!(sign_hash_hex(&hash, "0xnot-a-key").is_err());
        assert!(sign_hash_hex(&hash, "0xabcd").is_err()); // too short
    }

    #[test]
    fn signature_recovers_signer() {
        let hash = hash_personal_message("hello");
        let signature = sign_hash_hex(&hash, TEST_KEY).unwrap();
        assert_eq!(signature.recover_address_from_prehash(&hash).unwrap(), signer_address());
    }

    #[test]
    fn signing_is_deterministic() {
        let hash = hash_personal_message("hello");
        let a = sign_hash_hex(&hash, TEST_KEY).unwrap();
        let b = sign_hash_hex(&hash, TEST_KEY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn personal_hex_signature_shape() {
        let signature = sign_personal_as_hex("hello", TEST_KEY).unwrap();
        assert!(signature.starts_with("0x"));
        // 65 bytes -> 130 hex chars.
        assert_eq!(signature.len(), 132);
    }

    #[test]
    fn hex_message_signs_decoded_bytes() {
        // "0x68656c6c6f" decodes to b"hello", so both forms sign the same
        // payload.
        let from_hex = sign_personal_as_hex("0x68656c6c6f", TEST_KEY).unwrap();
        let from_text = sign_personal_as_hex("hello", TEST_KEY).unwrap();
        assert_eq!(from_hex, from_text);
    }
}
