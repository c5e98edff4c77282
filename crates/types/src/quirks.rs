//! Vendor-specific workaround catalogue.
//!
//! A handful of external wallet apps deviate from the common signing
//! conventions: some hash `eth_sign` payloads themselves and reject
//! pre-hashed input, and one family insists on seeing personal-sign messages
//! in readable text form. These are compatibility observations, not protocol
//! requirements, so they live in a config table that can be amended without
//! touching the coordinator.

use serde::{Deserialize, Serialize};
use std::env;

/// Env var overriding the vendors that hash `eth_sign` payloads themselves
/// (comma-separated substrings).
pub const SELF_HASHING_VENDORS_ENV: &str = "SIGIL_SELF_HASHING_VENDORS";

/// Env var overriding the vendors that want personal-sign messages rewritten
/// into readable text (comma-separated substrings).
pub const READABLE_VENDORS_ENV: &str = "SIGIL_READABLE_VENDORS";

const DEFAULT_SELF_HASHING: &[&str] = &["rainbow", "alpha", "ledger"];
const DEFAULT_READABLE: &[&str] = &["alpha"];

/// Per-vendor signing quirks, matched case-insensitively as substrings of the
/// external wallet's declared name.
///
/// The substring predicate is fragile — there is no capability negotiation
/// behind it, only observed behavior of named wallet apps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorQuirks {
    self_hashing: Vec<String>,
    readable_rewrite: Vec<String>,
}

impl Default for VendorQuirks {
    fn default() -> Self {
        Self::new(
            DEFAULT_SELF_HASHING.iter().map(ToString::to_string),
            DEFAULT_READABLE.iter().map(ToString::to_string),
        )
    }
}

impl VendorQuirks {
    /// Build a quirk table from vendor-name substrings.
    pub fn new(
        self_hashing: impl IntoIterator<Item = impl Into<String>>,
        readable_rewrite: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            self_hashing: normalize(self_hashing),
            readable_rewrite: normalize(readable_rewrite),
        }
    }

    /// Load the table from the environment, falling back to the built-in
    /// catalogue for any var that is unset.
    pub fn from_env() -> Self {
        Self {
            self_hashing: load_list(SELF_HASHING_VENDORS_ENV, DEFAULT_SELF_HASHING),
            readable_rewrite: load_list(READABLE_VENDORS_ENV, DEFAULT_READABLE),
        }
    }

    /// True if the named vendor hashes `eth_sign` payloads itself, so the
    /// message must be forwarded unhashed.
    pub fn hashes_internally(&self, vendor_name: Option<&str>) -> bool {
        matches_any(&self.self_hashing, vendor_name)
    }

    /// True if the named vendor wants personal-sign messages rewritten into
    /// their readable text form before signing.
    pub fn prefers_readable(&self, vendor_name: Option<&str>) -> bool {
        matches_any(&self.readable_rewrite, vendor_name)
    }
}

fn normalize(items: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.into().trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn matches_any(needles: &[String], vendor_name: Option<&str>) -> bool {
    let Some(name) = vendor_name else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    needles.iter().any(|needle| name.contains(needle))
}

fn load_list(key: &str, default: &[&str]) -> Vec<String> {
    match env::var(key) {
        Ok(raw) => normalize(raw.split(',')),
        Err(_) => default.iter().map(ToString::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogue() {
        let quirks = VendorQuirks::default();
        assert!(quirks.hashes_internally(Some("Rainbow Wallet")));
        assert!(quirks.hashes_internally(Some("LEDGER Live")));
        assert!(quirks.hashes_internally(Some("Alpha Wallet")));
        assert!(!quirks.hashes_internally(Some("MetaMask")));
        assert!(!quirks.hashes_internally(None));

        assert!(quirks.prefers_readable(Some("AlphaWallet")));
        assert!(!quirks.prefers_readable(Some("Rainbow Wallet")));
        assert!(!quirks.prefers_readable(None));
    }

    #[test]
    fn custom_table() {
        let quirks = VendorQuirks::new(["Acme "], Vec::<String>::new());
        assert!(quirks.hashes_internally(Some("acme wallet")));
        assert!(!quirks.prefers_readable(Some("acme wallet")));
    }
}
