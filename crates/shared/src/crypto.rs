//! Hashing helpers for API key storage.

use sha2::{Digest, Sha256};

/// Prefix every issued API key starts with.
pub const API_KEY_PREFIX: &str = "sg_";

/// Number of characters after [`API_KEY_PREFIX`] kept as a lookup hint.
const KEY_HINT_LEN: usize = 8;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extracts the hint stored alongside a key (first 8 characters after "sg_").
pub fn extract_key_prefix(key: &str) -> Option<&str> {
    let rest = key.strip_prefix(API_KEY_PREFIX)?;
    rest.get(..KEY_HINT_LEN)
}

/// Returns true when the key has the shape of an issued key.
pub fn is_well_formed_key(key: &str) -> bool {
    extract_key_prefix(key).is_some()
}
