//! Canonical serialization for deterministic hashing.
//!
//! Fingerprints over decomposition results must be reproducible across
//! runs and processes for the same input, so everything that gets hashed
//! serializes through this module.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: struct fields serialize in declaration order
//! - Stable Vec order: vectors serialize in index order
//! - No HashMap allowed: use BTreeMap for maps in hashed data

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute the canonical SHA-256 hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> [u8; 32] {
    let bytes = to_canonical_bytes(value);
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    hasher.finalize().into()
}

/// Compute the canonical hash and return it as a hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    hex::encode(canonical_hash(value))
}
