//! Serializable snapshot of a finished decomposition.
//!
//! An export carries the full axiom content of every atom rather than
//! arena indexes, so it stays meaningful after the originating ontology
//! is gone and hashes identically for identical inputs.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::types::{Axiom, ModuleType};

/// Schema version stamped into every export; bump on breaking changes.
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One atom of the decomposition, in content form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomExport {
    /// Arena index of the atom within the decomposition.
    pub id: usize,
    /// The axioms that form the atom.
    pub axioms: Vec<Axiom>,
    /// Size of the atom's module (always >= `axioms.len()`).
    pub module_size: usize,
    /// Arena indexes of the direct dependencies after reduction.
    pub dependencies: Vec<usize>,
}

/// A complete decomposition result with a canonical fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionExport {
    /// Export schema version.
    pub schema_version: String,
    /// Polarity the decomposition was computed under.
    pub module_type: ModuleType,
    /// Atoms in arena order.
    pub atoms: Vec<AtomExport>,
    /// Tautologies that were set aside during decomposition.
    pub tautologies: Vec<Axiom>,
    /// SHA-256 over the canonical bytes of everything above.
    pub fingerprint: String,
}

/// Helper mirroring `DecompositionExport` minus the fingerprint field,
/// so the hash covers exactly the payload.
#[derive(Serialize)]
struct FingerprintInput<'a> {
    schema_version: &'a str,
    module_type: &'a ModuleType,
    atoms: &'a [AtomExport],
    tautologies: &'a [Axiom],
}

impl DecompositionExport {
    /// Assemble an export and stamp its fingerprint.
    pub fn new(module_type: ModuleType, atoms: Vec<AtomExport>, tautologies: Vec<Axiom>) -> Self {
        let fingerprint = canonical_hash_hex(&FingerprintInput {
            schema_version: EXPORT_SCHEMA_VERSION,
            module_type: &module_type,
            atoms: &atoms,
            tautologies: &tautologies,
        });
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            module_type,
            atoms,
            tautologies,
            fingerprint,
        }
    }

    /// Recompute the fingerprint and compare against the stored one.
    pub fn verify_fingerprint(&self) -> bool {
        let expected = canonical_hash_hex(&FingerprintInput {
            schema_version: &self.schema_version,
            module_type: &self.module_type,
            atoms: &self.atoms,
            tautologies: &self.tautologies,
        });
        expected == self.fingerprint
    }
}
