//! # atomic-decomposition
//!
//! Deterministic atomic decomposition of ontology axiom sets.
//!
//! The decomposer answers one question:
//!
//! > Given an axiom set, which axioms **stand or fall together**, and
//! > which groups depend on which?
//!
//! ## Core Contract
//!
//! 1. Partition the non-tautological axioms into atoms: maximal groups
//!    whose members share the identical locality-based module
//! 2. Connect the atoms with dependency edges and transitively reduce
//!    the graph
//! 3. Export the result as a stable, ordered bundle of atoms + edges
//!    with a canonical fingerprint for downstream provenance
//!
//! ## Architecture
//!
//! ```text
//! Ontology → Decomposer → AtomList → AtomicDecomposition → DecompositionExport
//!                ↓
//!          Modularizer → LocalityChecker (syntactic or semantic)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same axioms + same polarity → identical atoms, edges, fingerprint
//! - Atom ordering is canonical (by creation order, which is fixed by
//!   the axiom arena order)
//! - Module and axiom ordering is canonical (by AxiomId)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atom;
pub mod canonical;
pub mod decomposer;
pub mod decomposition;
pub mod error;
pub mod locality;
pub mod modularizer;
pub mod ontology;
pub mod types;

// Re-exports
pub use atom::{Atom, AtomList};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use decomposer::Decomposer;
pub use decomposition::AtomicDecomposition;
pub use error::{DecompositionError, OracleError};
pub use locality::{
    LocalityChecker, Reasoner, ReasonerFactory, SemanticLocalityChecker, SyntacticLocalityChecker,
};
pub use modularizer::Modularizer;
pub use ontology::Ontology;
pub use types::export::EXPORT_SCHEMA_VERSION;
pub use types::{
    AtomExport, AtomId, Axiom, AxiomId, ClassExpression, DecompositionExport, Entity, EntityKind,
    ModuleType, PropertyExpression, Signature,
};
