//! Error types.

use crate::types::AxiomId;

/// Failure reported by the external reasoning oracle.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    /// The oracle could not be constructed over the background theory.
    #[error("oracle construction failed: {0}")]
    Construction(String),
    /// A single entailment/satisfiability query failed.
    #[error("oracle query failed: {0}")]
    Query(String),
}

/// Error type for decomposition operations.
///
/// There is no soft-failure mode: a run either produces a complete,
/// internally consistent atom graph or it fails with one of these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecompositionError {
    /// An axiom's module computed empty where one is structurally
    /// impossible. Signals a defect in the axiom model or locality
    /// checker, not a usage error.
    #[error("empty module for axiom {0}: invariant violation")]
    EmptyModule(AxiomId),
    /// Oracle failure (construction or query), propagated untouched.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
