//! Locality checking.
//!
//! A locality checker decides, for one axiom and one signature+polarity,
//! whether the axiom adds semantic content once the vocabulary is
//! restricted to that signature. The module fixpoint is built entirely on
//! top of this single question.
//!
//! Two implementations share one case table keyed on axiom shape:
//!
//! - [`SyntacticLocalityChecker`]: pure structural test, O(axiom size),
//!   never errors.
//! - [`SemanticLocalityChecker`]: answers each shape through an external
//!   reasoning oracle; strictly more precise, one or more oracle calls per
//!   axiom per query.

pub mod semantic;
pub mod syntactic;

use crate::error::DecompositionError;
use crate::types::{Axiom, Signature};

pub use semantic::{Reasoner, ReasonerFactory, SemanticLocalityChecker};
pub use syntactic::SyntacticLocalityChecker;

/// Capability contract for locality checking.
///
/// `preprocess` must be called once before any `local` queries against a
/// given axiom population; it establishes whatever background state the
/// checker needs. `local` is evaluated against the currently set signature
/// and its polarity.
pub trait LocalityChecker {
    /// Establish background state for an axiom population.
    fn preprocess(&mut self, axioms: &[&Axiom]) -> Result<(), DecompositionError>;

    /// Replace the signature `local` evaluates against.
    fn set_signature(&mut self, signature: Signature);

    /// The current signature.
    fn signature(&self) -> &Signature;

    /// Mutable access to the current signature (fixpoint growth).
    fn signature_mut(&mut self) -> &mut Signature;

    /// Whether `axiom` is local with respect to the current signature.
    fn local(&mut self, axiom: &Axiom) -> Result<bool, DecompositionError>;
}
