//! Module extraction.
//!
//! A module is the fixpoint-closed subset of a candidate axiom population
//! that is not local with respect to a growing signature. Extraction is a
//! monotone fixpoint: passes in stable ontology order keep adding non-local
//! axioms (and unioning their signatures into the working signature) until
//! one full pass adds nothing. The module as a *set* is what matters
//! logically; the stable order only makes the sequence reproducible.

use crate::error::DecompositionError;
use crate::locality::LocalityChecker;
use crate::ontology::Ontology;
use crate::types::{Axiom, AxiomId, ModuleType, Signature};

/// Module extractor built on top of a locality checker.
pub struct Modularizer<C: LocalityChecker> {
    checker: C,
    module: Vec<AxiomId>,
    in_module: Vec<bool>,
}

impl<C: LocalityChecker> Modularizer<C> {
    /// Create a modularizer around `checker`.
    pub fn new(checker: C) -> Self {
        Self { checker, module: Vec::new(), in_module: Vec::new() }
    }

    /// Establish checker background state for an axiom population.
    ///
    /// Must be called once before `extract` against that population.
    pub fn preprocess(&mut self, axioms: &[&Axiom]) -> Result<(), DecompositionError> {
        self.checker.preprocess(axioms)
    }

    /// Extract the module of `seed` within `candidates`.
    ///
    /// `candidates` must be in stable ontology order. The seed signature
    /// carries the polarity for the whole extraction; it grows inside the
    /// checker as the fixpoint runs.
    pub fn extract(
        &mut self,
        ontology: &Ontology,
        candidates: &[AxiomId],
        seed: Signature,
    ) -> Result<(), DecompositionError> {
        self.module.clear();
        self.in_module.clear();
        self.in_module.resize(ontology.len(), false);
        self.checker.set_signature(seed);

        loop {
            let mut changed = false;
            for &id in candidates {
                if self.in_module[id.index()] {
                    continue;
                }
                if !self.checker.local(ontology.axiom(id))? {
                    self.module.push(id);
                    self.in_module[id.index()] = true;
                    self.checker.signature_mut().add_all(ontology.signature_of(id).iter());
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        tracing::trace!(
            module_len = self.module.len(),
            signature_len = self.checker.signature().len(),
            "module fixpoint converged"
        );
        Ok(())
    }

    /// The module produced by the last `extract`, in discovery order.
    pub fn module(&self) -> &[AxiomId] {
        &self.module
    }

    /// Whether `axiom` is a tautology under `polarity`: local with respect
    /// to its own signature.
    pub fn is_tautology(
        &mut self,
        axiom: &Axiom,
        polarity: ModuleType,
    ) -> Result<bool, DecompositionError> {
        let mut sig = Signature::from_entities(axiom.signature());
        sig.set_locality(polarity);
        self.checker.set_signature(sig);
        self.checker.local(axiom)
    }

    /// The underlying locality checker.
    pub fn checker_mut(&mut self) -> &mut C {
        &mut self.checker
    }
}
