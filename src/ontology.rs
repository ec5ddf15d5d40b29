//! The axiom source.
//!
//! An [`Ontology`] is an ordered, duplicate-free arena of axioms. Insertion
//! order is the canonical pass order for every fixpoint loop, so repeated
//! decompositions of the same ontology are reproducible. Each axiom's
//! signature is computed once at insertion and cached alongside it.

use std::collections::{BTreeSet, HashMap};

use crate::types::{Axiom, AxiomId, Entity};

/// Ordered arena of axioms with cached signatures.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    axioms: Vec<Axiom>,
    signatures: Vec<BTreeSet<Entity>>,
    index: HashMap<Axiom, AxiomId>,
}

impl Ontology {
    /// Create an empty ontology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an ontology from an axiom sequence, preserving order.
    pub fn from_axioms<I: IntoIterator<Item = Axiom>>(axioms: I) -> Self {
        let mut onto = Self::new();
        for ax in axioms {
            onto.add(ax);
        }
        onto
    }

    /// Add an axiom, returning its handle.
    ///
    /// Axiom sets are sets: adding an axiom identical to an existing one
    /// returns the existing handle instead of growing the arena.
    pub fn add(&mut self, axiom: Axiom) -> AxiomId {
        if let Some(&id) = self.index.get(&axiom) {
            return id;
        }
        let id = AxiomId(self.axioms.len());
        self.signatures.push(axiom.signature());
        self.index.insert(axiom.clone(), id);
        self.axioms.push(axiom);
        id
    }

    /// The axiom behind a handle.
    pub fn axiom(&self, id: AxiomId) -> &Axiom {
        &self.axioms[id.0]
    }

    /// The cached signature of an axiom.
    pub fn signature_of(&self, id: AxiomId) -> &BTreeSet<Entity> {
        &self.signatures[id.0]
    }

    /// The handle of a previously added axiom.
    pub fn id_of(&self, axiom: &Axiom) -> Option<AxiomId> {
        self.index.get(axiom).copied()
    }

    /// All handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = AxiomId> + '_ {
        (0..self.axioms.len()).map(AxiomId)
    }

    /// All axioms in insertion order.
    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    /// Number of axioms.
    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    /// Whether the ontology holds no axioms.
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// The union of all axiom signatures.
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        for sig in &self.signatures {
            out.extend(sig.iter().cloned());
        }
        out
    }
}
