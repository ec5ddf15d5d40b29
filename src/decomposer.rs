//! Atomic decomposer.
//!
//! Orchestrates one decomposition run: preprocess the checker, strip
//! tautologies, seed a synthetic root atom over the remaining axioms,
//! resolve an atom for every axiom through parent-anchored module
//! extraction, then reduce the dependency graph.
//!
//! The anchoring invariant is load-bearing: each atom search runs over its
//! parent atom's module, never the whole ontology. Because a sub-signature's
//! module is always a subset of a super-signature's module, a child module
//! is guaranteed to be a subset of its parent's, which is what makes the
//! size-equality fold test (same size ⇒ same module ⇒ same atom) sound.

use crate::atom::AtomList;
use crate::error::DecompositionError;
use crate::locality::LocalityChecker;
use crate::modularizer::Modularizer;
use crate::ontology::Ontology;
use crate::types::{AtomId, Axiom, AxiomId, ModuleType, Signature};

/// Search anchor for a module extraction: the synthetic whole-ontology
/// root, or a real atom. The root is never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Root,
    Atom(AtomId),
}

/// One suspended `create_atom` activation.
struct Frame {
    axiom: AxiomId,
    parent: Parent,
    atom: Option<AtomId>,
    children: Vec<AxiomId>,
    next: usize,
}

impl Frame {
    fn enter(axiom: AxiomId, parent: Parent) -> Self {
        Self { axiom, parent, atom: None, children: Vec::new(), next: 0 }
    }
}

/// Atomic decomposer of an ontology.
///
/// Owns the axiom arena, the axiom→atom assignment, and the atom graph for
/// the duration of a run. A run is single-threaded and synchronous; for
/// concurrent decompositions use one `Decomposer` per run.
pub struct Decomposer<C: LocalityChecker> {
    ontology: Ontology,
    modularizer: Modularizer<C>,
    module_type: ModuleType,
    /// Transient per-run flag; false while an axiom sits in the tautology
    /// set.
    used: Vec<bool>,
    /// External axiom→atom back-reference; also the recursion memo.
    atom_of: Vec<Option<AtomId>>,
    tautologies: Vec<AxiomId>,
    atoms: AtomList,
    /// Module of the synthetic root: the whole active axiom set.
    root_module: Vec<AxiomId>,
}

impl<C: LocalityChecker> Decomposer<C> {
    /// Create a decomposer over `ontology` using `checker`.
    pub fn new(ontology: Ontology, checker: C) -> Self {
        let n = ontology.len();
        Self {
            ontology,
            modularizer: Modularizer::new(checker),
            module_type: ModuleType::default(),
            used: vec![true; n],
            atom_of: vec![None; n],
            tautologies: Vec::new(),
            atoms: AtomList::new(),
            root_module: Vec::new(),
        }
    }

    /// The ontology being decomposed.
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// The atom graph built by the last `decompose` call.
    pub fn atoms(&self) -> &AtomList {
        &self.atoms
    }

    /// Tautologies found by the last `decompose` call.
    pub fn tautologies(&self) -> &[AxiomId] {
        &self.tautologies
    }

    /// The atom an axiom was assigned to, if any.
    pub fn atom_of(&self, axiom: AxiomId) -> Option<AtomId> {
        self.atom_of[axiom.index()]
    }

    /// Run the decomposition for `module_type` and return the atom graph.
    pub fn decompose(&mut self, module_type: ModuleType) -> Result<&AtomList, DecompositionError> {
        self.module_type = module_type;
        self.atoms = AtomList::new();
        self.used = vec![true; self.ontology.len()];
        self.atom_of = vec![None; self.ontology.len()];
        self.tautologies.clear();

        tracing::info!(axioms = self.ontology.len(), %module_type, "decomposition started");

        let active: Vec<&Axiom> = self.ontology.axioms().iter().collect();
        self.modularizer.preprocess(&active)?;

        self.remove_tautologies()?;
        self.root_module = self
            .ontology
            .ids()
            .filter(|id| self.used[id.index()])
            .collect();

        // Everything non-local under the empty signature is required by
        // every module: fold it into one bottom atom up front.
        let mut empty = Signature::new();
        empty.set_locality(self.module_type);
        if let Some(bottom) = self.build_module(empty, Parent::Root)? {
            let module = self.atoms.get(bottom).module().to_vec();
            for id in module {
                self.atoms.get_mut(bottom).add_axiom(id);
                self.atom_of[id.index()] = Some(bottom);
            }
        }

        for id in self.root_module.clone() {
            if self.used[id.index()] && self.atom_of[id.index()].is_none() {
                self.create_atom(id, Parent::Root)?;
            }
        }

        self.restore_tautologies();
        self.atoms.reduce_graph();

        tracing::info!(
            atoms = self.atoms.len(),
            tautologies = self.tautologies.len(),
            "decomposition finished"
        );
        Ok(&self.atoms)
    }

    /// Move axioms local with respect to their own signature into the
    /// tautology set. Runs before atom construction so tautologies never
    /// receive an atom and never appear in any module.
    fn remove_tautologies(&mut self) -> Result<(), DecompositionError> {
        for id in self.ontology.ids().collect::<Vec<_>>() {
            if !self.used[id.index()] {
                continue;
            }
            let mut own = Signature::from_entities(self.ontology.signature_of(id).iter().cloned());
            own.set_locality(self.module_type);
            self.modularizer.extract(&self.ontology, &[id], own)?;
            if self
                .modularizer
                .is_tautology(self.ontology.axiom(id), self.module_type)?
            {
                self.tautologies.push(id);
                self.used[id.index()] = false;
            }
        }
        tracing::debug!(count = self.tautologies.len(), "tautologies removed");
        Ok(())
    }

    fn restore_tautologies(&mut self) {
        for id in &self.tautologies {
            self.used[id.index()] = true;
        }
    }

    /// Extract the module of `seed` anchored at `parent` and wrap it in an
    /// atom. Returns `None` for an empty module, the parent itself when the
    /// module coincides with the parent's (size equality is a sound proxy
    /// for set equality under the anchoring invariant), or a fresh atom.
    fn build_module(
        &mut self,
        seed: Signature,
        parent: Parent,
    ) -> Result<Option<AtomId>, DecompositionError> {
        let candidates: Vec<AxiomId> = match parent {
            Parent::Root => self.root_module.clone(),
            Parent::Atom(p) => self.atoms.get(p).module().to_vec(),
        };
        self.modularizer.extract(&self.ontology, &candidates, seed)?;
        let module = self.modularizer.module().to_vec();
        if module.is_empty() {
            return Ok(None);
        }
        if let Parent::Atom(p) = parent {
            if module.len() == self.atoms.get(p).module().len() {
                return Ok(Some(p));
            }
        }
        let id = self.atoms.new_atom();
        self.atoms.get_mut(id).set_module(module);
        Ok(Some(id))
    }

    /// Resolve the atom for `axiom`, anchored at `parent`.
    ///
    /// Expressed as an explicit worklist with memoization through the
    /// axiom→atom map, so deep dependency chains cannot exhaust the call
    /// stack. Each frame resolves atoms for every other axiom of its
    /// module and records a dependency edge to each.
    fn create_atom(
        &mut self,
        axiom: AxiomId,
        parent: Parent,
    ) -> Result<AtomId, DecompositionError> {
        let mut stack = vec![Frame::enter(axiom, parent)];
        let mut returned: Option<AtomId> = None;

        while !stack.is_empty() {
            let idx = stack.len() - 1;
            if stack[idx].atom.is_none() {
                let ax = stack[idx].axiom;
                if let Some(existing) = self.atom_of[ax.index()] {
                    returned = Some(existing);
                    stack.pop();
                    continue;
                }
                let frame_parent = stack[idx].parent;
                let mut seed =
                    Signature::from_entities(self.ontology.signature_of(ax).iter().cloned());
                seed.set_locality(self.module_type);
                let atom = self
                    .build_module(seed, frame_parent)?
                    .ok_or(DecompositionError::EmptyModule(ax))?;
                self.atoms.get_mut(atom).add_axiom(ax);
                self.atom_of[ax.index()] = Some(atom);
                if Parent::Atom(atom) == frame_parent {
                    // module coincides with the parent's: fold, nothing
                    // more to resolve here
                    returned = Some(atom);
                    stack.pop();
                    continue;
                }
                let children: Vec<AxiomId> = self
                    .atoms
                    .get(atom)
                    .module()
                    .iter()
                    .copied()
                    .filter(|q| *q != ax)
                    .collect();
                let frame = &mut stack[idx];
                frame.atom = Some(atom);
                frame.children = children;
                returned = None;
                continue;
            }

            // past the entry branch every frame carries an atom
            let Some(atom) = stack[idx].atom else { continue };
            if let Some(dep) = returned.take() {
                self.atoms.get_mut(atom).add_dependency(dep);
            }
            if stack[idx].next < stack[idx].children.len() {
                let child = stack[idx].children[stack[idx].next];
                stack[idx].next += 1;
                stack.push(Frame::enter(child, Parent::Atom(atom)));
            } else {
                returned = Some(atom);
                stack.pop();
            }
        }

        returned.ok_or(DecompositionError::EmptyModule(axiom))
    }

    /// Consume the decomposer and hand over everything a query facade
    /// needs: the ontology, the atom graph, the tautology set, and the
    /// axiom→atom map.
    pub(crate) fn into_parts(self) -> (Ontology, AtomList, Vec<AxiomId>, Vec<Option<AtomId>>) {
        (self.ontology, self.atoms, self.tautologies, self.atom_of)
    }

    /// One locality pass: axioms not local with respect to `signature`.
    /// No fixpoint, no anchoring.
    pub fn non_local_axioms(
        &mut self,
        signature: Signature,
    ) -> Result<Vec<AxiomId>, DecompositionError> {
        let checker = self.modularizer.checker_mut();
        checker.set_signature(signature);
        let mut result = Vec::new();
        for id in self.ontology.ids() {
            if !self
                .modularizer
                .checker_mut()
                .local(self.ontology.axiom(id))?
            {
                result.push(id);
            }
        }
        Ok(result)
    }

    /// The module of `signature` over the whole axiom population.
    pub fn module_for_signature(
        &mut self,
        signature: Signature,
    ) -> Result<Vec<AxiomId>, DecompositionError> {
        let candidates: Vec<AxiomId> = self.ontology.ids().collect();
        self.modularizer.extract(&self.ontology, &candidates, signature)?;
        Ok(self.modularizer.module().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locality::SyntacticLocalityChecker;
    use crate::types::ClassExpression;

    fn class(n: &str) -> ClassExpression {
        ClassExpression::class(format!("urn:test#{n}"))
    }

    fn yoga_ontology() -> Ontology {
        Ontology::from_axioms([
            Axiom::sub_class_of(class("PowerYoga"), class("Yoga")),
            Axiom::sub_class_of(class("Yoga"), class("Relaxation")),
            Axiom::sub_class_of(class("Relaxation"), class("Activity")),
        ])
    }

    fn decompose(onto: Ontology) -> Decomposer<SyntacticLocalityChecker> {
        let mut d = Decomposer::new(onto, SyntacticLocalityChecker::new());
        d.decompose(ModuleType::Bottom).unwrap();
        d
    }

    #[test]
    fn test_chain_decomposes_into_three_atoms() {
        let d = decompose(yoga_ontology());
        assert_eq!(d.atoms().len(), 3);
    }

    #[test]
    fn test_chain_dependencies_point_down() {
        let d = decompose(yoga_ontology());
        // each axiom's atom depends exactly on the next axiom's atom
        let a0 = d.atom_of(AxiomId(0)).unwrap();
        let a1 = d.atom_of(AxiomId(1)).unwrap();
        let a2 = d.atom_of(AxiomId(2)).unwrap();
        assert_eq!(d.atoms().get(a0).dependencies().iter().copied().collect::<Vec<_>>(), vec![a1]);
        assert_eq!(d.atoms().get(a1).dependencies().iter().copied().collect::<Vec<_>>(), vec![a2]);
        assert!(d.atoms().get(a2).dependencies().is_empty());
    }

    #[test]
    fn test_every_axiom_has_exactly_one_atom() {
        let d = decompose(yoga_ontology());
        for id in d.ontology().ids() {
            assert!(d.atom_of(id).is_some());
        }
        let total: usize = d.atoms().iter().map(|a| a.axioms().len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_atom_module_contains_its_axioms() {
        let d = decompose(yoga_ontology());
        for atom in d.atoms().iter() {
            for ax in atom.axioms() {
                assert!(atom.module().contains(ax));
            }
        }
    }

    #[test]
    fn test_tautology_is_removed_and_restored() {
        let onto = Ontology::from_axioms([
            Axiom::sub_class_of(class("c"), ClassExpression::Thing),
            Axiom::sub_class_of(class("a"), class("b")),
        ]);
        let d = decompose(onto);
        assert_eq!(d.tautologies(), &[AxiomId(0)]);
        assert_eq!(d.atoms().len(), 1);
        assert!(d.atom_of(AxiomId(0)).is_none());
        // restored for downstream module queries
        assert!(d.used[0]);
    }

    #[test]
    fn test_empty_ontology_is_valid() {
        let d = decompose(Ontology::new());
        assert!(d.atoms().is_empty());
        assert!(d.tautologies().is_empty());
    }

    #[test]
    fn test_fully_tautological_ontology() {
        let onto = Ontology::from_axioms([
            Axiom::sub_class_of(class("a"), ClassExpression::Thing),
            Axiom::sub_class_of(ClassExpression::Nothing, class("b")),
        ]);
        let d = decompose(onto);
        assert!(d.atoms().is_empty());
        assert_eq!(d.tautologies().len(), 2);
    }

    #[test]
    fn test_shared_module_axioms_share_an_atom() {
        // a ≡ b and b ≡ a-style mutual dependency: both axioms pull each
        // other into their modules, so they land in one atom
        let onto = Ontology::from_axioms([
            Axiom::EquivalentClasses(vec![class("a"), class("b")]),
            Axiom::EquivalentClasses(vec![class("b"), class("c")]),
            Axiom::sub_class_of(class("d"), class("a")),
        ]);
        let d = decompose(onto);
        let eq1 = d.atom_of(AxiomId(0)).unwrap();
        let eq2 = d.atom_of(AxiomId(1)).unwrap();
        assert_eq!(eq1, eq2, "mutually dependent equivalences share an atom");
        let sub = d.atom_of(AxiomId(2)).unwrap();
        assert_ne!(sub, eq1);
        assert!(d.atoms().get(sub).dependencies().contains(&eq1));
    }

    #[test]
    fn test_bottom_content_folds_into_one_atom() {
        // same-individual axioms are never local: they are non-local even
        // under the empty signature and form the bottom content
        let x = crate::types::Entity::individual("urn:test#x");
        let y = crate::types::Entity::individual("urn:test#y");
        let onto = Ontology::from_axioms([
            Axiom::SameIndividual(vec![x.clone(), y.clone()]),
            Axiom::DifferentIndividuals(vec![x, crate::types::Entity::individual("urn:test#z")]),
        ]);
        let d = decompose(onto);
        assert_eq!(d.atoms().len(), 1);
        assert_eq!(d.atoms().get(AtomId(0)).axioms().len(), 2);
    }

    #[test]
    fn test_top_polarity_produces_valid_graph() {
        let mut d = Decomposer::new(yoga_ontology(), SyntacticLocalityChecker::new());
        d.decompose(ModuleType::Top).unwrap();
        // under top locality the chain decomposes top-down instead
        assert_eq!(d.atoms().len(), 3);
        for id in d.ontology().ids() {
            assert!(d.atom_of(id).is_some());
        }
    }

    #[test]
    fn test_module_for_signature() {
        let mut d = decompose(yoga_ontology());
        let mut sig = Signature::from_entities([crate::types::Entity::class("urn:test#Yoga")]);
        sig.set_locality(ModuleType::Bottom);
        let module = d.module_for_signature(sig).unwrap();
        // Yoga ⊑ Relaxation ⊑ Activity, but not PowerYoga ⊑ Yoga
        assert_eq!(module, vec![AxiomId(1), AxiomId(2)]);
    }

    #[test]
    fn test_non_local_axioms_single_pass() {
        let mut d = decompose(yoga_ontology());
        let mut sig = Signature::from_entities([crate::types::Entity::class("urn:test#Yoga")]);
        sig.set_locality(ModuleType::Bottom);
        let non_local = d.non_local_axioms(sig).unwrap();
        // only the axiom whose subclass is in the signature fires without
        // fixpoint growth
        assert_eq!(non_local, vec![AxiomId(1)]);
    }
}
