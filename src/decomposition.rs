//! Query facade over a finished decomposition.
//!
//! [`AtomicDecomposition`] runs the decomposer once at construction,
//! then freezes the result: the atom graph, a single edge list with
//! derived forward and reverse adjacency, a term→atoms index, and the
//! axiom→atom map. All queries take `&self`; the only interior
//! mutability is a memo for transitive dependent sets, so a frozen
//! decomposition can be shared across threads.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use parking_lot::RwLock;

use crate::atom::{Atom, AtomList};
use crate::decomposer::Decomposer;
use crate::error::DecompositionError;
use crate::locality::{LocalityChecker, SyntacticLocalityChecker};
use crate::ontology::Ontology;
use crate::types::{AtomExport, AtomId, Axiom, AxiomId, DecompositionExport, Entity, ModuleType};

/// A frozen atomic decomposition of an ontology.
pub struct AtomicDecomposition {
    ontology: Ontology,
    module_type: ModuleType,
    atoms: AtomList,
    tautologies: Vec<AxiomId>,
    atom_of: Vec<Option<AtomId>>,
    /// Every direct dependency edge, source→target, after reduction.
    edges: Vec<(AtomId, AtomId)>,
    /// Reverse adjacency derived from `edges`.
    dependents: BTreeMap<AtomId, BTreeSet<AtomId>>,
    /// Union of the signatures of each atom's own axioms.
    atom_signatures: Vec<BTreeSet<Entity>>,
    /// Entity → atoms whose axioms mention it.
    term_index: BTreeMap<Entity, BTreeSet<AtomId>>,
    /// Memo for `dependents_closure`; filled on demand.
    dependents_memo: RwLock<HashMap<AtomId, BTreeSet<AtomId>>>,
}

impl AtomicDecomposition {
    /// Decompose `ontology` under syntactic locality.
    pub fn new(ontology: Ontology, module_type: ModuleType) -> Result<Self, DecompositionError> {
        Self::with_checker(ontology, SyntacticLocalityChecker::new(), module_type)
    }

    /// Decompose `ontology` with a caller-supplied locality checker.
    pub fn with_checker<C: LocalityChecker>(
        ontology: Ontology,
        checker: C,
        module_type: ModuleType,
    ) -> Result<Self, DecompositionError> {
        let mut decomposer = Decomposer::new(ontology, checker);
        decomposer.decompose(module_type)?;
        let (ontology, atoms, tautologies, atom_of) = decomposer.into_parts();

        let mut edges = Vec::new();
        let mut dependents: BTreeMap<AtomId, BTreeSet<AtomId>> = BTreeMap::new();
        for atom in atoms.iter() {
            for &dep in atom.dependencies() {
                edges.push((atom.id(), dep));
                dependents.entry(dep).or_default().insert(atom.id());
            }
        }

        let mut atom_signatures = Vec::with_capacity(atoms.len());
        let mut term_index: BTreeMap<Entity, BTreeSet<AtomId>> = BTreeMap::new();
        for atom in atoms.iter() {
            let mut sig = BTreeSet::new();
            for &ax in atom.axioms() {
                sig.extend(ontology.signature_of(ax).iter().cloned());
            }
            for entity in &sig {
                term_index.entry(entity.clone()).or_default().insert(atom.id());
            }
            atom_signatures.push(sig);
        }

        Ok(Self {
            ontology,
            module_type,
            atoms,
            tautologies,
            atom_of,
            edges,
            dependents,
            atom_signatures,
            term_index,
            dependents_memo: RwLock::new(HashMap::new()),
        })
    }

    /// The ontology that was decomposed.
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// Polarity the decomposition was computed under.
    pub fn module_type(&self) -> ModuleType {
        self.module_type
    }

    /// Number of atoms.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the decomposition has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterate over the atoms in arena order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    /// The atom with the given id. Panics when `id` is out of range.
    pub fn atom(&self, id: AtomId) -> &Atom {
        self.atoms.get(id)
    }

    /// Axioms that were set aside as tautologies.
    pub fn tautologies(&self) -> impl Iterator<Item = &Axiom> {
        self.tautologies.iter().map(|&id| self.ontology.axiom(id))
    }

    /// Ids of the tautology axioms.
    pub fn tautology_ids(&self) -> &[AxiomId] {
        &self.tautologies
    }

    /// The atom an axiom id was assigned to. Tautologies have none.
    pub fn atom_of(&self, axiom: AxiomId) -> Option<AtomId> {
        self.atom_of.get(axiom.index()).copied().flatten()
    }

    /// Look up the atom of an axiom by content.
    pub fn atom_for_axiom(&self, axiom: &Axiom) -> Option<AtomId> {
        self.ontology.id_of(axiom).and_then(|id| self.atom_of(id))
    }

    /// The axioms of an atom, resolved against the ontology.
    pub fn axioms_of(&self, atom: AtomId) -> impl Iterator<Item = &Axiom> {
        self.atoms.get(atom).axioms().iter().map(|&id| self.ontology.axiom(id))
    }

    /// Entities mentioned by an atom's own axioms.
    pub fn atom_signature(&self, atom: AtomId) -> &BTreeSet<Entity> {
        &self.atom_signatures[atom.index()]
    }

    /// The term→atoms index over the whole decomposition.
    pub fn term_index(&self) -> &BTreeMap<Entity, BTreeSet<AtomId>> {
        &self.term_index
    }

    /// Atoms whose axioms mention `entity`.
    pub fn atoms_for_term(&self, entity: &Entity) -> BTreeSet<AtomId> {
        self.term_index.get(entity).cloned().unwrap_or_default()
    }

    /// Every direct dependency edge, source→target.
    pub fn edges(&self) -> &[(AtomId, AtomId)] {
        &self.edges
    }

    /// Direct dependencies of an atom (transitively reduced).
    pub fn dependencies(&self, atom: AtomId) -> &BTreeSet<AtomId> {
        self.atoms.get(atom).dependencies()
    }

    /// All atoms an atom depends on, directly or transitively, including
    /// the atom itself: a bottom atom's closure is exactly `{atom}`.
    pub fn dependencies_closure(&self, atom: AtomId) -> BTreeSet<AtomId> {
        let mut closure = match self.atoms.get(atom).all_dependencies() {
            Some(all) => all.clone(),
            // reduce_graph fills the closure for every atom; this path
            // only runs for a graph that was never reduced
            None => self.bfs(atom, |a| self.atoms.get(a).dependencies().clone()),
        };
        closure.insert(atom);
        closure
    }

    /// Atoms that directly depend on `atom`.
    pub fn direct_dependents(&self, atom: AtomId) -> BTreeSet<AtomId> {
        self.dependents.get(&atom).cloned().unwrap_or_default()
    }

    /// All atoms that depend on `atom`, directly or transitively,
    /// including the atom itself. Memoized per atom.
    pub fn dependents_closure(&self, atom: AtomId) -> BTreeSet<AtomId> {
        if let Some(hit) = self.dependents_memo.read().get(&atom) {
            return hit.clone();
        }
        let mut closure = self.bfs(atom, |a| self.direct_dependents(a));
        closure.insert(atom);
        self.dependents_memo.write().insert(atom, closure.clone());
        closure
    }

    /// Reachable set excluding `start` (unless it sits on a cycle, which
    /// the reduced graph never has).
    fn bfs<F>(&self, start: AtomId, neighbors: F) -> BTreeSet<AtomId>
    where
        F: Fn(AtomId) -> BTreeSet<AtomId>,
    {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in neighbors(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen.remove(&start);
        seen
    }

    /// Whether an atom depends on nothing.
    pub fn is_bottom_atom(&self, atom: AtomId) -> bool {
        self.atoms.get(atom).dependencies().is_empty()
    }

    /// Whether nothing depends on an atom.
    pub fn is_top_atom(&self, atom: AtomId) -> bool {
        self.dependents.get(&atom).map_or(true, BTreeSet::is_empty)
    }

    /// Atoms with no outgoing dependency edges.
    pub fn bottom_atoms(&self) -> Vec<AtomId> {
        self.atoms
            .iter()
            .filter(|a| a.dependencies().is_empty())
            .map(Atom::id)
            .collect()
    }

    /// Atoms with no incoming dependency edges.
    pub fn top_atoms(&self) -> Vec<AtomId> {
        self.atoms
            .iter()
            .map(Atom::id)
            .filter(|&id| self.is_top_atom(id))
            .collect()
    }

    /// Atoms reachable from `atom` treating edges as undirected; the
    /// weakly connected component, including `atom` itself.
    pub fn related_atoms(&self, atom: AtomId) -> BTreeSet<AtomId> {
        let mut component = self.bfs(atom, |a| {
            let mut both = self.atoms.get(a).dependencies().clone();
            both.extend(self.direct_dependents(a));
            both
        });
        component.insert(atom);
        component
    }

    /// The principal ideal of an atom: its own axioms plus the axioms of
    /// everything it depends on, in axiom-id order. A principal ideal is
    /// a self-contained module.
    pub fn principal_ideal(&self, atom: AtomId) -> Vec<&Axiom> {
        self.principal_ideal_ids(atom)
            .into_iter()
            .map(|id| self.ontology.axiom(id))
            .collect()
    }

    /// Axiom ids of the principal ideal of an atom.
    pub fn principal_ideal_ids(&self, atom: AtomId) -> BTreeSet<AxiomId> {
        let mut ids = BTreeSet::new();
        for dep in self.dependencies_closure(atom) {
            ids.extend(self.atoms.get(dep).axioms().iter().copied());
        }
        ids
    }

    /// Entities mentioned by the principal ideal of an atom.
    pub fn principal_ideal_signature(&self, atom: AtomId) -> BTreeSet<Entity> {
        let mut sig = BTreeSet::new();
        for id in self.principal_ideal_ids(atom) {
            sig.extend(self.ontology.signature_of(id).iter().cloned());
        }
        sig
    }

    /// Snapshot the decomposition into a serializable, fingerprinted
    /// export.
    pub fn export(&self) -> DecompositionExport {
        let atoms = self
            .atoms
            .iter()
            .map(|atom| AtomExport {
                id: atom.id().index(),
                axioms: atom
                    .axioms()
                    .iter()
                    .map(|&id| self.ontology.axiom(id).clone())
                    .collect(),
                module_size: atom.module().len(),
                dependencies: atom.dependencies().iter().map(|d| d.index()).collect(),
            })
            .collect();
        let tautologies = self
            .tautologies
            .iter()
            .map(|&id| self.ontology.axiom(id).clone())
            .collect();
        DecompositionExport::new(self.module_type, atoms, tautologies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassExpression;

    fn class(n: &str) -> ClassExpression {
        ClassExpression::class(format!("urn:test#{n}"))
    }

    fn entity(n: &str) -> Entity {
        Entity::class(format!("urn:test#{n}"))
    }

    fn yoga() -> AtomicDecomposition {
        let onto = Ontology::from_axioms([
            Axiom::sub_class_of(class("PowerYoga"), class("Yoga")),
            Axiom::sub_class_of(class("Yoga"), class("Relaxation")),
            Axiom::sub_class_of(class("Relaxation"), class("Activity")),
        ]);
        AtomicDecomposition::new(onto, ModuleType::Bottom).unwrap()
    }

    #[test]
    fn test_atom_for_axiom_by_content() {
        let ad = yoga();
        let ax = Axiom::sub_class_of(class("Yoga"), class("Relaxation"));
        let atom = ad.atom_for_axiom(&ax).unwrap();
        assert!(ad.axioms_of(atom).any(|a| *a == ax));
        let unknown = Axiom::sub_class_of(class("X"), class("Y"));
        assert!(ad.atom_for_axiom(&unknown).is_none());
    }

    #[test]
    fn test_term_index_covers_shared_entity() {
        let ad = yoga();
        // Yoga appears in the first two axioms, which sit in distinct atoms
        let atoms = ad.atoms_for_term(&entity("Yoga"));
        assert_eq!(atoms.len(), 2);
        assert!(ad.atoms_for_term(&entity("Nowhere")).is_empty());
    }

    #[test]
    fn test_bottom_and_top_atoms_of_chain() {
        let ad = yoga();
        let a0 = ad.atom_for_axiom(&Axiom::sub_class_of(class("PowerYoga"), class("Yoga"))).unwrap();
        let a2 = ad
            .atom_for_axiom(&Axiom::sub_class_of(class("Relaxation"), class("Activity")))
            .unwrap();
        assert_eq!(ad.bottom_atoms(), vec![a2]);
        assert_eq!(ad.top_atoms(), vec![a0]);
        assert!(ad.is_bottom_atom(a2));
        assert!(ad.is_top_atom(a0));
        assert!(!ad.is_top_atom(a2));
    }

    #[test]
    fn test_closures_along_the_chain() {
        let ad = yoga();
        let a0 = ad.atom_for_axiom(&Axiom::sub_class_of(class("PowerYoga"), class("Yoga"))).unwrap();
        let a1 = ad.atom_for_axiom(&Axiom::sub_class_of(class("Yoga"), class("Relaxation"))).unwrap();
        let a2 = ad
            .atom_for_axiom(&Axiom::sub_class_of(class("Relaxation"), class("Activity")))
            .unwrap();
        assert_eq!(ad.dependencies_closure(a0), BTreeSet::from([a0, a1, a2]));
        assert_eq!(ad.dependencies_closure(a2), BTreeSet::from([a2]));
        assert_eq!(ad.dependents_closure(a2), BTreeSet::from([a0, a1, a2]));
        // second call hits the memo
        assert_eq!(ad.dependents_closure(a2), BTreeSet::from([a0, a1, a2]));
        assert_eq!(ad.dependents_closure(a0), BTreeSet::from([a0]));
    }

    #[test]
    fn test_related_atoms_is_whole_component() {
        let ad = yoga();
        let a1 = ad.atom_for_axiom(&Axiom::sub_class_of(class("Yoga"), class("Relaxation"))).unwrap();
        assert_eq!(ad.related_atoms(a1).len(), 3);
    }

    #[test]
    fn test_disconnected_components_stay_apart() {
        let onto = Ontology::from_axioms([
            Axiom::sub_class_of(class("a"), class("b")),
            Axiom::sub_class_of(class("c"), class("d")),
        ]);
        let ad = AtomicDecomposition::new(onto, ModuleType::Bottom).unwrap();
        let left = ad.atom_for_axiom(&Axiom::sub_class_of(class("a"), class("b"))).unwrap();
        assert_eq!(ad.related_atoms(left), BTreeSet::from([left]));
        assert_eq!(ad.edges().len(), 0);
    }

    #[test]
    fn test_principal_ideal_is_self_contained() {
        let ad = yoga();
        let a0 = ad.atom_for_axiom(&Axiom::sub_class_of(class("PowerYoga"), class("Yoga"))).unwrap();
        let ideal = ad.principal_ideal(a0);
        assert_eq!(ideal.len(), 3);
        let sig = ad.principal_ideal_signature(a0);
        assert!(sig.contains(&entity("PowerYoga")));
        assert!(sig.contains(&entity("Activity")));
    }

    #[test]
    fn test_export_is_deterministic_and_verified() {
        let e1 = yoga().export();
        let e2 = yoga().export();
        assert_eq!(e1.fingerprint, e2.fingerprint);
        assert!(e1.verify_fingerprint());
        assert_eq!(e1.atoms.len(), 3);
    }

    #[test]
    fn test_tautologies_surface_in_queries_and_export() {
        let onto = Ontology::from_axioms([
            Axiom::sub_class_of(class("c"), ClassExpression::Thing),
            Axiom::sub_class_of(class("a"), class("b")),
        ]);
        let ad = AtomicDecomposition::new(onto, ModuleType::Bottom).unwrap();
        assert_eq!(ad.tautologies().count(), 1);
        assert!(ad.atom_of(ad.tautology_ids()[0]).is_none());
        let export = ad.export();
        assert_eq!(export.tautologies.len(), 1);
        assert!(export.verify_fingerprint());
    }
}
