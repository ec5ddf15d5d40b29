//! Atoms and the atom arena.
//!
//! An atom is a maximal group of axioms that always co-occur in the same
//! module. Each atom records the axioms born in it, the module it was built
//! from (a superset pulled in by dependencies), and its direct dependency
//! edges. After construction the arena performs one global transitive
//! reduction pass: direct edges implied by a longer path are dropped while
//! the full closure is memoized per atom.

use std::collections::BTreeSet;

use crate::types::{AtomId, AxiomId};

/// One atom: axioms, originating module, dependency edges.
#[derive(Debug, Clone)]
pub struct Atom {
    id: AtomId,
    /// Axioms born in this atom, in discovery order.
    axioms: Vec<AxiomId>,
    /// The module this atom was built from; superset of `axioms`.
    module: Vec<AxiomId>,
    /// Direct dependency edges (reduced once the arena is frozen).
    dependencies: BTreeSet<AtomId>,
    /// Memoized transitive closure, built by `AtomList::reduce_graph`.
    all_dependencies: Option<BTreeSet<AtomId>>,
}

impl Atom {
    fn new(id: AtomId) -> Self {
        Self {
            id,
            axioms: Vec::new(),
            module: Vec::new(),
            dependencies: BTreeSet::new(),
            all_dependencies: None,
        }
    }

    /// This atom's handle.
    pub fn id(&self) -> AtomId {
        self.id
    }

    /// The axioms born in this atom.
    pub fn axioms(&self) -> &[AxiomId] {
        &self.axioms
    }

    /// The module this atom was built from.
    pub fn module(&self) -> &[AxiomId] {
        &self.module
    }

    /// Direct dependency edges. Reduced iff the arena has been frozen via
    /// `reduce_graph`.
    pub fn dependencies(&self) -> &BTreeSet<AtomId> {
        &self.dependencies
    }

    /// The memoized transitive dependency closure (excluding this atom);
    /// `None` until `reduce_graph` has run.
    pub fn all_dependencies(&self) -> Option<&BTreeSet<AtomId>> {
        self.all_dependencies.as_ref()
    }

    pub(crate) fn set_module(&mut self, module: Vec<AxiomId>) {
        self.module = module;
    }

    pub(crate) fn add_axiom(&mut self, axiom: AxiomId) {
        self.axioms.push(axiom);
    }

    /// Record a dependency edge; self-edges are suppressed.
    pub(crate) fn add_dependency(&mut self, target: AtomId) {
        if target != self.id {
            self.dependencies.insert(target);
        }
    }
}

/// Arena of atoms plus the global reduction pass.
#[derive(Debug, Clone, Default)]
pub struct AtomList {
    atoms: Vec<Atom>,
}

impl AtomList {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh atom and return its handle.
    pub(crate) fn new_atom(&mut self) -> AtomId {
        let id = AtomId(self.atoms.len());
        self.atoms.push(Atom::new(id));
        id
    }

    /// The atom behind a handle.
    pub fn get(&self, id: AtomId) -> &Atom {
        &self.atoms[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: AtomId) -> &mut Atom {
        &mut self.atoms[id.0]
    }

    /// All atoms in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Transitive reduction of the dependency graph.
    ///
    /// Depth-first accumulation in post-order: each atom's closure is the
    /// union of its direct dependencies' closures; any direct edge already
    /// inside that union is implied by a longer path and removed. The
    /// closure (implied atoms plus the surviving direct edges) is memoized
    /// per atom. Reachability is unchanged, only the direct edge set
    /// shrinks.
    pub fn reduce_graph(&mut self) {
        let n = self.atoms.len();
        let mut in_progress = vec![false; n];
        for root in 0..n {
            if self.atoms[root].all_dependencies.is_some() {
                continue;
            }
            let mut stack = vec![root];
            while let Some(&top) = stack.last() {
                if self.atoms[top].all_dependencies.is_some() {
                    in_progress[top] = false;
                    stack.pop();
                    continue;
                }
                in_progress[top] = true;
                let pending: Vec<usize> = self.atoms[top]
                    .dependencies
                    .iter()
                    .map(|d| d.0)
                    .filter(|&d| self.atoms[d].all_dependencies.is_none() && !in_progress[d])
                    .collect();
                if pending.is_empty() {
                    let mut implied: BTreeSet<AtomId> = BTreeSet::new();
                    for dep in self.atoms[top].dependencies.clone() {
                        if let Some(closure) = &self.atoms[dep.0].all_dependencies {
                            implied.extend(closure.iter().copied());
                        }
                    }
                    let atom = &mut self.atoms[top];
                    atom.dependencies.retain(|d| !implied.contains(d));
                    implied.extend(atom.dependencies.iter().copied());
                    atom.all_dependencies = Some(implied);
                    in_progress[top] = false;
                    stack.pop();
                } else {
                    stack.extend(pending);
                }
            }
        }
    }
}
