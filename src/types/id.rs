//! Opaque handle types.
//!
//! Axioms and atoms are arena-allocated and referenced by index handles.
//! Handles are only meaningful against the decomposition instance that
//! issued them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle for an axiom inside an [`Ontology`](crate::Ontology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AxiomId(pub(crate) usize);

impl AxiomId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AxiomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ax{}", self.0)
    }
}

/// Handle for an atom inside an [`AtomList`](crate::AtomList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AtomId(pub(crate) usize);

impl AtomId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atom{}", self.0)
    }
}
