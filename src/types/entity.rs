//! Entity types for the decomposition kernel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of vocabulary element an [`Entity`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A class (concept) name.
    Class,
    /// An object property (role) name.
    ObjectProperty,
    /// A named individual.
    NamedIndividual,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::ObjectProperty => write!(f, "object_property"),
            Self::NamedIndividual => write!(f, "named_individual"),
        }
    }
}

/// A vocabulary element referenced by axioms.
///
/// Entities are identity-comparable symbols: only (kind, iri) matter.
/// `Ord` gives the canonical ordering used everywhere signatures are
/// iterated, so signature-derived output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// What kind of symbol this is.
    pub kind: EntityKind,
    /// The symbol name (an IRI in OWL terms).
    pub iri: String,
}

impl Entity {
    /// Create a class entity.
    pub fn class(iri: impl Into<String>) -> Self {
        Self { kind: EntityKind::Class, iri: iri.into() }
    }

    /// Create an object property entity.
    pub fn object_property(iri: impl Into<String>) -> Self {
        Self { kind: EntityKind::ObjectProperty, iri: iri.into() }
    }

    /// Create a named individual entity.
    pub fn individual(iri: impl Into<String>) -> Self {
        Self { kind: EntityKind::NamedIndividual, iri: iri.into() }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.iri)
    }
}
