//! Signatures and locality polarity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::entity::Entity;

/// Which locality polarity a decomposition run uses.
///
/// The polarity selects which trivial concept/role is treated as being in
/// every signature: `Bottom` reads out-of-signature symbols as the empty
/// concept/role, `Top` reads them as the universal one. Both produce valid,
/// structurally different atom graphs for the same axiom set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleType {
    /// Bottom-locality (⊥).
    Bottom,
    /// Top-locality (⊤).
    Top,
}

impl Default for ModuleType {
    fn default() -> Self {
        Self::Bottom
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bottom => write!(f, "bottom"),
            Self::Top => write!(f, "top"),
        }
    }
}

/// An unordered set of entities plus a locality polarity.
///
/// Equality and hashing cover the entity set only: the same entity set can
/// be tested under both polarities in different calls, so polarity is
/// carried alongside identity, not part of it. The set is mutable while a
/// module fixpoint grows; once a signature has keyed a module it must not
/// be mutated further.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    entities: BTreeSet<Entity>,
    polarity: ModuleType,
}

impl Signature {
    /// Create an empty signature with bottom polarity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signature from an entity collection.
    pub fn from_entities<I: IntoIterator<Item = Entity>>(entities: I) -> Self {
        Self { entities: entities.into_iter().collect(), polarity: ModuleType::default() }
    }

    /// Add one entity.
    pub fn add(&mut self, entity: Entity) {
        self.entities.insert(entity);
    }

    /// Union a collection of entities into this signature.
    pub fn add_all<'a, I: IntoIterator<Item = &'a Entity>>(&mut self, entities: I) {
        for e in entities {
            self.entities.insert(e.clone());
        }
    }

    /// Whether the signature contains `entity`.
    pub fn contains(&self, entity: &Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Set the locality polarity.
    pub fn set_locality(&mut self, polarity: ModuleType) {
        self.polarity = polarity;
    }

    /// The configured polarity.
    pub fn polarity(&self) -> ModuleType {
        self.polarity
    }

    /// Whether out-of-signature concepts are read as ⊤.
    pub fn top_c_local(&self) -> bool {
        self.polarity == ModuleType::Top
    }

    /// Whether out-of-signature roles are read as ⊤.
    pub fn top_r_local(&self) -> bool {
        self.polarity == ModuleType::Top
    }

    /// The entity set.
    pub fn entities(&self) -> &BTreeSet<Entity> {
        &self.entities
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the signature is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// Identity by entity set; polarity is a query mode, not identity.
impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl Eq for Signature {}

impl std::hash::Hash for Signature {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.entities.hash(state);
    }
}
