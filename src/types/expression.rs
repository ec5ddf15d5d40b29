//! Class and property expressions.
//!
//! A deliberately small expression language: enough shape variety to give
//! the locality checkers a real case analysis without dragging in a full
//! description-logic term model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::entity::Entity;

/// An object property expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyExpression {
    /// The universal (top) role; in every signature by convention.
    Top,
    /// The empty (bottom) role; in every signature by convention.
    Bottom,
    /// A named role.
    Named(Entity),
    /// The inverse of a named role.
    InverseOf(Entity),
}

impl PropertyExpression {
    /// The named entity this expression references, if any.
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Self::Top | Self::Bottom => None,
            Self::Named(e) | Self::InverseOf(e) => Some(e),
        }
    }

    /// Collect referenced entities into `out`.
    pub fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        if let Some(e) = self.entity() {
            out.insert(e.clone());
        }
    }
}

/// A class expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassExpression {
    /// The universal concept.
    Thing,
    /// The empty concept.
    Nothing,
    /// A named class.
    Class(Entity),
    /// Negation.
    ObjectComplementOf(Box<ClassExpression>),
    /// Conjunction.
    ObjectIntersectionOf(Vec<ClassExpression>),
    /// Disjunction.
    ObjectUnionOf(Vec<ClassExpression>),
    /// Existential restriction.
    ObjectSomeValuesFrom(PropertyExpression, Box<ClassExpression>),
    /// Universal restriction.
    ObjectAllValuesFrom(PropertyExpression, Box<ClassExpression>),
    /// At-least cardinality restriction.
    ObjectMinCardinality(u32, PropertyExpression, Box<ClassExpression>),
    /// At-most cardinality restriction.
    ObjectMaxCardinality(u32, PropertyExpression, Box<ClassExpression>),
}

impl ClassExpression {
    /// A named class expression.
    pub fn class(iri: impl Into<String>) -> Self {
        Self::Class(Entity::class(iri))
    }

    /// Existential restriction over a named role.
    pub fn some(role: Entity, filler: ClassExpression) -> Self {
        Self::ObjectSomeValuesFrom(PropertyExpression::Named(role), Box::new(filler))
    }

    /// Universal restriction over a named role.
    pub fn all(role: Entity, filler: ClassExpression) -> Self {
        Self::ObjectAllValuesFrom(PropertyExpression::Named(role), Box::new(filler))
    }

    /// Negation.
    pub fn not(self) -> Self {
        Self::ObjectComplementOf(Box::new(self))
    }

    /// Collect referenced entities into `out`.
    pub fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        match self {
            Self::Thing | Self::Nothing => {}
            Self::Class(e) => {
                out.insert(e.clone());
            }
            Self::ObjectComplementOf(inner) => inner.collect_signature(out),
            Self::ObjectIntersectionOf(args) | Self::ObjectUnionOf(args) => {
                for arg in args {
                    arg.collect_signature(out);
                }
            }
            Self::ObjectSomeValuesFrom(role, filler)
            | Self::ObjectAllValuesFrom(role, filler)
            | Self::ObjectMinCardinality(_, role, filler)
            | Self::ObjectMaxCardinality(_, role, filler) => {
                role.collect_signature(out);
                filler.collect_signature(out);
            }
        }
    }

    /// The signature of this expression alone.
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        self.collect_signature(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_skips_builtins() {
        let expr = ClassExpression::ObjectIntersectionOf(vec![
            ClassExpression::Thing,
            ClassExpression::class("urn:test#a"),
            ClassExpression::ObjectSomeValuesFrom(
                PropertyExpression::Top,
                Box::new(ClassExpression::Nothing),
            ),
        ]);
        let sig = expr.signature();
        assert_eq!(sig.len(), 1);
        assert!(sig.contains(&Entity::class("urn:test#a")));
    }

    #[test]
    fn test_nested_signature() {
        let r = Entity::object_property("urn:test#r");
        let expr = ClassExpression::some(r.clone(), ClassExpression::class("urn:test#b").not());
        let sig = expr.signature();
        assert!(sig.contains(&r));
        assert!(sig.contains(&Entity::class("urn:test#b")));
        assert_eq!(sig.len(), 2);
    }
}
