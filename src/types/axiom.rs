//! Axiom shapes.
//!
//! Axioms are immutable logical statements. The decomposition algorithms
//! never interpret them beyond (a) their shape, for the locality case
//! tables, and (b) their entity signature, for the module fixpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::entity::Entity;
use super::expression::{ClassExpression, PropertyExpression};

/// An immutable logical statement over the entity vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axiom {
    /// Declaration of an entity.
    Declaration(Entity),
    /// `sub ⊑ sup`.
    SubClassOf {
        /// Subclass expression.
        sub: ClassExpression,
        /// Superclass expression.
        sup: ClassExpression,
    },
    /// All listed expressions are pairwise equivalent.
    EquivalentClasses(Vec<ClassExpression>),
    /// All listed expressions are pairwise disjoint.
    DisjointClasses(Vec<ClassExpression>),
    /// `class` is the disjoint union of `disjuncts`.
    DisjointUnion {
        /// The partitioned class.
        class: Entity,
        /// The pairwise-disjoint disjuncts.
        disjuncts: Vec<ClassExpression>,
    },
    /// `sub ⊑ sup` over roles.
    SubObjectPropertyOf {
        /// Sub-role.
        sub: PropertyExpression,
        /// Super-role.
        sup: PropertyExpression,
    },
    /// `r1 ∘ … ∘ rn ⊑ sup`.
    SubPropertyChainOf {
        /// The role chain.
        chain: Vec<PropertyExpression>,
        /// Super-role.
        sup: PropertyExpression,
    },
    /// All listed roles are pairwise equivalent.
    EquivalentObjectProperties(Vec<PropertyExpression>),
    /// All listed roles are pairwise disjoint.
    DisjointObjectProperties(Vec<PropertyExpression>),
    /// The two roles are inverses of each other.
    InverseObjectProperties(PropertyExpression, PropertyExpression),
    /// Domain restriction for a role.
    ObjectPropertyDomain {
        /// The restricted role.
        property: PropertyExpression,
        /// Its domain.
        domain: ClassExpression,
    },
    /// Range restriction for a role.
    ObjectPropertyRange {
        /// The restricted role.
        property: PropertyExpression,
        /// Its range.
        range: ClassExpression,
    },
    /// The role is functional.
    FunctionalObjectProperty(PropertyExpression),
    /// The role is inverse-functional.
    InverseFunctionalObjectProperty(PropertyExpression),
    /// The role is transitive.
    TransitiveObjectProperty(PropertyExpression),
    /// The role is reflexive.
    ReflexiveObjectProperty(PropertyExpression),
    /// The role is irreflexive.
    IrreflexiveObjectProperty(PropertyExpression),
    /// The role is symmetric.
    SymmetricObjectProperty(PropertyExpression),
    /// The role is asymmetric.
    AsymmetricObjectProperty(PropertyExpression),
    /// `individual : class`.
    ClassAssertion {
        /// Asserted class expression.
        class: ClassExpression,
        /// The individual.
        individual: Entity,
    },
    /// `(subject, object) : property`.
    ObjectPropertyAssertion {
        /// The asserted role.
        property: PropertyExpression,
        /// Subject individual.
        subject: Entity,
        /// Object individual.
        object: Entity,
    },
    /// `(subject, object) : ¬property`.
    NegativeObjectPropertyAssertion {
        /// The denied role.
        property: PropertyExpression,
        /// Subject individual.
        subject: Entity,
        /// Object individual.
        object: Entity,
    },
    /// All listed individuals are the same.
    SameIndividual(Vec<Entity>),
    /// All listed individuals are pairwise different.
    DifferentIndividuals(Vec<Entity>),
    /// Annotation-level statement; carries no DL semantics.
    Annotation(String),
    /// An opaque rule with an explicit entity reference list.
    Rule {
        /// Human-readable rule label.
        label: String,
        /// Entities the rule body references.
        referenced: Vec<Entity>,
    },
}

impl Axiom {
    /// `sub ⊑ sup` over named classes.
    pub fn sub_class_of(sub: ClassExpression, sup: ClassExpression) -> Self {
        Self::SubClassOf { sub, sup }
    }

    /// The entity signature of this axiom.
    ///
    /// Built-in top/bottom concepts and roles are not signature members.
    /// Annotation axioms have an empty DL signature.
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        self.collect_signature(&mut out);
        out
    }

    fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        match self {
            Self::Declaration(e) => {
                out.insert(e.clone());
            }
            Self::SubClassOf { sub, sup } => {
                sub.collect_signature(out);
                sup.collect_signature(out);
            }
            Self::EquivalentClasses(args) | Self::DisjointClasses(args) => {
                for arg in args {
                    arg.collect_signature(out);
                }
            }
            Self::DisjointUnion { class, disjuncts } => {
                out.insert(class.clone());
                for arg in disjuncts {
                    arg.collect_signature(out);
                }
            }
            Self::SubObjectPropertyOf { sub, sup } => {
                sub.collect_signature(out);
                sup.collect_signature(out);
            }
            Self::SubPropertyChainOf { chain, sup } => {
                for role in chain {
                    role.collect_signature(out);
                }
                sup.collect_signature(out);
            }
            Self::EquivalentObjectProperties(args) | Self::DisjointObjectProperties(args) => {
                for role in args {
                    role.collect_signature(out);
                }
            }
            Self::InverseObjectProperties(first, second) => {
                first.collect_signature(out);
                second.collect_signature(out);
            }
            Self::ObjectPropertyDomain { property, domain } => {
                property.collect_signature(out);
                domain.collect_signature(out);
            }
            Self::ObjectPropertyRange { property, range } => {
                property.collect_signature(out);
                range.collect_signature(out);
            }
            Self::FunctionalObjectProperty(role)
            | Self::InverseFunctionalObjectProperty(role)
            | Self::TransitiveObjectProperty(role)
            | Self::ReflexiveObjectProperty(role)
            | Self::IrreflexiveObjectProperty(role)
            | Self::SymmetricObjectProperty(role)
            | Self::AsymmetricObjectProperty(role) => {
                role.collect_signature(out);
            }
            Self::ClassAssertion { class, individual } => {
                class.collect_signature(out);
                out.insert(individual.clone());
            }
            Self::ObjectPropertyAssertion { property, subject, object }
            | Self::NegativeObjectPropertyAssertion { property, subject, object } => {
                property.collect_signature(out);
                out.insert(subject.clone());
                out.insert(object.clone());
            }
            Self::SameIndividual(args) | Self::DifferentIndividuals(args) => {
                for ind in args {
                    out.insert(ind.clone());
                }
            }
            Self::Annotation(_) => {}
            Self::Rule { referenced, .. } => {
                for e in referenced {
                    out.insert(e.clone());
                }
            }
        }
    }
}
