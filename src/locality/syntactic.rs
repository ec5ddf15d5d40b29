//! Syntactic locality.
//!
//! A pure structural pattern match: for each axiom shape, locality is
//! decided by whether specific syntactic positions are equivalent to the
//! trivial bottom/top concept or role once out-of-signature symbols are
//! read under the signature's polarity. No oracle, deterministic, never
//! errors.

use crate::error::DecompositionError;
use crate::types::{Axiom, ClassExpression, PropertyExpression, Signature};

use super::LocalityChecker;

/// Structural locality checker.
#[derive(Debug, Clone, Default)]
pub struct SyntacticLocalityChecker {
    sig: Signature,
}

impl SyntacticLocalityChecker {
    /// Create a checker with an empty signature.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Is the role expression equivalent to the empty role under `sig`?
fn role_bot_equivalent(sig: &Signature, role: &PropertyExpression) -> bool {
    match role {
        PropertyExpression::Bottom => true,
        PropertyExpression::Top => false,
        PropertyExpression::Named(e) | PropertyExpression::InverseOf(e) => {
            !sig.top_r_local() && !sig.contains(e)
        }
    }
}

/// Is the role expression equivalent to the universal role under `sig`?
fn role_top_equivalent(sig: &Signature, role: &PropertyExpression) -> bool {
    match role {
        PropertyExpression::Top => true,
        PropertyExpression::Bottom => false,
        PropertyExpression::Named(e) | PropertyExpression::InverseOf(e) => {
            sig.top_r_local() && !sig.contains(e)
        }
    }
}

/// Is the class expression equivalent to ⊥ under `sig`?
fn bot_equivalent(sig: &Signature, expr: &ClassExpression) -> bool {
    match expr {
        ClassExpression::Nothing => true,
        ClassExpression::Thing => false,
        ClassExpression::Class(e) => !sig.top_c_local() && !sig.contains(e),
        ClassExpression::ObjectComplementOf(inner) => top_equivalent(sig, inner),
        ClassExpression::ObjectIntersectionOf(args) => {
            args.iter().any(|a| bot_equivalent(sig, a))
        }
        ClassExpression::ObjectUnionOf(args) => args.iter().all(|a| bot_equivalent(sig, a)),
        ClassExpression::ObjectSomeValuesFrom(role, filler) => {
            role_bot_equivalent(sig, role) || bot_equivalent(sig, filler)
        }
        // ∀R.C subsumes ¬∃R.⊤ and is never trivially empty
        ClassExpression::ObjectAllValuesFrom(_, _) => false,
        ClassExpression::ObjectMinCardinality(n, role, filler) => {
            *n > 0 && (role_bot_equivalent(sig, role) || bot_equivalent(sig, filler))
        }
        ClassExpression::ObjectMaxCardinality(_, _, _) => false,
    }
}

/// Is the class expression equivalent to ⊤ under `sig`?
fn top_equivalent(sig: &Signature, expr: &ClassExpression) -> bool {
    match expr {
        ClassExpression::Thing => true,
        ClassExpression::Nothing => false,
        ClassExpression::Class(e) => sig.top_c_local() && !sig.contains(e),
        ClassExpression::ObjectComplementOf(inner) => bot_equivalent(sig, inner),
        ClassExpression::ObjectIntersectionOf(args) => {
            args.iter().all(|a| top_equivalent(sig, a))
        }
        ClassExpression::ObjectUnionOf(args) => args.iter().any(|a| top_equivalent(sig, a)),
        ClassExpression::ObjectSomeValuesFrom(role, filler) => {
            role_top_equivalent(sig, role) && top_equivalent(sig, filler)
        }
        ClassExpression::ObjectAllValuesFrom(role, filler) => {
            top_equivalent(sig, filler) || role_bot_equivalent(sig, role)
        }
        ClassExpression::ObjectMinCardinality(n, role, filler) => {
            *n == 0
                || (*n == 1 && role_top_equivalent(sig, role) && top_equivalent(sig, filler))
        }
        ClassExpression::ObjectMaxCardinality(_, role, filler) => {
            role_bot_equivalent(sig, role) || bot_equivalent(sig, filler)
        }
    }
}

/// Per-shape locality dispatch; pure function of (axiom, signature).
fn axiom_local(sig: &Signature, axiom: &Axiom) -> bool {
    match axiom {
        Axiom::Declaration(_) => true,
        Axiom::SubClassOf { sub, sup } => bot_equivalent(sig, sub) || top_equivalent(sig, sup),
        // Local iff all members collapse to the same trivial concept.
        Axiom::EquivalentClasses(args) => {
            args.len() < 2
                || args.iter().all(|a| bot_equivalent(sig, a))
                || args.iter().all(|a| top_equivalent(sig, a))
        }
        // Local iff at most one member is non-trivially non-empty.
        Axiom::DisjointClasses(args) => {
            args.iter().filter(|a| !bot_equivalent(sig, a)).count() <= 1
        }
        Axiom::DisjointUnion { class, disjuncts } => {
            let class_expr = ClassExpression::Class(class.clone());
            bot_equivalent(sig, &class_expr) && disjuncts.iter().all(|d| bot_equivalent(sig, d))
        }
        Axiom::SubObjectPropertyOf { sub, sup } => {
            role_bot_equivalent(sig, sub) || role_top_equivalent(sig, sup)
        }
        Axiom::SubPropertyChainOf { chain, sup } => {
            role_top_equivalent(sig, sup) || chain.iter().any(|r| role_bot_equivalent(sig, r))
        }
        Axiom::EquivalentObjectProperties(args) => {
            args.len() < 2
                || args.iter().all(|r| role_bot_equivalent(sig, r))
                || args.iter().all(|r| role_top_equivalent(sig, r))
        }
        Axiom::DisjointObjectProperties(args) => {
            args.iter().filter(|r| !role_bot_equivalent(sig, r)).count() <= 1
        }
        Axiom::InverseObjectProperties(first, second) => {
            (role_bot_equivalent(sig, first) && role_bot_equivalent(sig, second))
                || (role_top_equivalent(sig, first) && role_top_equivalent(sig, second))
        }
        Axiom::ObjectPropertyDomain { property, domain } => {
            top_equivalent(sig, domain) || role_bot_equivalent(sig, property)
        }
        Axiom::ObjectPropertyRange { property, range } => {
            top_equivalent(sig, range) || role_bot_equivalent(sig, property)
        }
        Axiom::FunctionalObjectProperty(role)
        | Axiom::InverseFunctionalObjectProperty(role)
        | Axiom::IrreflexiveObjectProperty(role)
        | Axiom::AsymmetricObjectProperty(role) => role_bot_equivalent(sig, role),
        // The universal role already carries these characteristics.
        Axiom::TransitiveObjectProperty(role) | Axiom::SymmetricObjectProperty(role) => {
            role_bot_equivalent(sig, role) || role_top_equivalent(sig, role)
        }
        // The empty role is not reflexive.
        Axiom::ReflexiveObjectProperty(role) => role_top_equivalent(sig, role),
        Axiom::ClassAssertion { class, .. } => top_equivalent(sig, class),
        Axiom::ObjectPropertyAssertion { property, .. } => role_top_equivalent(sig, property),
        Axiom::NegativeObjectPropertyAssertion { property, .. } => {
            role_bot_equivalent(sig, property)
        }
        Axiom::SameIndividual(_) | Axiom::DifferentIndividuals(_) => false,
        // No DL semantics on annotation-level statements; rules are kept
        // outside the locality analysis entirely.
        Axiom::Annotation(_) | Axiom::Rule { .. } => true,
    }
}

impl LocalityChecker for SyntacticLocalityChecker {
    /// Resets the checker signature to the union of the population's
    /// axiom signatures; the polarity is preserved.
    fn preprocess(&mut self, axioms: &[&Axiom]) -> Result<(), DecompositionError> {
        let polarity = self.sig.polarity();
        let mut sig = Signature::new();
        sig.set_locality(polarity);
        for ax in axioms {
            let ax_sig = ax.signature();
            sig.add_all(ax_sig.iter());
        }
        self.sig = sig;
        Ok(())
    }

    fn set_signature(&mut self, signature: Signature) {
        self.sig = signature;
    }

    fn signature(&self) -> &Signature {
        &self.sig
    }

    fn signature_mut(&mut self) -> &mut Signature {
        &mut self.sig
    }

    fn local(&mut self, axiom: &Axiom) -> Result<bool, DecompositionError> {
        Ok(axiom_local(&self.sig, axiom))
    }
}
