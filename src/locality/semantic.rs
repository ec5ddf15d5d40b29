//! Semantic locality.
//!
//! Same per-shape dispatch as the syntactic checker, but each shape is
//! decided by entailment/satisfiability queries against an external
//! reasoning oracle. The oracle is seeded once per axiom population with
//! declaration axioms for exactly the population's entity signature.
//! Strictly more precise than the syntactic test (finds more axioms local,
//! hence builds smaller modules) at the cost of oracle calls.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::error::{DecompositionError, OracleError};
use crate::types::{Axiom, ClassExpression, PropertyExpression, Signature};

use super::LocalityChecker;

/// Default capacity of the oracle-answer cache.
const ORACLE_CACHE_CAPACITY: usize = 4096;

/// External reasoning oracle.
///
/// Implementations answer against the background theory they were created
/// with. Calls may be long-running; cancellation/timeout, if needed, is the
/// oracle's own concern, never the fixpoint loop's.
pub trait Reasoner {
    /// Whether the background theory entails `axiom`.
    fn is_entailed(&mut self, axiom: &Axiom) -> Result<bool, OracleError>;

    /// Whether `expr` is satisfiable in the background theory.
    fn is_satisfiable(&mut self, expr: &ClassExpression) -> Result<bool, OracleError>;
}

/// Builds a [`Reasoner`] over a background theory.
pub trait ReasonerFactory {
    /// The oracle type produced.
    type Reasoner: Reasoner;

    /// Create a reasoner seeded with `background` (declaration axioms).
    ///
    /// Failure here is fatal to the decomposition run that requested it.
    fn create(&self, background: &[Axiom]) -> Result<Self::Reasoner, OracleError>;
}

/// One memoizable oracle question.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum OracleQuery {
    Entailed(Axiom),
    Satisfiable(ClassExpression),
}

/// Oracle-backed locality checker.
pub struct SemanticLocalityChecker<F: ReasonerFactory> {
    factory: F,
    kernel: Option<F::Reasoner>,
    sig: Signature,
    /// Answers are a pure function of the background theory, so they stay
    /// valid until the next `preprocess`.
    cache: LruCache<OracleQuery, bool>,
}

impl<F: ReasonerFactory> SemanticLocalityChecker<F> {
    /// Create a checker; the oracle itself is built in `preprocess`.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            kernel: None,
            sig: Signature::new(),
            cache: LruCache::new(
                NonZeroUsize::new(ORACLE_CACHE_CAPACITY).expect("nonzero capacity"),
            ),
        }
    }

    fn entailed(&mut self, axiom: Axiom) -> Result<bool, DecompositionError> {
        let query = OracleQuery::Entailed(axiom);
        if let Some(&hit) = self.cache.get(&query) {
            return Ok(hit);
        }
        let kernel = self.kernel.as_mut().ok_or_else(|| {
            OracleError::Construction("locality query before preprocess".to_string())
        })?;
        let answer = match &query {
            OracleQuery::Entailed(ax) => kernel.is_entailed(ax)?,
            OracleQuery::Satisfiable(_) => unreachable!(),
        };
        self.cache.put(query, answer);
        Ok(answer)
    }

    fn satisfiable(&mut self, expr: ClassExpression) -> Result<bool, DecompositionError> {
        let query = OracleQuery::Satisfiable(expr);
        if let Some(&hit) = self.cache.get(&query) {
            return Ok(hit);
        }
        let kernel = self.kernel.as_mut().ok_or_else(|| {
            OracleError::Construction("locality query before preprocess".to_string())
        })?;
        let answer = match &query {
            OracleQuery::Satisfiable(e) => kernel.is_satisfiable(e)?,
            OracleQuery::Entailed(_) => unreachable!(),
        };
        self.cache.put(query, answer);
        Ok(answer)
    }

    /// All pairs from `args` entailed equivalent to the first member.
    fn pairwise_equivalent_classes(
        &mut self,
        args: &[ClassExpression],
    ) -> Result<bool, DecompositionError> {
        let first = &args[0];
        for other in &args[1..] {
            let query = Axiom::EquivalentClasses(vec![first.clone(), other.clone()]);
            if !self.entailed(query)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn pairwise_disjoint_classes(
        &mut self,
        args: &[ClassExpression],
    ) -> Result<bool, DecompositionError> {
        for (i, p) in args.iter().enumerate() {
            for q in &args[i + 1..] {
                let query = Axiom::DisjointClasses(vec![p.clone(), q.clone()]);
                if !self.entailed(query)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

fn invert(role: &PropertyExpression) -> PropertyExpression {
    match role {
        PropertyExpression::Top => PropertyExpression::Top,
        PropertyExpression::Bottom => PropertyExpression::Bottom,
        PropertyExpression::Named(e) => PropertyExpression::InverseOf(e.clone()),
        PropertyExpression::InverseOf(e) => PropertyExpression::Named(e.clone()),
    }
}

impl<F: ReasonerFactory> LocalityChecker for SemanticLocalityChecker<F> {
    /// Builds the background theory: declarations for exactly the entities
    /// of the active axiom population, handed to the reasoner factory.
    fn preprocess(&mut self, axioms: &[&Axiom]) -> Result<(), DecompositionError> {
        let mut population_sig = Signature::new();
        for ax in axioms {
            let ax_sig = ax.signature();
            population_sig.add_all(ax_sig.iter());
        }
        let declarations: Vec<Axiom> = population_sig
            .entities()
            .iter()
            .map(|e| Axiom::Declaration(e.clone()))
            .collect();
        self.kernel = Some(self.factory.create(&declarations)?);
        self.cache.clear();
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
        match axiom {
            Axiom::Declaration(_) => Ok(true),
            Axiom::EquivalentClasses(args) => {
                if args.len() < 2 {
                    return Ok(true);
                }
                self.pairwise_equivalent_classes(args)
            }
            Axiom::DisjointClasses(args) => self.pairwise_disjoint_classes(args),
            Axiom::DisjointUnion { class, disjuncts } => {
                let equivalence = Axiom::EquivalentClasses(vec![
                    ClassExpression::Class(class.clone()),
                    ClassExpression::ObjectUnionOf(disjuncts.clone()),
                ]);
                if !self.entailed(equivalence)? {
                    return Ok(false);
                }
                self.pairwise_disjoint_classes(disjuncts)
            }
            Axiom::EquivalentObjectProperties(args) => {
                if args.len() < 2 {
                    return Ok(true);
                }
                let first = &args[0];
                for other in &args[1..] {
                    let forward = Axiom::SubObjectPropertyOf {
                        sub: first.clone(),
                        sup: other.clone(),
                    };
                    let backward = Axiom::SubObjectPropertyOf {
                        sub: other.clone(),
                        sup: first.clone(),
                    };
                    if !(self.entailed(forward)? && self.entailed(backward)?) {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            // R = inverse(S) is a tautology iff R ⊑ S⁻ and R⁻ ⊑ S
            Axiom::InverseObjectProperties(first, second) => {
                let forward = Axiom::SubObjectPropertyOf {
                    sub: first.clone(),
                    sup: invert(second),
                };
                let backward = Axiom::SubObjectPropertyOf {
                    sub: invert(first),
                    sup: second.clone(),
                };
                Ok(self.entailed(forward)? && self.entailed(backward)?)
            }
            // Domain(R) = C is a tautology iff ∃R.⊤ ⊑ C
            Axiom::ObjectPropertyDomain { property, domain } => {
                let query = Axiom::SubClassOf {
                    sub: ClassExpression::ObjectSomeValuesFrom(
                        property.clone(),
                        Box::new(ClassExpression::Thing),
                    ),
                    sup: domain.clone(),
                };
                self.entailed(query)
            }
            // Range(R) = C is a tautology iff ∃R.¬C is unsatisfiable
            Axiom::ObjectPropertyRange { property, range } => {
                let probe = ClassExpression::ObjectSomeValuesFrom(
                    property.clone(),
                    Box::new(range.clone().not()),
                );
                Ok(!self.satisfiable(probe)?)
            }
            Axiom::SameIndividual(_) | Axiom::DifferentIndividuals(_) => Ok(false),
            Axiom::Annotation(_) | Axiom::Rule { .. } => Ok(true),
            // every remaining shape is local iff it is itself entailed
            other => self.entailed(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Entity;

    /// Structural toy oracle: entails only trivially valid statements.
    struct StructuralReasoner {
        background: Vec<Axiom>,
    }

    impl Reasoner for StructuralReasoner {
        fn is_entailed(&mut self, axiom: &Axiom) -> Result<bool, OracleError> {
            Ok(match axiom {
                Axiom::SubClassOf { sub, sup } => {
                    sub == sup
                        || matches!(sup, ClassExpression::Thing)
                        || matches!(sub, ClassExpression::Nothing)
                }
                Axiom::SubObjectPropertyOf { sub, sup } => {
                    sub == sup
                        || matches!(sup, PropertyExpression::Top)
                        || matches!(sub, PropertyExpression::Bottom)
                }
                Axiom::EquivalentClasses(args) => args.windows(2).all(|w| w[0] == w[1]),
                Axiom::DisjointClasses(args) => args
                    .iter()
                    .any(|a| matches!(a, ClassExpression::Nothing)),
                _ => false,
            })
        }

        fn is_satisfiable(&mut self, expr: &ClassExpression) -> Result<bool, OracleError> {
            Ok(!matches!(expr, ClassExpression::Nothing))
        }
    }

    struct StructuralFactory {
        fail: bool,
    }

    impl ReasonerFactory for StructuralFactory {
        type Reasoner = StructuralReasoner;

        fn create(&self, background: &[Axiom]) -> Result<Self::Reasoner, OracleError> {
            if self.fail {
                return Err(OracleError::Construction("no reasoner available".to_string()));
            }
            Ok(StructuralReasoner { background: background.to_vec() })
        }
    }

    fn checker() -> SemanticLocalityChecker<StructuralFactory> {
        let mut c = SemanticLocalityChecker::new(StructuralFactory { fail: false });
        c.preprocess(&[]).unwrap();
        c
    }

    fn class(n: &str) -> ClassExpression {
        ClassExpression::class(format!("urn:test#{n}"))
    }

    #[test]
    fn trivial_subsumption_is_local() {
        let mut c = checker();
        let ax = Axiom::sub_class_of(class("c"), ClassExpression::Thing);
        assert!(c.local(&ax).unwrap());
    }

    #[test]
    fn informative_subsumption_is_not_local() {
        let mut c = checker();
        let ax = Axiom::sub_class_of(class("a"), class("b"));
        assert!(!c.local(&ax).unwrap());
    }

    #[test]
    fn degenerate_equivalence_is_local() {
        let mut c = checker();
        assert!(c.local(&Axiom::EquivalentClasses(vec![class("a")])).unwrap());
        assert!(c
            .local(&Axiom::EquivalentClasses(vec![class("a"), class("a")]))
            .unwrap());
        assert!(!c
            .local(&Axiom::EquivalentClasses(vec![class("a"), class("b")]))
            .unwrap());
    }

    #[test]
    fn range_locality_uses_satisfiability() {
        let mut c = checker();
        let p = PropertyExpression::Named(Entity::object_property("urn:test#p"));
        // ∃p.¬a is satisfiable in the toy oracle, so the range axiom is
        // informative
        let ax = Axiom::ObjectPropertyRange { property: p, range: class("a") };
        assert!(!c.local(&ax).unwrap());
    }

    #[test]
    fn individual_axioms_are_never_local() {
        let mut c = checker();
        let x = Entity::individual("urn:test#x");
        let y = Entity::individual("urn:test#y");
        assert!(!c.local(&Axiom::SameIndividual(vec![x.clone(), y.clone()])).unwrap());
        assert!(!c.local(&Axiom::DifferentIndividuals(vec![x, y])).unwrap());
    }

    #[test]
    fn preprocess_seeds_declarations() {
        let mut c = SemanticLocalityChecker::new(StructuralFactory { fail: false });
        let ax = Axiom::sub_class_of(class("a"), class("b"));
        c.preprocess(&[&ax]).unwrap();
        let kernel = c.kernel.as_ref().unwrap();
        assert_eq!(kernel.background.len(), 2);
        assert!(kernel
            .background
            .iter()
            .all(|d| matches!(d, Axiom::Declaration(_))));
    }

    #[test]
    fn factory_failure_is_fatal() {
        let mut c = SemanticLocalityChecker::new(StructuralFactory { fail: true });
        let err = c.preprocess(&[]).unwrap_err();
        assert!(matches!(
            err,
            DecompositionError::Oracle(OracleError::Construction(_))
        ));
    }

    #[test]
    fn query_before_preprocess_fails() {
        let mut c = SemanticLocalityChecker::new(StructuralFactory { fail: false });
        let ax = Axiom::sub_class_of(class("a"), class("b"));
        assert!(c.local(&ax).is_err());
    }
}
