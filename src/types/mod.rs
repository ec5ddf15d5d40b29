//! Core types for the decomposition kernel.

pub mod axiom;
pub mod entity;
pub mod export;
pub mod expression;
pub mod id;
pub mod signature;

pub use axiom::Axiom;
pub use entity::{Entity, EntityKind};
pub use export::{AtomExport, DecompositionExport};
pub use expression::{ClassExpression, PropertyExpression};
pub use id::{AtomId, AxiomId};
pub use signature::{ModuleType, Signature};
