//! Class model and registry.
//!
//! The model types ([`ClassNode`], [`Member`], [`FieldsAndMethods`]) are
//! plain data built from parsed declarations. The [`ClassRegistry`] owns
//! them: it maps file paths and class names to nodes, rebuilds nodes
//! lazily after edits, and answers the inherited-member queries that
//! walk parent chains and interface graphs.

pub mod model;
pub mod registry;

pub use model::{
    ClassName, ClassNode, FieldsAndMethods, Member, MemberKind, Visibility, VisibilitySet,
};
pub use registry::{ClassRegistry, HierarchyError};
