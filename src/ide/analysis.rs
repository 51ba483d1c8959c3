//! AnalysisHost and Analysis — Unified state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. This pattern ensures consistent reads across multiple queries.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! // Apply file changes
//! host.set_file_content("Controller.cls", content);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let members = analysis.fields_and_methods("Controller.cls", offset);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use text_size::TextSize;

use crate::base::{LineCol, offset_to_line_col};
use crate::hir::{
    ClassName, ClassNode, ClassRegistry, FieldsAndMethods, HierarchyError, Member,
};
use crate::syntax::{ClassDecl, ParseError};

use super::CompletionItem;

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
#[derive(Clone, Default)]
pub struct AnalysisHost {
    registry: ClassRegistry,
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self {
            registry: ClassRegistry::new(),
        }
    }

    /// Set the content of a file, parsing it and registering the class
    /// it declares.
    ///
    /// Returns parse errors if any.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> Vec<ParseError> {
        self.registry.set_source(path, content)
    }

    /// Update or add a file with pre-parsed content.
    /// Used when the caller already parsed the text (e.g. in parallel).
    pub fn set_parsed_file(&mut self, path: PathBuf, text: Arc<str>, decl: Option<ClassDecl>) {
        self.registry.set_parsed(path, text, decl);
    }

    /// Copy every tracked file from another host into this one.
    pub fn extend_from(&mut self, other: &AnalysisHost) {
        self.registry.extend_from(&other.registry);
    }

    /// Remove a file from storage.
    pub fn remove_file(&mut self, path: &str) {
        self.registry.remove_path(Path::new(path));
    }

    /// Check if a file exists in storage.
    pub fn has_file(&self, path: &str) -> bool {
        self.registry.has_path(Path::new(path))
    }

    /// Get the number of classes loaded.
    pub fn file_count(&self) -> usize {
        self.registry.len()
    }

    /// Get access to the underlying registry.
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Get a consistent snapshot for querying.
    ///
    /// Class nodes are built lazily per query; there is no index rebuild
    /// step, so snapshots are cheap to take.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            registry: &self.registry,
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All IDE queries go through this struct to ensure consistent results.
pub struct Analysis<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> Analysis<'a> {
    // ==================== Member resolution ====================

    /// Resolve the member set relevant to the cursor position via the
    /// strategy dispatch. `None` when no strategy applies.
    pub fn fields_and_methods(
        &self,
        path: impl AsRef<Path>,
        offset: TextSize,
    ) -> Option<FieldsAndMethods> {
        super::strategies::fields_and_methods_at(self.registry, path.as_ref(), offset)
    }

    /// Fields of a class, optionally flattened over its hierarchy.
    pub fn class_fields(
        &self,
        name: &str,
        include_inherited: bool,
    ) -> Result<Vec<Member>, HierarchyError> {
        self.registry.class_fields(name, include_inherited)
    }

    /// Methods of a class, optionally flattened over its hierarchy.
    pub fn class_methods(
        &self,
        name: &str,
        include_inherited: bool,
    ) -> Result<Vec<Member>, HierarchyError> {
        self.registry.class_methods(name, include_inherited)
    }

    /// Get completions at a position.
    pub fn completions(&self, path: impl AsRef<Path>, offset: TextSize) -> Vec<CompletionItem> {
        super::completions(self.registry, path.as_ref(), offset)
    }

    // ==================== Lookups ====================

    /// Map a file path to the class it declares.
    pub fn class_name_from_path(&self, path: impl AsRef<Path>) -> Option<ClassName> {
        self.registry.class_name_from_path(path.as_ref())
    }

    /// Resolve the class name written under the cursor, for "go to
    /// definition" style features.
    ///
    /// A dotted name must match a registered class exactly. A bare
    /// identifier matches the first registered class whose final segment
    /// equals it, which is how the scripting dialect's unqualified
    /// references behave once imports are in scope.
    pub fn class_name_at(&self, path: impl AsRef<Path>, offset: TextSize) -> Option<ClassName> {
        let declaring = self.registry.class_name_from_path(path.as_ref())?;
        let text = self.registry.document_text(&declaring)?;

        if let Some(dotted) = super::text_utils::dotted_name_at(&text, offset) {
            return self
                .registry
                .contains_class(dotted)
                .then(|| ClassName::from(dotted));
        }

        let word = super::text_utils::word_at(&text, offset)?;
        if self.registry.contains_class(word) {
            return Some(ClassName::from(word));
        }
        self.registry
            .class_names()
            .into_iter()
            .find(|name| name.rsplit('.').next() == Some(word))
    }

    /// Get the node for a class.
    pub fn get_class(&self, name: &str) -> Option<Arc<ClassNode>> {
        self.registry.get_class(name)
    }

    /// Translate an offset in a class's source document into editor
    /// coordinates. `None` if the class or the offset is unknown.
    pub fn position_in_class(&self, name: &str, offset: TextSize) -> Option<LineCol> {
        let text = self.registry.document_text(name)?;
        offset_to_line_col(&text, offset)
    }

    /// Get the registry.
    pub fn registry(&self) -> &ClassRegistry {
        self.registry
    }
}
