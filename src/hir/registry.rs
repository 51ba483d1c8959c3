//! Class registry: documents in, class nodes and member queries out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, trace};

use crate::hir::model::{ClassName, ClassNode, Member, MemberKind};
use crate::syntax::{ClassDecl, ParseError, parse_class_file};

/// Hard failures raised by inheritance-chain walks.
///
/// Everything else about the registry degrades softly: unknown names
/// and paths produce `None` or empty lists. A hierarchy that loops is
/// the one condition that cannot be answered meaningfully.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// The parent or interface graph loops back onto the resolution path.
    #[error("cyclic hierarchy involving `{class_name}`: {chain}")]
    CyclicHierarchy { class_name: ClassName, chain: String },
}

impl HierarchyError {
    fn cyclic(origin: &str, path: &[ClassName], repeated: &str) -> Self {
        let mut chain = String::new();
        for entry in path {
            chain.push_str(entry);
            chain.push_str(" -> ");
        }
        chain.push_str(repeated);
        Self::CyclicHierarchy {
            class_name: SmolStr::from(origin),
            chain,
        }
    }
}

/// One tracked source document.
#[derive(Clone, Debug)]
struct SourceDocument {
    path: PathBuf,
    text: Arc<str>,
    /// Parsed declaration, `None` when the file declared nothing usable.
    decl: Option<ClassDecl>,
}

/// Process-wide cache of class definitions.
///
/// Documents go in through [`set_source`]; class nodes come out of a
/// lazily filled cache. Invalidation is whole-node: an updated file
/// evicts its cached node, and the next query builds and publishes a
/// complete replacement (`Arc` swap). A reader holding the old node
/// keeps a consistent, fully built value; no reader ever observes a
/// partially updated one.
///
/// [`set_source`]: ClassRegistry::set_source
pub struct ClassRegistry {
    documents: IndexMap<ClassName, SourceDocument>,
    by_path: FxHashMap<PathBuf, ClassName>,
    nodes: RwLock<IndexMap<ClassName, Arc<ClassNode>>>,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ClassRegistry {
    fn clone(&self) -> Self {
        Self {
            documents: self.documents.clone(),
            by_path: self.by_path.clone(),
            nodes: RwLock::new(self.nodes.read().clone()),
        }
    }
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self {
            documents: IndexMap::new(),
            by_path: FxHashMap::default(),
            nodes: RwLock::new(IndexMap::new()),
        }
    }

    // ==================== document maintenance ====================

    /// Record the current text of a file, parse it, and evict any node
    /// the file had published. Returns the parse diagnostics; a file
    /// with problems still contributes whatever was recognizable.
    pub fn set_source(&mut self, path: impl Into<PathBuf>, text: &str) -> Vec<ParseError> {
        let result = parse_class_file(text);
        let decl = result.content.and_then(|file| file.class);
        self.set_parsed(path, Arc::from(text), decl);
        result.errors
    }

    /// Install an already-parsed document. Same bookkeeping as
    /// [`set_source`](ClassRegistry::set_source) without the parse, for
    /// callers that parse in bulk (library loading).
    pub fn set_parsed(&mut self, path: impl Into<PathBuf>, text: Arc<str>, decl: Option<ClassDecl>) {
        let path = path.into();
        let new_name = decl.as_ref().map(|d| d.qualified_name.clone());

        // A re-saved file may have renamed its class; drop the old entry.
        let old_name = self.by_path.get(&path).cloned();
        if let Some(old_name) = old_name {
            if Some(&old_name) != new_name.as_ref() {
                self.drop_class(&old_name);
            }
        }

        match new_name {
            Some(name) => {
                debug!(class = %name, path = %path.display(), "document updated");
                self.by_path.insert(path.clone(), name.clone());
                self.nodes.write().shift_remove(&name);
                self.documents.insert(name, SourceDocument { path, text, decl });
            }
            None => {
                debug!(path = %path.display(), "document declares no class");
                self.by_path.remove(&path);
            }
        }
    }

    /// Copy every document from `other` into this registry, replacing
    /// same-named classes. Nodes are rebuilt lazily on the next query.
    pub fn extend_from(&mut self, other: &ClassRegistry) {
        for doc in other.documents.values() {
            self.set_parsed(doc.path.clone(), Arc::clone(&doc.text), doc.decl.clone());
        }
    }

    /// Forget the document at `path` and the class it declared.
    pub fn remove_path(&mut self, path: &Path) {
        if let Some(name) = self.by_path.remove(path) {
            // Another path may have taken the class name over since.
            if self.documents.get(&name).is_some_and(|doc| doc.path == path) {
                self.drop_class(&name);
            }
        }
    }

    /// Forget a class by name, including its document and path mapping.
    pub fn remove_class(&mut self, name: &str) {
        if let Some(doc) = self.documents.shift_remove(name) {
            self.by_path.remove(&doc.path);
        }
        self.nodes.write().shift_remove(name);
    }

    fn drop_class(&mut self, name: &ClassName) {
        self.documents.shift_remove(name);
        self.nodes.write().shift_remove(name);
    }

    // ==================== lookups ====================

    /// Map a file path to the class it declares.
    ///
    /// Pure lookup: never parses, never builds. `None` for paths the
    /// registry has not seen.
    pub fn class_name_from_path(&self, path: &Path) -> Option<ClassName> {
        self.by_path.get(path).cloned()
    }

    pub fn has_path(&self, path: &Path) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    /// Registered class names, in document insertion order.
    pub fn class_names(&self) -> Vec<ClassName> {
        self.documents.keys().cloned().collect()
    }

    /// Raw text of the document backing a class.
    pub fn document_text(&self, name: &str) -> Option<Arc<str>> {
        self.documents.get(name).map(|doc| Arc::clone(&doc.text))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    // ==================== node access ====================

    /// Fetch the node for a class, building and publishing it on first
    /// access after an edit.
    ///
    /// `None` when the class is unknown or its document declared nothing
    /// usable; both are normal outcomes, not errors.
    pub fn get_class(&self, name: &str) -> Option<Arc<ClassNode>> {
        if let Some(node) = self.nodes.read().get(name) {
            return Some(Arc::clone(node));
        }

        let document = self.documents.get(name)?;
        let decl = document.decl.as_ref()?;
        let node = Arc::new(ClassNode::from_decl(decl));
        debug!(class = %node.name, "class node built");

        let mut nodes = self.nodes.write();
        // A racing reader may have published first; keep whichever won.
        let published = nodes.entry(node.name.clone()).or_insert(node);
        Some(Arc::clone(published))
    }

    // ==================== member queries ====================

    /// Fields of a class.
    ///
    /// With `include_inherited`, the effective list: own fields, then
    /// each ancestor's (nearest first), then interface contributions,
    /// de-duplicated by name with the nearest declaration winning.
    pub fn class_fields(
        &self,
        name: &str,
        include_inherited: bool,
    ) -> Result<Vec<Member>, HierarchyError> {
        self.collect_members(name, include_inherited, MemberKind::Field)
    }

    /// Methods of a class; ordering and de-duplication as for
    /// [`class_fields`](ClassRegistry::class_fields).
    pub fn class_methods(
        &self,
        name: &str,
        include_inherited: bool,
    ) -> Result<Vec<Member>, HierarchyError> {
        self.collect_members(name, include_inherited, MemberKind::Method)
    }

    fn collect_members(
        &self,
        name: &str,
        include_inherited: bool,
        kind: MemberKind,
    ) -> Result<Vec<Member>, HierarchyError> {
        if !include_inherited {
            let members = match self.get_class(name) {
                Some(node) => match kind {
                    MemberKind::Field => node.fields.clone(),
                    MemberKind::Method => node.methods.clone(),
                },
                None => Vec::new(),
            };
            return Ok(members);
        }

        let mut collector = MemberCollector::new(kind);

        // Phase 1: the class and its parent chain, nearest first. Every
        // ancestor's interface list is recorded for phase 2 in the same
        // nearest-first order.
        let mut chain: Vec<ClassName> = Vec::new();
        let mut on_chain: FxHashSet<ClassName> = FxHashSet::default();
        let mut interface_seeds: Vec<ClassName> = Vec::new();
        let mut current: Option<ClassName> = Some(SmolStr::from(name));

        while let Some(class_name) = current {
            if !on_chain.insert(class_name.clone()) {
                return Err(HierarchyError::cyclic(name, &chain, &class_name));
            }
            let Some(node) = self.get_class(&class_name) else {
                // Unknown ancestors contribute nothing.
                trace!(class = %class_name, "ancestor not in registry");
                break;
            };
            collector.extend_own(&node);
            interface_seeds.extend(node.interfaces.iter().cloned());
            chain.push(class_name);
            current = node.parent.clone();
        }

        // Phase 2: interface contributions. Each seed expands depth
        // first in declared order. Nodes collected in phase 1 count as
        // visited, so an interface that reaches back into the parent
        // chain de-duplicates instead of erroring; only a loop within
        // the active expansion path is a cycle.
        let mut visited = on_chain;
        let mut path: Vec<ClassName> = Vec::new();
        let mut path_set: FxHashSet<ClassName> = FxHashSet::default();
        for seed in &interface_seeds {
            self.expand_interface(
                name,
                seed,
                &mut path,
                &mut path_set,
                &mut visited,
                &mut collector,
            )?;
        }

        Ok(collector.into_members())
    }

    /// Depth-first, preorder expansion of one interface: its own
    /// members, then its parent, then its interfaces in declared order.
    fn expand_interface(
        &self,
        origin: &str,
        class_name: &ClassName,
        path: &mut Vec<ClassName>,
        path_set: &mut FxHashSet<ClassName>,
        visited: &mut FxHashSet<ClassName>,
        collector: &mut MemberCollector,
    ) -> Result<(), HierarchyError> {
        if path_set.contains(class_name) {
            return Err(HierarchyError::cyclic(origin, path, class_name));
        }
        if !visited.insert(class_name.clone()) {
            // Diamond: this interface was fully expanded already.
            trace!(class = %class_name, "interface already expanded");
            return Ok(());
        }
        let Some(node) = self.get_class(class_name) else {
            return Ok(());
        };

        path.push(class_name.clone());
        path_set.insert(class_name.clone());

        collector.extend_own(&node);
        if let Some(parent) = node.parent.as_ref() {
            self.expand_interface(origin, parent, path, path_set, visited, collector)?;
        }
        for interface in &node.interfaces {
            self.expand_interface(origin, interface, path, path_set, visited, collector)?;
        }

        path.pop();
        path_set.remove(class_name);
        Ok(())
    }
}

/// Accumulates members of one kind, first declaration of a name wins.
struct MemberCollector {
    kind: MemberKind,
    members: Vec<Member>,
    seen: FxHashSet<SmolStr>,
}

impl MemberCollector {
    fn new(kind: MemberKind) -> Self {
        Self {
            kind,
            members: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    fn extend_own(&mut self, node: &ClassNode) {
        let source = match self.kind {
            MemberKind::Field => &node.fields,
            MemberKind::Method => &node.methods,
        };
        for member in source {
            if self.seen.insert(member.name.clone()) {
                self.members.push(member.clone());
            } else {
                trace!(
                    member = %member.name,
                    owner = %member.owner,
                    "shadowed by nearer declaration"
                );
            }
        }
    }

    fn into_members(self) -> Vec<Member> {
        self.members
    }
}
