//! Completion suggestions implementation.

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use text_size::TextSize;

use crate::base::constants::{INTERFACE_MARKER, OVERRIDE_MARKER};
use crate::hir::{ClassRegistry, FieldsAndMethods, Member, MemberKind};
use crate::ide::strategies::fields_and_methods_at;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Field,
    Method,
    Keyword,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Field => 5,    // Field
            CompletionKind::Method => 2,   // Method
            CompletionKind::Keyword => 14, // Keyword
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a resolved member.
    ///
    /// The detail line carries access level and kind, plus the declaring
    /// class when it differs from `origin` (always the case for results
    /// tagged with a synthetic marker).
    pub fn from_member(member: &Member, origin: &str) -> Self {
        let kind = match member.kind {
            MemberKind::Field => CompletionKind::Field,
            MemberKind::Method => CompletionKind::Method,
        };

        let mut detail = match member.kind {
            MemberKind::Field => format!("{} var", member.visibility.display()),
            MemberKind::Method => format!(
                "{} function({})",
                member.visibility.display(),
                member.signature.as_deref().unwrap_or("")
            ),
        };
        if member.owner != origin {
            detail.push_str(&format!(" [{}]", member.owner));
        }

        let mut item = Self::new(member.name.as_str(), kind).with_detail(detail);
        if member.kind == MemberKind::Method {
            item = item.with_insert_text(format!(
                "{}({})",
                member.name,
                member.signature.as_deref().unwrap_or("")
            ));
        }
        item
    }
}

/// Get completion suggestions at a position.
///
/// Member suggestions come from the strategy dispatch: interface
/// obligations first, then override candidates, each under its marker
/// priority. Language keywords are always appended with a lower
/// priority, so a cursor outside any member-name context still gets a
/// usable list.
pub fn completions(registry: &ClassRegistry, path: &Path, offset: TextSize) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    if let Some(bundle) = fields_and_methods_at(registry, path, offset) {
        let priority = marker_priority(&bundle);
        for member in bundle.fields.iter().chain(bundle.methods.iter()) {
            items.push(
                CompletionItem::from_member(member, &bundle.class_name).with_priority(priority),
            );
        }
    }

    items.extend(keyword_completions());

    // Sort by priority, label breaking ties; keep the first of each label.
    items.sort_by(|a, b| {
        (a.sort_priority, a.label.as_ref()).cmp(&(b.sort_priority, b.label.as_ref()))
    });
    let mut seen: FxHashSet<Arc<str>> = FxHashSet::default();
    items.retain(|item| seen.insert(Arc::clone(&item.label)));

    items
}

fn marker_priority(bundle: &FieldsAndMethods) -> u32 {
    match bundle.class_name.as_str() {
        INTERFACE_MARKER => 10,
        OVERRIDE_MARKER => 20,
        _ => 30,
    }
}

/// Get keyword completions.
fn keyword_completions() -> Vec<CompletionItem> {
    let keywords = [
        ("class", "class ${1:Name} {\n\t$0\n}"),
        ("interface", "interface ${1:Name} {\n\t$0\n}"),
        ("package", "package ${1:name};"),
        ("import", "import ${1:path};"),
        ("extends", "extends ${1:Parent}"),
        ("implements", "implements ${1:Interface}"),
        ("public var", "public var ${1:name};"),
        ("public function", "public function ${1:name}(${2:params}) {\n\t$0\n}"),
        ("private var", "private var ${1:name};"),
        ("private function", "private function ${1:name}(${2:params}) {\n\t$0\n}"),
        ("protected function", "protected function ${1:name}(${2:params}) {\n\t$0\n}"),
        ("static var", "static var ${1:name};"),
    ];

    keywords
        .iter()
        .enumerate()
        .map(|(i, (label, snippet))| {
            CompletionItem::new(*label, CompletionKind::Keyword)
                .with_insert_text(*snippet)
                .with_priority(100 + i as u32)
        })
        .collect()
}
