//! Context-sensitive member resolution.
//!
//! Each strategy recognizes one authoring situation from the cursor
//! position and answers with the member set relevant to it. The
//! dispatcher tries strategies in a fixed order and the first defined
//! answer wins; `None` from every strategy means "no context-specific
//! suggestion", which callers treat as a normal outcome.

use std::path::Path;

use smol_str::SmolStr;
use text_size::TextSize;
use tracing::{debug, trace};

use crate::base::constants::{INTERFACE_MARKER, OVERRIDE_MARKER};
use crate::hir::{ClassNode, ClassRegistry, FieldsAndMethods, VisibilitySet};

/// What a strategy may look at: the registry, the class declared by the
/// file under the cursor, and the cursor offset within that file.
pub struct StrategyContext<'a> {
    pub registry: &'a ClassRegistry,
    pub class: &'a ClassNode,
    pub offset: TextSize,
}

/// A single resolution strategy.
///
/// `fields_and_methods` returns `None` when the strategy does not apply
/// to the cursor position; a defined-but-empty bundle is a valid answer
/// and stops the dispatch.
pub trait MemberStrategy {
    fn name(&self) -> &'static str;

    fn fields_and_methods(&self, ctx: &StrategyContext<'_>) -> Option<FieldsAndMethods>;
}

/// Suggests the members an implemented interface requires.
///
/// Applies when the class implements at least one interface and the
/// cursor sits on a member-name token: the author is most likely
/// starting to declare a member the interface contract asks for. The
/// answer is the union of every implemented interface's directly
/// declared members, narrowed to public and protected — an interface's
/// private members are not part of its contract.
pub struct InterfaceMemberStrategy;

impl MemberStrategy for InterfaceMemberStrategy {
    fn name(&self) -> &'static str {
        "interface-member"
    }

    fn fields_and_methods(&self, ctx: &StrategyContext<'_>) -> Option<FieldsAndMethods> {
        if ctx.class.interfaces.is_empty() {
            return None;
        }
        if !ctx.class.is_offset_in_member_name(ctx.offset) {
            return None;
        }

        let mut result = FieldsAndMethods::new(SmolStr::new_static(INTERFACE_MARKER));
        let mut collector = UnionCollector::new(&mut result);
        for interface in &ctx.class.interfaces {
            let Some(node) = ctx.registry.get_class(interface) else {
                trace!(interface = %interface, "implemented interface not in registry");
                continue;
            };
            collector.add_own_members(&node);
        }

        result.retain_visible(VisibilitySet::PUBLIC_PROTECTED);
        Some(result)
    }
}

/// Suggests the parent's surface for an override in progress.
///
/// Applies when the class extends a parent and the cursor sits on a
/// member-name token. The answer is the parent's directly declared
/// members under the `"__override__"` marker, with no visibility
/// narrowing: overriding a protected member is legitimate, and callers
/// that need a tighter view apply [`FieldsAndMethods::retain_visible`]
/// themselves. A parent missing from the registry yields a defined
/// empty bundle, not `None` — the override context still holds.
pub struct ParentMethodStrategy;

impl MemberStrategy for ParentMethodStrategy {
    fn name(&self) -> &'static str {
        "parent-method"
    }

    fn fields_and_methods(&self, ctx: &StrategyContext<'_>) -> Option<FieldsAndMethods> {
        let parent = ctx.class.parent.as_ref()?;
        if !ctx.class.is_offset_in_member_name(ctx.offset) {
            return None;
        }

        let mut result = FieldsAndMethods::new(SmolStr::new_static(OVERRIDE_MARKER));
        if let Some(node) = ctx.registry.get_class(parent) {
            result.fields.extend(node.fields.iter().cloned());
            result.methods.extend(node.methods.iter().cloned());
        } else {
            trace!(parent = %parent, "parent class not in registry");
        }
        Some(result)
    }
}

/// Strategies in dispatch order. Interface obligations outrank override
/// suggestions when both contexts hold for the same cursor position.
static STRATEGIES: &[&(dyn MemberStrategy + Sync)] =
    &[&InterfaceMemberStrategy, &ParentMethodStrategy];

/// Strategy-dispatch entry point: resolve the member set relevant to
/// the cursor at `offset` in the file at `path`.
///
/// `None` when the path maps to no known class or no strategy applies.
pub fn fields_and_methods_at(
    registry: &ClassRegistry,
    path: &Path,
    offset: TextSize,
) -> Option<FieldsAndMethods> {
    let class_name = registry.class_name_from_path(path)?;
    let class = registry.get_class(&class_name)?;
    let ctx = StrategyContext {
        registry,
        class: &class,
        offset,
    };

    for strategy in STRATEGIES {
        if let Some(result) = strategy.fields_and_methods(&ctx) {
            debug!(
                strategy = strategy.name(),
                class = %class.name,
                members = result.member_count(),
                "strategy matched"
            );
            return Some(result);
        }
    }
    debug!(class = %class.name, offset = ?offset, "no strategy applies");
    None
}

/// Pushes each interface's own members into a bundle, keeping the first
/// declaration of every name.
struct UnionCollector<'a> {
    result: &'a mut FieldsAndMethods,
    seen_fields: rustc_hash::FxHashSet<SmolStr>,
    seen_methods: rustc_hash::FxHashSet<SmolStr>,
}

impl<'a> UnionCollector<'a> {
    fn new(result: &'a mut FieldsAndMethods) -> Self {
        Self {
            result,
            seen_fields: rustc_hash::FxHashSet::default(),
            seen_methods: rustc_hash::FxHashSet::default(),
        }
    }

    fn add_own_members(&mut self, node: &ClassNode) {
        for field in &node.fields {
            if self.seen_fields.insert(field.name.clone()) {
                self.result.fields.push(field.clone());
            }
        }
        for method in &node.methods {
            if self.seen_methods.insert(method.name.clone()) {
                self.result.methods.push(method.clone());
            }
        }
    }
}
