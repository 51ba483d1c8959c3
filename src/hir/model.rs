//! Class model types: members, class nodes, and query results.

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};
use crate::syntax::{ClassDecl, MemberDecl, MemberDeclKind};

pub use crate::syntax::Visibility;

/// Dotted, globally-unique, case-sensitive class identifier,
/// e.g. `my.app.Controller`. The registry key.
pub type ClassName = SmolStr;

/// A set of access levels, used to narrow query results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilitySet(u8);

impl VisibilitySet {
    pub const EMPTY: Self = Self(0);
    pub const PUBLIC: Self = Self::EMPTY.with(Visibility::Public);
    /// What an interface contract exposes to implementors.
    pub const PUBLIC_PROTECTED: Self = Self::PUBLIC.with(Visibility::Protected);
    pub const ALL: Self = Self::PUBLIC_PROTECTED.with(Visibility::Private);

    const fn bit(visibility: Visibility) -> u8 {
        1 << visibility as u8
    }

    pub const fn of(visibility: Visibility) -> Self {
        Self(Self::bit(visibility))
    }

    pub const fn with(self, visibility: Visibility) -> Self {
        Self(self.0 | Self::bit(visibility))
    }

    pub const fn contains(self, visibility: Visibility) -> bool {
        self.0 & Self::bit(visibility) != 0
    }
}

/// What kind of member something is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

impl MemberKind {
    /// Convert from the syntax-level declaration kind.
    pub fn from_decl(kind: MemberDeclKind) -> Self {
        match kind {
            MemberDeclKind::Field => MemberKind::Field,
            MemberDeclKind::Method => MemberKind::Method,
        }
    }

    /// Get a display label for this member kind.
    pub fn display(self) -> &'static str {
        match self {
            MemberKind::Field => "var",
            MemberKind::Method => "function",
        }
    }
}

/// One field or method, tagged with the class that declared it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: SmolStr,
    pub kind: MemberKind,
    pub visibility: Visibility,
    /// The class that declared this member. Preserved when members are
    /// flattened into inherited views, so private-ownership checks keep
    /// working on the flattened lists.
    pub owner: ClassName,
    pub is_static: bool,
    /// Opaque payload: raw parameter list for methods, `None` for fields.
    pub signature: Option<SmolStr>,
    /// Span of the name token in the declaring file.
    pub name_span: TextRange,
}

impl Member {
    fn from_decl(decl: &MemberDecl, owner: &ClassName) -> Self {
        Self {
            name: decl.name.clone(),
            kind: MemberKind::from_decl(decl.kind),
            visibility: decl.visibility,
            owner: owner.clone(),
            is_static: decl.is_static,
            signature: decl.params.clone(),
            name_span: decl.name_span,
        }
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }
}

/// A class or interface with fully resolved member lists.
///
/// Nodes are built whole from a parsed declaration and never mutated;
/// an edited file gets a complete replacement node. Every directly
/// declared member carries `owner == name`.
#[derive(Clone, Debug)]
pub struct ClassNode {
    pub name: ClassName,
    pub is_interface: bool,
    /// Single-inheritance parent, fully qualified.
    pub parent: Option<ClassName>,
    /// Implemented interfaces in declared order.
    pub interfaces: Vec<ClassName>,
    /// Directly declared fields, in declared order.
    pub fields: Vec<Member>,
    /// Directly declared methods, in declared order.
    pub methods: Vec<Member>,
    /// Span of the `{ ... }` class body in the declaring file.
    pub body_span: TextRange,
}

impl ClassNode {
    /// Build a node from a parsed declaration, stamping each member with
    /// its owner.
    pub fn from_decl(decl: &ClassDecl) -> Self {
        let name = decl.qualified_name.clone();
        let fields = decl
            .field_decls()
            .map(|m| Member::from_decl(m, &name))
            .collect();
        let methods = decl
            .method_decls()
            .map(|m| Member::from_decl(m, &name))
            .collect();
        Self {
            name,
            is_interface: decl.is_interface,
            parent: decl.parent.clone(),
            interfaces: decl.interfaces.clone(),
            fields,
            methods,
            body_span: decl.body_span,
        }
    }

    /// Directly declared members: fields first, then methods.
    pub fn own_members(&self) -> impl Iterator<Item = &Member> {
        self.fields.iter().chain(self.methods.iter())
    }

    /// Find a directly declared member by name.
    pub fn member_named(&self, name: &str) -> Option<&Member> {
        self.own_members().find(|m| m.name == name)
    }

    /// True when the offset falls on the name token of a directly
    /// declared member.
    ///
    /// The end position counts as inside: while the author is typing a
    /// name, the cursor sits immediately after the last typed character.
    pub fn is_offset_in_member_name(&self, offset: TextSize) -> bool {
        self.own_members()
            .any(|m| m.name_span.start() <= offset && offset <= m.name_span.end())
    }
}

/// A transient bundle of fields and methods produced by one query.
#[derive(Clone, Debug, Default)]
pub struct FieldsAndMethods {
    /// Either a real class name or one of the synthetic markers
    /// ([`INTERFACE_MARKER`], [`OVERRIDE_MARKER`]) identifying why these
    /// members were collected.
    ///
    /// [`INTERFACE_MARKER`]: crate::base::constants::INTERFACE_MARKER
    /// [`OVERRIDE_MARKER`]: crate::base::constants::OVERRIDE_MARKER
    pub class_name: SmolStr,
    pub fields: Vec<Member>,
    pub methods: Vec<Member>,
}

impl FieldsAndMethods {
    pub fn new(class_name: impl Into<SmolStr>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.methods.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.fields.len() + self.methods.len()
    }

    /// Narrow the bundle to the requested access levels, in place.
    ///
    /// Runs in two steps whose order matters: first the coarse
    /// access-level filter, then, when private members were requested at
    /// all, the ownership rule that drops surviving privates declared by
    /// a class other than `class_name`. A synthetic `class_name` never
    /// matches a real owner, so privates never leak through marker
    /// results.
    pub fn retain_visible(&mut self, allowed: VisibilitySet) {
        self.fields.retain(|m| allowed.contains(m.visibility));
        self.methods.retain(|m| allowed.contains(m.visibility));

        if allowed.contains(Visibility::Private) {
            let class_name = self.class_name.clone();
            self.fields
                .retain(|m| !m.is_private() || m.owner == class_name);
            self.methods
                .retain(|m| !m.is_private() || m.owner == class_name);
        }
    }
}
