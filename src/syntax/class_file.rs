//! Syntax tree types for class script files.
//!
//! One file declares at most one class or interface. The tree keeps the
//! source spans of member name tokens and of the class body; the hir
//! layer relies on those to decide whether a cursor sits on a member name.

use smol_str::SmolStr;

use crate::base::TextRange;

/// Access level of a declaration.
///
/// An omitted modifier means public.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Get a display label for this access level.
    pub fn display(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// What a member declaration introduces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberDeclKind {
    /// `var name ...;`
    Field,
    /// `function name(params) ...`
    Method,
}

/// A single `import` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    /// Dotted path as written, e.g. `my.lib.Displayable`.
    pub path: SmolStr,
    pub span: TextRange,
}

/// One field or method declared in a class body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: SmolStr,
    pub kind: MemberDeclKind,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Raw parameter list text for methods, `None` for fields.
    pub params: Option<SmolStr>,
    /// Span of the name token in the declaring file.
    pub name_span: TextRange,
}

/// The class or interface declared by a file.
///
/// `parent` and `interfaces` hold fully-qualified references: the parser
/// resolves simple names through the file's imports and package before
/// the declaration leaves the syntax layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    /// Simple name as written in the source.
    pub name: SmolStr,
    /// Package-qualified name, the registry key.
    pub qualified_name: SmolStr,
    pub is_interface: bool,
    /// Single inheritance parent. Always `None` for interfaces; their
    /// `extends` list maps to `interfaces`.
    pub parent: Option<SmolStr>,
    /// Implemented (or, for interfaces, extended) interfaces in
    /// declared order.
    pub interfaces: Vec<SmolStr>,
    /// Members in declared order.
    pub members: Vec<MemberDecl>,
    /// Span of the class name token.
    pub name_span: TextRange,
    /// Span of the `{ ... }` class body, braces included.
    pub body_span: TextRange,
}

impl ClassDecl {
    /// Directly declared fields, in declared order.
    pub fn field_decls(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members
            .iter()
            .filter(|m| m.kind == MemberDeclKind::Field)
    }

    /// Directly declared methods, in declared order.
    pub fn method_decls(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members
            .iter()
            .filter(|m| m.kind == MemberDeclKind::Method)
    }
}

/// A parsed class script file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassFile {
    /// Dotted package name from the `package` header, if present.
    pub package: Option<SmolStr>,
    pub imports: Vec<Import>,
    /// The first class or interface declaration in the file. `None` when
    /// nothing recognizable was declared.
    pub class: Option<ClassDecl>,
}
