//! Class-file parsing interface.
//!
//! [`parse_class_file`] never fails: it returns whatever structure it
//! could recognize together with the errors it ran into. Method bodies
//! and field initializers are skipped by bracket matching rather than
//! parsed, so a broken statement inside a body cannot take down the
//! member list around it.

use smol_str::SmolStr;
use tracing::trace;

use crate::base::constants::CLASS_FILE_EXT;
use crate::base::{LineCol, LineIndex, TextRange, TextSize};
use crate::syntax::class_file::{
    ClassDecl, ClassFile, Import, MemberDecl, MemberDeclKind, Visibility,
};
use crate::syntax::lexer::{Lexer, Token, TokenKind};
use std::path::Path;

/// Parse error type for syntax-level errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    /// 0-indexed position of the offending token (or end of file).
    pub position: LineCol,
    pub offset: TextSize,
}

impl ParseError {
    pub fn syntax_error(message: impl Into<String>, position: LineCol, offset: TextSize) -> Self {
        Self {
            message: message.into(),
            position,
            offset,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parse result containing content and any errors
#[derive(Debug)]
pub struct ParseResult<T> {
    pub content: Option<T>,
    pub errors: Vec<ParseError>,
}

impl<T> ParseResult<T> {
    pub fn ok(content: T) -> Self {
        Self {
            content: Some(content),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(errors: Vec<ParseError>) -> Self {
        Self {
            content: None,
            errors,
        }
    }

    pub fn with_content_and_errors(content: T, errors: Vec<ParseError>) -> Self {
        Self {
            content: Some(content),
            errors,
        }
    }

    /// Check if parsing succeeded without errors
    pub fn is_ok(&self) -> bool {
        self.content.is_some() && self.errors.is_empty()
    }

    /// Check if there are any parse errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Check whether a path carries the class-file extension.
pub fn is_class_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(CLASS_FILE_EXT)
}

/// Parse the source text of one class script file.
///
/// The returned content is always present; a file with nothing
/// recognizable in it simply has `class: None`.
pub fn parse_class_file(text: &str) -> ParseResult<ClassFile> {
    Parser::new(text).parse_file()
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    errors: Vec<ParseError>,
    line_index: LineIndex,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = Lexer::new(text)
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            text,
            tokens,
            pos: 0,
            errors: Vec::new(),
            line_index: LineIndex::new(text),
        }
    }

    // ==================== token cursor ====================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn peek_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Option<Token<'a>> {
        if self.at(kind) {
            self.bump()
        } else {
            self.error_here(format!("expected {what}"));
            None
        }
    }

    fn eof_offset(&self) -> TextSize {
        self.line_index.len()
    }

    fn error_at(&mut self, offset: TextSize, message: impl Into<String>) {
        let position = self.line_index.line_col(offset).unwrap_or_default();
        self.errors
            .push(ParseError::syntax_error(message, position, offset));
    }

    fn error_here(&mut self, message: impl Into<String>) {
        let offset = self.current().map(|t| t.offset).unwrap_or(self.eof_offset());
        self.error_at(offset, message);
    }

    // ==================== grammar ====================

    fn parse_file(mut self) -> ParseResult<ClassFile> {
        let mut file = ClassFile::default();

        while let Some(kind) = self.kind() {
            match kind {
                TokenKind::PackageKw => {
                    let package = self.parse_package();
                    if file.package.is_none() {
                        file.package = package;
                    } else {
                        self.error_here("duplicate package declaration");
                    }
                }
                TokenKind::ImportKw => {
                    if let Some(import) = self.parse_import() {
                        file.imports.push(import);
                    }
                }
                TokenKind::ClassKw
                | TokenKind::InterfaceKw
                | TokenKind::PublicKw
                | TokenKind::ProtectedKw
                | TokenKind::PrivateKw
                | TokenKind::StaticKw => {
                    let decl = self.parse_class_decl();
                    match (decl, &file.class) {
                        (Some(decl), None) => file.class = Some(decl),
                        (Some(decl), Some(_)) => {
                            // One class per file; later declarations are ignored.
                            self.error_at(
                                decl.name_span.start(),
                                format!("`{}` ignored: one class per file", decl.name),
                            );
                        }
                        (None, _) => {}
                    }
                }
                _ => {
                    let text = self.current().map(|t| t.text).unwrap_or_default();
                    trace!(token = text, "skipping unexpected top-level token");
                    self.error_here(format!("unexpected `{text}`"));
                    self.bump();
                }
            }
        }

        if let Some(decl) = file.class.as_mut() {
            resolve_references(decl, file.package.as_deref(), &file.imports);
        }

        let errors = std::mem::take(&mut self.errors);
        if errors.is_empty() {
            ParseResult::ok(file)
        } else {
            ParseResult::with_content_and_errors(file, errors)
        }
    }

    fn parse_package(&mut self) -> Option<SmolStr> {
        self.bump(); // `package`
        let name = self.parse_dotted_name("package name")?;
        if !self.eat(TokenKind::Semicolon) {
            self.error_here("expected `;` after package declaration");
        }
        Some(name)
    }

    fn parse_import(&mut self) -> Option<Import> {
        let keyword = self.bump()?; // `import`
        let start = keyword.offset;
        let path = self.parse_dotted_name("import path")?;
        let end = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map(|t| t.range().end())
            .unwrap_or(start);
        if !self.eat(TokenKind::Semicolon) {
            self.error_here("expected `;` after import");
        }
        Some(Import {
            path,
            span: TextRange::new(start, end),
        })
    }

    /// Parse a dotted name like `my.lib.Base`, stopping before a trailing
    /// dot that is not followed by an identifier.
    fn parse_dotted_name(&mut self, what: &str) -> Option<SmolStr> {
        let first = self.expect(TokenKind::Ident, what)?;
        let mut name = String::from(first.text);
        while self.at(TokenKind::Dot) && self.peek_kind(1) == Some(TokenKind::Ident) {
            self.bump(); // `.`
            if let Some(segment) = self.bump() {
                name.push('.');
                name.push_str(segment.text);
            }
        }
        Some(SmolStr::from(name))
    }

    fn parse_class_decl(&mut self) -> Option<ClassDecl> {
        // Modifiers on the declaration itself are accepted but not modeled.
        while matches!(
            self.kind(),
            Some(
                TokenKind::PublicKw
                    | TokenKind::ProtectedKw
                    | TokenKind::PrivateKw
                    | TokenKind::StaticKw
            )
        ) {
            self.bump();
        }

        let is_interface = match self.kind() {
            Some(TokenKind::ClassKw) => {
                self.bump();
                false
            }
            Some(TokenKind::InterfaceKw) => {
                self.bump();
                true
            }
            _ => {
                self.error_here("expected `class` or `interface`");
                self.bump();
                return None;
            }
        };

        let name_token = self.expect(TokenKind::Ident, "class name")?;
        let name = SmolStr::from(name_token.text);
        let name_span = name_token.range();

        let mut parent: Option<SmolStr> = None;
        let mut interfaces: Vec<SmolStr> = Vec::new();

        loop {
            match self.kind() {
                Some(TokenKind::ExtendsKw) => {
                    self.bump();
                    if is_interface {
                        // An interface may extend several interfaces; they
                        // all land in the interface list.
                        self.parse_reference_list(&mut interfaces);
                    } else {
                        if parent.is_some() {
                            self.error_here("duplicate `extends` clause");
                        }
                        let reference = self.parse_dotted_name("parent class name");
                        if parent.is_none() {
                            parent = reference;
                        }
                        while self.eat(TokenKind::Comma) {
                            self.error_here("a class extends a single parent");
                            let _ = self.parse_dotted_name("parent class name");
                        }
                    }
                }
                Some(TokenKind::ImplementsKw) => {
                    self.bump();
                    self.parse_reference_list(&mut interfaces);
                }
                Some(TokenKind::LBrace) => break,
                _ => break,
            }
        }

        let (members, body_span) = if self.at(TokenKind::LBrace) {
            self.parse_class_body()
        } else {
            // Half-typed declaration with no body yet.
            self.error_here("expected `{` to open class body");
            (Vec::new(), TextRange::empty(name_span.end()))
        };

        Some(ClassDecl {
            name,
            // Filled in by resolve_references once imports are known.
            qualified_name: SmolStr::default(),
            is_interface,
            parent,
            interfaces,
            members,
            name_span,
            body_span,
        })
    }

    fn parse_reference_list(&mut self, out: &mut Vec<SmolStr>) {
        loop {
            match self.parse_dotted_name("interface name") {
                Some(name) => out.push(name),
                None => break,
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    fn parse_class_body(&mut self) -> (Vec<MemberDecl>, TextRange) {
        let open = match self.bump() {
            Some(token) => token,
            None => return (Vec::new(), TextRange::empty(self.eof_offset())),
        };
        let start = open.offset;
        let mut members = Vec::new();

        loop {
            match self.kind() {
                None => {
                    self.error_here("unclosed class body");
                    return (members, TextRange::new(start, self.eof_offset()));
                }
                Some(TokenKind::RBrace) => {
                    let end = self.bump().map(|t| t.range().end()).unwrap_or(start);
                    return (members, TextRange::new(start, end));
                }
                Some(
                    TokenKind::PublicKw
                    | TokenKind::ProtectedKw
                    | TokenKind::PrivateKw
                    | TokenKind::StaticKw
                    | TokenKind::VarKw
                    | TokenKind::FunctionKw,
                ) => {
                    if let Some(member) = self.parse_member() {
                        members.push(member);
                    }
                }
                Some(TokenKind::Semicolon) => {
                    self.bump();
                }
                _ => {
                    let text = self.current().map(|t| t.text).unwrap_or_default();
                    trace!(token = text, "skipping unexpected token in class body");
                    self.error_here(format!("unexpected `{text}` in class body"));
                    self.bump();
                }
            }
        }
    }

    fn parse_member(&mut self) -> Option<MemberDecl> {
        let mut visibility = Visibility::default();
        let mut is_static = false;

        loop {
            match self.kind() {
                Some(TokenKind::PublicKw) => {
                    visibility = Visibility::Public;
                    self.bump();
                }
                Some(TokenKind::ProtectedKw) => {
                    visibility = Visibility::Protected;
                    self.bump();
                }
                Some(TokenKind::PrivateKw) => {
                    visibility = Visibility::Private;
                    self.bump();
                }
                Some(TokenKind::StaticKw) => {
                    is_static = true;
                    self.bump();
                }
                _ => break,
            }
        }

        match self.kind() {
            Some(TokenKind::VarKw) => {
                self.bump();
                self.parse_field(visibility, is_static)
            }
            Some(TokenKind::FunctionKw) => {
                self.bump();
                self.parse_method(visibility, is_static)
            }
            Some(TokenKind::RBrace) | None => {
                // Modifiers with nothing after them while the author types.
                self.error_here("expected `var` or `function`");
                None
            }
            _ => {
                self.error_here("expected `var` or `function`");
                self.bump();
                None
            }
        }
    }

    fn parse_field(&mut self, visibility: Visibility, is_static: bool) -> Option<MemberDecl> {
        let name_token = self.expect(TokenKind::Ident, "field name")?;
        let name = SmolStr::from(name_token.text);
        let name_span = name_token.range();

        if self.eat(TokenKind::Eq) {
            self.skip_initializer();
        }
        if !self.eat(TokenKind::Semicolon) {
            self.error_here("expected `;` after field declaration");
        }

        Some(MemberDecl {
            name,
            kind: MemberDeclKind::Field,
            visibility,
            is_static,
            params: None,
            name_span,
        })
    }

    fn parse_method(&mut self, visibility: Visibility, is_static: bool) -> Option<MemberDecl> {
        let name_token = self.expect(TokenKind::Ident, "method name")?;
        let name = SmolStr::from(name_token.text);
        let name_span = name_token.range();

        let params = if self.at(TokenKind::LParen) {
            Some(self.parse_param_list())
        } else {
            None
        };

        match self.kind() {
            Some(TokenKind::LBrace) => self.skip_block(),
            Some(TokenKind::Semicolon) => {
                self.bump();
            }
            // A half-typed method still contributes a member; the body
            // loop resynchronizes on whatever comes next.
            _ => self.error_here("expected method body"),
        }

        Some(MemberDecl {
            name,
            kind: MemberDeclKind::Method,
            visibility,
            is_static,
            params,
            name_span,
        })
    }

    /// Capture the raw text between matching parentheses as the method's
    /// opaque signature payload.
    fn parse_param_list(&mut self) -> SmolStr {
        let open = match self.bump() {
            Some(token) => token,
            None => return SmolStr::default(),
        };
        let content_start = usize::from(open.range().end());

        let mut depth = 0u32;
        let mut content_end = self.text.len();
        let mut closed = false;

        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen if depth == 0 => {
                    content_end = usize::from(token.offset);
                    self.bump();
                    closed = true;
                    break;
                }
                TokenKind::RParen => depth -= 1,
                _ => {}
            }
            self.bump();
        }

        if !closed {
            self.error_here("unclosed parameter list");
        }

        SmolStr::from(self.text[content_start..content_end].trim())
    }

    /// Skip a field initializer up to the terminating `;`, keeping brace,
    /// bracket, and paren nesting balanced so object and array literals
    /// pass through intact.
    fn skip_initializer(&mut self) {
        let mut depth = 0u32;
        while let Some(kind) = self.kind() {
            match kind {
                TokenKind::LBrace | TokenKind::LBracket | TokenKind::LParen => depth += 1,
                TokenKind::RBrace | TokenKind::RBracket | TokenKind::RParen if depth > 0 => {
                    depth -= 1
                }
                TokenKind::RBrace => return, // class body close
                TokenKind::Semicolon if depth == 0 => return,
                _ => {}
            }
            self.bump();
        }
    }

    /// Skip a `{ ... }` block including the braces.
    fn skip_block(&mut self) {
        self.bump(); // `{`
        let mut depth = 1u32;
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
        self.error_here("unclosed block");
    }
}

// ==================== reference resolution ====================

/// Qualify the declared name and resolve parent/interface references to
/// fully-qualified names using the file's imports and package.
fn resolve_references(decl: &mut ClassDecl, package: Option<&str>, imports: &[Import]) {
    decl.qualified_name = qualify(package, &decl.name);
    if let Some(parent) = decl.parent.take() {
        decl.parent = Some(resolve_reference(&parent, package, imports));
    }
    for interface in decl.interfaces.iter_mut() {
        *interface = resolve_reference(interface, package, imports);
    }
}

fn qualify(package: Option<&str>, name: &str) -> SmolStr {
    match package {
        Some(package) => SmolStr::from(format!("{package}.{name}")),
        None => SmolStr::from(name),
    }
}

/// Resolve a written reference to a fully-qualified name: dotted names
/// stay as written, simple names go through imports (matching the final
/// segment), then the file's own package.
fn resolve_reference(name: &str, package: Option<&str>, imports: &[Import]) -> SmolStr {
    if name.contains('.') {
        return SmolStr::from(name);
    }
    for import in imports {
        if import.path.rsplit('.').next() == Some(name) {
            return import.path.clone();
        }
    }
    qualify(package, name)
}
