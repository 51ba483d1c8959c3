//! Syntax layer: lexer, class-file parser, and syntax tree types.
//!
//! Parsing is error tolerant. A file that fails to parse cleanly still
//! yields as much of a [`ClassFile`] as could be recognized, with the
//! problems reported as [`ParseError`] diagnostics. Editors feed
//! half-typed sources through here on every keystroke, so recognizing
//! partial declarations (a member name with nothing after it) matters
//! as much as recognizing complete ones.

mod class_file;
mod lexer;
pub mod parser;

pub use class_file::{ClassDecl, ClassFile, Import, MemberDecl, MemberDeclKind, Visibility};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{ParseError, ParseResult, is_class_file, parse_class_file};
