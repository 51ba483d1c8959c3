//! Logos-based lexer for class script files.
//!
//! Fast tokenization using the logos crate.

use crate::base::{TextRange, TextSize};
use logos::Logos;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// The source range covered by this token.
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Token classification exposed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Trivia
    Whitespace,
    LineComment,
    BlockComment,

    // Literals
    Ident,
    Number,
    String,

    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semicolon,
    Colon,
    Dot,
    Comma,
    Eq,
    EqEq,
    BangEq,
    LtEq,
    GtEq,
    AmpAmp,
    PipePipe,
    Lt,
    Gt,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Amp,
    Pipe,

    // Keywords
    PackageKw,
    ImportKw,
    ClassKw,
    InterfaceKw,
    ExtendsKw,
    ImplementsKw,
    PublicKw,
    ProtectedKw,
    PrivateKw,
    StaticKw,
    VarKw,
    FunctionKw,
    ReturnKw,
    NewKw,
    ThisKw,
    SuperKw,
    IfKw,
    ElseKw,
    ForKw,
    WhileKw,
    TrueKw,
    FalseKw,
    NullKw,

    /// Anything the lexer could not classify.
    Error,
}

impl TokenKind {
    /// Whitespace and comments, skipped by the parser.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// One of the three access-level keywords.
    pub fn is_visibility(self) -> bool {
        matches!(
            self,
            TokenKind::PublicKw | TokenKind::ProtectedKw | TokenKind::PrivateKw
        )
    }
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,

    // =========================================================================
    // KEYWORDS (longest match wins in logos)
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("extends")]
    ExtendsKw,
    #[token("implements")]
    ImplementsKw,
    #[token("public")]
    PublicKw,
    #[token("protected")]
    ProtectedKw,
    #[token("private")]
    PrivateKw,
    #[token("static")]
    StaticKw,
    #[token("var")]
    VarKw,
    #[token("function")]
    FunctionKw,
    #[token("return")]
    ReturnKw,
    #[token("new")]
    NewKw,
    #[token("this")]
    ThisKw,
    #[token("super")]
    SuperKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("for")]
    ForKw,
    #[token("while")]
    WhileKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => TokenKind::Whitespace,
            LineComment => TokenKind::LineComment,
            BlockComment => TokenKind::BlockComment,

            // Literals
            Ident => TokenKind::Ident,
            Number => TokenKind::Number,
            String => TokenKind::String,

            // Multi-char punctuation
            EqEq => TokenKind::EqEq,
            BangEq => TokenKind::BangEq,
            LtEq => TokenKind::LtEq,
            GtEq => TokenKind::GtEq,
            AmpAmp => TokenKind::AmpAmp,
            PipePipe => TokenKind::PipePipe,

            // Single-char punctuation
            LBrace => TokenKind::LBrace,
            RBrace => TokenKind::RBrace,
            LBracket => TokenKind::LBracket,
            RBracket => TokenKind::RBracket,
            LParen => TokenKind::LParen,
            RParen => TokenKind::RParen,
            Semicolon => TokenKind::Semicolon,
            Colon => TokenKind::Colon,
            Dot => TokenKind::Dot,
            Comma => TokenKind::Comma,
            Eq => TokenKind::Eq,
            Lt => TokenKind::Lt,
            Gt => TokenKind::Gt,
            Plus => TokenKind::Plus,
            Minus => TokenKind::Minus,
            Star => TokenKind::Star,
            Slash => TokenKind::Slash,
            Percent => TokenKind::Percent,
            Bang => TokenKind::Bang,
            Amp => TokenKind::Amp,
            Pipe => TokenKind::Pipe,

            // Keywords
            PackageKw => TokenKind::PackageKw,
            ImportKw => TokenKind::ImportKw,
            ClassKw => TokenKind::ClassKw,
            InterfaceKw => TokenKind::InterfaceKw,
            ExtendsKw => TokenKind::ExtendsKw,
            ImplementsKw => TokenKind::ImplementsKw,
            PublicKw => TokenKind::PublicKw,
            ProtectedKw => TokenKind::ProtectedKw,
            PrivateKw => TokenKind::PrivateKw,
            StaticKw => TokenKind::StaticKw,
            VarKw => TokenKind::VarKw,
            FunctionKw => TokenKind::FunctionKw,
            ReturnKw => TokenKind::ReturnKw,
            NewKw => TokenKind::NewKw,
            ThisKw => TokenKind::ThisKw,
            SuperKw => TokenKind::SuperKw,
            IfKw => TokenKind::IfKw,
            ElseKw => TokenKind::ElseKw,
            ForKw => TokenKind::ForKw,
            WhileKw => TokenKind::WhileKw,
            TrueKw => TokenKind::TrueKw,
            FalseKw => TokenKind::FalseKw,
            NullKw => TokenKind::NullKw,
        }
    }
}
