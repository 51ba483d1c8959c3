//! Tokenization tests against the public lexer API.

use memberscope::syntax::{Token, TokenKind, tokenize};

fn kinds_without_trivia(text: &str) -> Vec<TokenKind> {
    tokenize(text)
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_class_declaration_tokens() {
    let kinds = kinds_without_trivia("public class Controller extends Base implements I {");
    assert_eq!(
        kinds,
        vec![
            TokenKind::PublicKw,
            TokenKind::ClassKw,
            TokenKind::Ident,
            TokenKind::ExtendsKw,
            TokenKind::Ident,
            TokenKind::ImplementsKw,
            TokenKind::Ident,
            TokenKind::LBrace,
        ]
    );
}

#[test]
fn test_member_declaration_tokens() {
    let kinds = kinds_without_trivia("private static var cache = null;");
    assert_eq!(
        kinds,
        vec![
            TokenKind::PrivateKw,
            TokenKind::StaticKw,
            TokenKind::VarKw,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::NullKw,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_visibility_classification() {
    assert!(TokenKind::PublicKw.is_visibility());
    assert!(TokenKind::ProtectedKw.is_visibility());
    assert!(TokenKind::PrivateKw.is_visibility());
    assert!(!TokenKind::StaticKw.is_visibility());
    assert!(!TokenKind::Ident.is_visibility());
}

#[test]
fn test_comments_and_whitespace_are_trivia() {
    let tokens = tokenize("// header\n/* block */ class");
    assert!(tokens[0].kind.is_trivia());
    assert!(tokens[1].kind.is_trivia());
    assert!(tokens[2].kind.is_trivia());
    assert_eq!(kinds_without_trivia("// header\n/* block */ class"), vec![TokenKind::ClassKw]);
}

#[test]
fn test_unknown_character_is_error_token() {
    let kinds = kinds_without_trivia("var x @ 1;");
    assert!(kinds.contains(&TokenKind::Error), "Got: {:?}", kinds);
}

#[test]
fn test_token_text_matches_source() {
    let source = "function render(target) {}";
    let tokens: Vec<Token<'_>> = tokenize(source)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .collect();

    for token in &tokens {
        let range = token.range();
        assert_eq!(
            &source[range],
            token.text,
            "token text must match its range"
        );
    }
}

#[test]
fn test_both_string_quote_styles() {
    let kinds = kinds_without_trivia(r#"var a = "x"; var b = 'y';"#);
    let strings = kinds.iter().filter(|k| **k == TokenKind::String).count();
    assert_eq!(strings, 2);
}
