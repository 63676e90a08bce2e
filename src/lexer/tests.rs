//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer literals
//! - Operators and punctuation
//! - Illegal characters
//! - The pull-based token source contract

use pretty_assertions::assert_eq;

use super::{
    lexer::{tokenize, Lexer, TokenSource, TokenStream},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.monkey".to_string()))
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("fn let true false if else return"),
        vec![
            TokenKind::Fn,
            TokenKind::Let,
            TokenKind::True,
            TokenKind::False,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore letter", None);

    let literals: Vec<&str> = tokens.iter().map(|token| token.literal.as_str()).collect();
    assert_eq!(literals, vec!["foo", "bar", "baz_123", "_underscore", "letter", ""]);

    assert!(tokens[..5].iter().all(|token| token.is(TokenKind::Identifier)));
    assert!(tokens[5].is(TokenKind::EOF));
}

#[test]
fn test_tokenize_integers() {
    let tokens = tokenize("42 0 838383", None);

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].literal, "42");
    assert_eq!(tokens[1].literal, "0");
    assert_eq!(tokens[2].literal, "838383");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= + - ! * / < > == != , ; ( ) { }"),
        vec![
            TokenKind::Assignment,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Bang,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_without_whitespace() {
    assert_eq!(
        kinds("x!=-5;y==!z"),
        vec![
            TokenKind::Identifier,
            TokenKind::NotEquals,
            TokenKind::Dash,
            TokenKind::Int,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Bang,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_let_statement() {
    let tokens = tokenize("let five = 5;", None);

    let expected = [
        (TokenKind::Let, "let"),
        (TokenKind::Identifier, "five"),
        (TokenKind::Assignment, "="),
        (TokenKind::Int, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EOF, ""),
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, literal)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
        assert_eq!(token.literal, literal);
    }
}

#[test]
fn test_illegal_characters() {
    let tokens = tokenize("a @ é", None);

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].literal, "@");
    assert_eq!(tokens[2].kind, TokenKind::Illegal);
    assert_eq!(tokens[2].literal, "é");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("let x\n  = 10;", Some("spans.monkey".to_string()));

    let spans: Vec<(u32, u32)> = tokens
        .iter()
        .map(|token| (token.span.start.0, token.span.end.0))
        .collect();

    assert_eq!(spans, vec![(0, 3), (4, 5), (8, 9), (10, 12), (12, 13), (13, 13)]);
    assert_eq!(tokens[0].span.start.1.as_str(), "spans.monkey");
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x", None);

    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_lexer_keeps_returning_eof() {
    let mut lexer = Lexer::new("x", None);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    for _ in 0..3 {
        assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    }
}

#[test]
fn test_token_stream_appends_eof() {
    let mut tokens = tokenize("a b", None);
    tokens.pop();
    let end = tokens[1].span.end.clone();

    let mut stream = TokenStream::new(tokens);

    assert_eq!(stream.next_token().literal, "a");
    assert_eq!(stream.next_token().literal, "b");

    let eof = stream.next_token();
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.span.start, end);
    assert_eq!(stream.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_empty_token_stream() {
    let mut stream = TokenStream::new(vec![]);

    assert_eq!(stream.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_token_kind_display() {
    assert_eq!(TokenKind::Identifier.to_string(), "IDENT");
    assert_eq!(TokenKind::Int.to_string(), "INT");
    assert_eq!(TokenKind::Assignment.to_string(), "=");
    assert_eq!(TokenKind::NotEquals.to_string(), "!=");
    assert_eq!(TokenKind::Fn.to_string(), "FUNCTION");
    assert_eq!(TokenKind::EOF.to_string(), "EOF");
}
