//! Integration tests for the front-end.
//!
//! These tests drive the public API the way a downstream stage would:
//! source text through the lexer and parser, then either the program
//! reconstruction or the rendered error list.

use monkey::{
    ast::ast::{Expr, Node, Stmt},
    errors::errors::ErrorImpl,
    format_error,
    lexer::{
        lexer::{tokenize, Lexer, TokenStream},
        tokens::TokenKind,
    },
    parser::parser::{parse, parse_source, Parser},
};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_program_end_to_end() {
    let source = "let x = 5;\nlet y = x * (2 + 3);\nreturn -y == !x;\nx + y";
    let (program, errors) = parse(Lexer::new(source, Some("main.monkey".to_string())));

    assert!(errors.is_empty());
    assert_eq!(program.len(), 4);
    assert_eq!(
        program.to_string(),
        "let x = 5;let y = (x * (2 + 3));return ((-y) == (!x));(x + y)"
    );
    assert_eq!(program.token_literal(), "let");
}

#[test]
fn test_statement_kinds_are_exhaustive() {
    let (program, _) = parse_source("let a = 1; return a; a;");

    let labels: Vec<&str> = program
        .iter()
        .map(|stmt| match stmt {
            Stmt::Let(_) => "let",
            Stmt::Return(_) => "return",
            Stmt::Expression(_) => "expression",
        })
        .collect();

    assert_eq!(labels, vec!["let", "return", "expression"]);
}

#[test]
fn test_tokens_and_lexer_produce_same_tree() {
    let source = "let total = price * quantity - discount;";

    let (from_lexer, _) = parse(Lexer::new(source, None));
    let (from_tokens, _) = parse(TokenStream::new(tokenize(source, None)));

    assert_eq!(from_lexer, from_tokens);
}

#[test]
fn test_spans_point_into_source() {
    let source = "let answer = 4 * 10;";
    let (program, _) = parse_source(source);

    match &program.statements[0] {
        Stmt::Let(let_stmt) => {
            let span = let_stmt.name.token.span.clone();
            assert_eq!(&source[span.start.0 as usize..span.end.0 as usize], "answer");

            match &let_stmt.value {
                Expr::Infix(infix) => assert_eq!(infix.token.span.start.0, 15),
                other => panic!("expected an infix expression, got {:?}", other),
            }
        }
        other => panic!("expected a let statement, got {:?}", other),
    }
}

#[test]
fn test_node_spans() {
    let source = "let a = 1;
return -a;
b * 3";
    let (program, errors) = parse_source(source);
    assert!(errors.is_empty());

    let starts: Vec<u32> = program.iter().map(|stmt| stmt.get_span().start.0).collect();
    assert_eq!(starts, vec![0, 11, 22]);

    match &program.statements[1] {
        Stmt::Return(return_stmt) => {
            let span = return_stmt.value.get_span();
            assert_eq!((span.start.0, span.end.0), (18, 19));
            assert_eq!(&source[span.start.0 as usize..span.end.0 as usize], "-");
        }
        other => panic!("expected a return statement, got {:?}", other),
    }

    match &program.statements[2] {
        Stmt::Expression(stmt) => {
            // An infix node is located by its operator; the statement by its first token.
            assert_eq!(stmt.expression.get_span().start.0, 24);
            assert_eq!(program.statements[2].get_span().start.0, 22);
        }
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_recovery_keeps_later_statements() {
    let source = "let a = 1;\nlet b 2;\nlet c = a + ;\nlet d = 4;";
    let (program, errors) = parse_source(source);

    let messages: Vec<String> = errors.iter().map(|error| error.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "expected next token to be =, got INT",
            "no prefix parse function for ; found",
        ]
    );
    assert_eq!(program.to_string(), "let a = 1;let d = 4;");
}

#[test]
fn test_error_kinds() {
    let (_, errors) = parse_source("let x 5; ); 99999999999999999999;");

    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assignment,
            got: TokenKind::Int,
        }
    );
    assert_eq!(
        errors[1].get_kind(),
        &ErrorImpl::MissingPrefixParser {
            token: TokenKind::CloseParen,
        }
    );
    assert!(matches!(
        errors[2].get_kind(),
        ErrorImpl::IntegerParseError { literal } if literal == "99999999999999999999"
    ));
}

#[test]
fn test_format_error() {
    let source = "let x 5;";
    let (_, errors) = parse_source(source);

    assert_eq!(
        format_error(&errors[0], source),
        "Error: UnexpectedToken (expected next token to be =, got INT)\n\
         -> shell\n\
         \x20 |\n\
         1 | let x 5;\n\
         \x20 | ------^\n\
         help: insert `=` here\n"
    );
}

#[test]
fn test_format_error_on_later_line() {
    let source = "let a = 1;\n    a + 99999999999999999999;";
    let (_, errors) = parse_source(source);

    let rendered = format_error(&errors[0], source);
    assert!(rendered.starts_with("Error: IntegerParseError (could not parse \"99999999999999999999\" as integer)\n"));
    assert!(rendered.contains("2 | a + 99999999999999999999;\n"));
    assert!(rendered.contains("  | ----^\n"));
}

#[test]
fn test_parser_can_be_driven_directly() {
    let mut parser = Parser::new(Lexer::new("1 + 2 * 3", None));
    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "(1 + (2 * 3))");

    // Exhausted: further calls see only EOF.
    assert!(parser.parse_program().is_empty());
}
