use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::Precedence},
};

use super::parser::Parser;

/// Dispatches on the current token; anything without a statement handler
/// is parsed as an expression statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

// let <identifier> = <expression>;
pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name = Identifier {
        token: parser.current_token().clone(),
        value: parser.current_token().literal.clone(),
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, Precedence::Lowest)?;
    parser.advance_if_peek(TokenKind::Semicolon);

    Ok(Stmt::Let(LetStmt { token, name, value }))
}

// return <expression>;
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let value = parse_expr(parser, Precedence::Lowest)?;
    parser.advance_if_peek(TokenKind::Semicolon);

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

/// The terminating `;` is optional so a lone expression at the end of the
/// input parses on its own.
pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let expression = parse_expr(parser, Precedence::Lowest)?;
    parser.advance_if_peek(TokenKind::Semicolon);

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}
