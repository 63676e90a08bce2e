use crate::{
    ast::{
        ast::Expr,
        expressions::{Identifier, InfixExpr, IntegerLiteral, PrefixExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    stack::ensure_sufficient_stack,
};

use super::{lookups::Precedence, parser::Parser};

/// Pratt loop. `precedence` is the minimum binding power the caller
/// accepts; infix operators that bind more loosely are left for the caller.
///
/// Expects the current token to begin the expression and leaves the current
/// token on its last token. Prefix and grouping handlers recurse back into
/// this function, so the stack is grown here on demand.
pub fn parse_expr(parser: &mut Parser, precedence: Precedence) -> Result<Expr, Error> {
    ensure_sufficient_stack(|| parse_expr_inner(parser, precedence))
}

fn parse_expr_inner(parser: &mut Parser, precedence: Precedence) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => {
            return Err(Error::new(
                ErrorImpl::MissingPrefixParser { token: token_kind },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While the lookahead binds tighter than the caller, fold it into lhs
    while !parser.peek_token_is(TokenKind::Semicolon) && precedence < parser.peek_precedence() {
        let led = match parser.get_led_lookup().get(&parser.peek_token().kind) {
            Some(handler) => *handler,
            None => return Ok(left),
        };

        parser.advance();
        let operator_precedence = parser.current_precedence();
        left = led(parser, left, operator_precedence)?;
    }

    Ok(left)
}

pub fn parse_identifier(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    Ok(Expr::Identifier(Identifier {
        value: token.literal.clone(),
        token,
    }))
}

pub fn parse_integer_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.literal.parse::<i64>() {
        Ok(value) => Ok(Expr::Integer(IntegerLiteral { token, value })),
        Err(_) => Err(Error::new(
            ErrorImpl::IntegerParseError {
                literal: token.literal,
            },
            token.span.start,
        )),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, Precedence::Prefix)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

/// Operators are left-associative: the right operand is parsed at the
/// operator's own precedence, so an equal-precedence operator that follows
/// is folded in by the caller's loop instead.
pub fn parse_infix_expr(parser: &mut Parser, left: Expr, precedence: Precedence) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, precedence)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

/// `( <expr> )` yields the inner expression itself; the grouping is
/// reflected only in the shape of the tree.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();

    let expr = parse_expr(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}
