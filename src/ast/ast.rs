use std::{
    fmt::{self, Display},
    mem,
    slice::Iter,
};

use crate::{
    lexer::tokens::{Token, TokenKind},
    stack::ensure_sufficient_stack,
    Span,
};

use super::{
    expressions::{Identifier, InfixExpr, IntegerLiteral, PrefixExpr},
    statements::{ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Implemented by every node of the tree. `Display` renders the canonical,
/// fully parenthesised reconstruction of the subtree.
pub trait Node: Display {
    /// Returns the literal text of the token that began this node.
    fn token_literal(&self) -> &str;
}

/// Root of every parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => "",
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement
///
/// Closed set of statement forms; consumers match on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    /// Returns the span of the token that began the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Let(stmt) => &stmt.token.span,
            Stmt::Return(stmt) => &stmt.token.span,
            Stmt::Expression(stmt) => &stmt.token.span,
        }
    }
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(stmt) => stmt.token_literal(),
            Stmt::Return(stmt) => stmt.token_literal(),
            Stmt::Expression(stmt) => stmt.token_literal(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
}

impl Expr {
    /// Returns the span of the token that began the expression node.
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Identifier(expr) => &expr.token.span,
            Expr::Integer(expr) => &expr.token.span,
            Expr::Prefix(expr) => &expr.token.span,
            Expr::Infix(expr) => &expr.token.span,
        }
    }
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier(expr) => expr.token_literal(),
            Expr::Integer(expr) => expr.token_literal(),
            Expr::Prefix(expr) => expr.token_literal(),
            Expr::Infix(expr) => expr.token_literal(),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Expr::Identifier(expr) => write!(f, "{}", expr),
            Expr::Integer(expr) => write!(f, "{}", expr),
            Expr::Prefix(expr) => write!(f, "{}", expr),
            Expr::Infix(expr) => write!(f, "{}", expr),
        })
    }
}

/// Long operator chains nest as deep as they are long, so the tree is torn
/// down with an explicit worklist instead of recursive field drops.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_operands(&mut pending);

        // Each popped node has its operands detached before it is dropped,
        // so its own drop finds only leaves.
        while let Some(mut expr) = pending.pop() {
            expr.detach_operands(&mut pending);
        }
    }
}

impl Expr {
    fn detach_operands(&mut self, pending: &mut Vec<Expr>) {
        match self {
            Expr::Prefix(prefix) => detach(&mut prefix.right, pending),
            Expr::Infix(infix) => {
                detach(&mut infix.left, pending);
                detach(&mut infix.right, pending);
            }
            Expr::Identifier(_) | Expr::Integer(_) => {}
        }
    }
}

/// Moves an operator node out of `slot`, leaving an empty leaf in its place.
fn detach(slot: &mut Expr, pending: &mut Vec<Expr>) {
    let span = match slot {
        Expr::Prefix(prefix) => prefix.token.span.clone(),
        Expr::Infix(infix) => infix.token.span.clone(),
        Expr::Identifier(_) | Expr::Integer(_) => return,
    };

    let hole = Expr::Identifier(Identifier {
        token: Token {
            kind: TokenKind::Illegal,
            literal: String::new(),
            span,
        },
        value: String::new(),
    });
    pending.push(mem::replace(slot, hole));
}
