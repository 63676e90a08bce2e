//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level
//! driver. The parser keeps a two-token window (`current` and `peek`) over
//! a pull-based token source and never looks further ahead.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix-position expressions
//! - LED (left denotation) handlers for infix-position expressions
//! - Operator precedences
//!
//! Failures are collected rather than returned: a malformed statement is
//! recorded in the error list and skipped, and parsing resumes at the next
//! statement boundary.

use std::{collections::HashMap, mem};

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, TokenSource},
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, LEDHandler, LEDLookup, NUDHandler, NUDLookup, Precedence,
        PrecedenceLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// A parser owns its token source, lookahead and error list exclusively and
/// is driven by a single caller.
pub struct Parser {
    /// Where tokens are pulled from, strictly in order
    source: Box<dyn TokenSource>,
    /// The token under examination
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Errors collected so far, in the order they were found
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix operator precedence
    precedence_lookup: PrecedenceLookup,
}

impl Parser {
    /// Creates a new Parser over `source`.
    ///
    /// The two lookahead slots are filled immediately and every dispatch
    /// table is registered; the tables are not modified afterwards.
    pub fn new(source: impl TokenSource + 'static) -> Self {
        let mut source: Box<dyn TokenSource> = Box::new(source);
        let current = source.next_token();
        let peek = source.next_token();

        let mut parser = Parser {
            source,
            current,
            peek,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            precedence_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Shifts the window one token to the right, pulling a fresh lookahead
    /// from the token source.
    pub fn advance(&mut self) {
        let next = self.source.next_token();
        self.current = mem::replace(&mut self.peek, next);

        trace!(
            kind = %self.current.kind,
            literal = %self.current.literal,
            pos = self.current.span.start.0,
            "advance"
        );
    }

    /// Advances onto the lookahead if it is of `expected_kind`.
    ///
    /// # Returns
    ///
    /// Ok(()) once the current token is of `expected_kind`, otherwise an
    /// expectation error pointing at the lookahead. Nothing is consumed on
    /// failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek_token_is(expected_kind) {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    got: self.peek.kind,
                },
                self.peek.span.start.clone(),
            ))
        }
    }

    /// Advances onto the lookahead only if it is of `kind`.
    pub fn advance_if_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token_is(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Precedence of the lookahead when read as an infix operator.
    pub fn peek_precedence(&self) -> Precedence {
        self.precedence_of(self.peek.kind)
    }

    /// Precedence of the current token when read as an infix operator.
    pub fn current_precedence(&self) -> Precedence {
        self.precedence_of(self.current.kind)
    }

    fn precedence_of(&self, kind: TokenKind) -> Precedence {
        *self
            .precedence_lookup
            .get(&kind)
            .unwrap_or(&Precedence::Lowest)
    }

    /// Returns the errors collected so far, in source order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the collected errors rendered as plain messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `precedence` - The precedence of this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, precedence: Precedence, led_fn: LEDHandler) {
        self.precedence_lookup.insert(kind, precedence);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Parses statements until the token source reports `EOF`.
    ///
    /// Never fails as a whole: a statement that cannot be parsed leaves an
    /// entry in [`Parser::errors`] and contributes nothing to the program.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_token_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => {
                    debug!(stmt = %stmt, "parsed statement");
                    program.statements.push(stmt);
                }
                Err(error) => {
                    debug!(error = %error, pos = error.get_position().0, "skipping malformed statement");
                    self.errors.push(error);
                    self.synchronize();
                }
            }

            self.advance();
        }

        debug!(
            statements = program.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        program
    }

    /// Skips forward until the current token closes the statement (`;`) or
    /// the input is exhausted.
    fn synchronize(&mut self) {
        while !self.current_token_is(TokenKind::Semicolon) && !self.current_token_is(TokenKind::EOF)
        {
            self.advance();
        }
    }
}

/// Parses everything `source` yields into a program.
///
/// This is the main entry point for parsing. The returned program is only
/// trustworthy when the error list is empty.
pub fn parse(source: impl TokenSource + 'static) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();

    (program, parser.errors)
}

/// Lexes and parses source text read from the shell.
pub fn parse_source(source: &str) -> (Program, Vec<Error>) {
    parse(Lexer::new(source, None))
}
