use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A recoverable parse failure together with the position it refers to.
///
/// Parse errors are collected, never thrown: the parser keeps going after
/// recording one. `Display` yields the bare diagnostic message.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingPrefixParser { .. } => "MissingPrefixParser",
            ErrorImpl::IntegerParseError { .. } => "IntegerParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("insert `{}` here", expected))
            }
            ErrorImpl::MissingPrefixParser { token: TokenKind::Illegal } => ErrorTip::None,
            ErrorImpl::MissingPrefixParser { token } => {
                ErrorTip::Suggestion(format!("`{}` cannot start an expression", token))
            }
            ErrorImpl::IntegerParseError { .. } => ErrorTip::Suggestion(format!(
                "integer literals must lie within {}..={}",
                i64::MIN,
                i64::MAX
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    /// A mandatory terminal of a fixed-shape statement is missing.
    #[error("expected next token to be {expected}, got {got}")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    /// An expression begins with a token that has no prefix meaning.
    #[error("no prefix parse function for {token} found")]
    MissingPrefixParser { token: TokenKind },
    /// Malformed or out-of-range integer text.
    #[error("could not parse {literal:?} as integer")]
    IntegerParseError { literal: String },
}
