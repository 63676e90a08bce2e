//! Error types for the parser.
//!
//! This module defines the recoverable parse errors collected while
//! building the AST:
//!
//! - Expectation errors (a mandatory token is missing)
//! - Dispatch errors (a token cannot begin an expression)
//! - Literal-conversion errors (integer text does not fit an `i64`)
//!
//! Each error carries the source position it refers to, plus a name and an
//! optional tip for human-facing diagnostics.

pub mod errors;
