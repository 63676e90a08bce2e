//! Lexical analysis module.
//!
//! This module contains the token source consumed by the parser. It handles:
//!
//! - Token kinds and the reserved-word lookup
//! - The `TokenSource` contract (pull one token at a time, `EOF` forever after)
//! - A lazy regex-driven `Lexer` over source text
//! - `TokenStream`, a token source over pre-built tokens

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
