//! Lexer
//!
//!     Turns CClear source text into a [`TokenStream`]. Lexing happens in two steps:
//!
//!         1. Shape recognition with a logos lexer. See [tokens](tokens). Rule priority
//!            encodes the ordering contract: comments before symbols, keywords before
//!            identifiers, floats before ints.
//!
//!         2. Position tracking. See [lexer_impl](lexer_impl). Every token gets its row,
//!            column and the indentation of its line.
//!
//! Indentation Handling
//!
//!     CClear has no braces. Blocks are delimited by indentation alone, and the parser
//!     reads indentation from each token's `indent` field rather than from synthetic
//!     indent/dedent tokens. Newline, indentation and comment tokens are therefore only
//!     kept by [`tokenize_raw`]; the parser-facing [`tokenize`] drops them.
//!
//! Failure
//!
//!     Lexing is all or nothing. The first run of input that no rule accepts aborts the
//!     call with a [`LexError`] carrying an `Error` token at the exact row and column.
//!     Empty input is not an error and yields an empty stream.

pub mod detokenizer;
pub mod lexer_impl;
pub mod tokens;

pub use crate::cclear::error::LexError;
pub use crate::cclear::token::{Token, TokenKind, TokenStream};
pub use detokenizer::detokenize;
pub use lexer_impl::Scanner;
pub use tokens::RawToken;

/// Tokenizes source text into the stream the parser consumes
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    Ok(tokenize_raw(source)?.without_trivia())
}

/// Tokenizes source text keeping newline, indentation and comment tokens
pub fn tokenize_raw(source: &str) -> Result<TokenStream, LexError> {
    Scanner::new(source).scan()
}
