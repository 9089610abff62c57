//! Parsing module for CClear scripts
//!
//!     Turns the parser-facing token stream (see [lexing](crate::cclear::lexing)) into a
//!     [`Script`]. The parser is recursive descent with explicit backtracking; blocks are
//!     found from the `indent` every token carries, not from delimiters.
//!
//!     - [parser]: per-parse state, cursor primitives, indentation check and the shared
//!       operator template.
//!     - [expressions]: the four binary operators, groups and atoms.
//!     - [statements]: declarations, if chains, functions, expression statements and scopes.
//!
//!     The first diagnostic aborts the parse. There is no recovery and no partial tree.

pub mod expressions;
pub mod parser;
pub mod statements;

pub use crate::cclear::ast::Script;
pub use crate::cclear::error::{Diagnostic, ErrorKind};
pub use parser::{OperatorMode, ParseResult, Parser, MAX_NESTING};

use crate::cclear::token::TokenStream;

/// Parses a token stream into a script. An empty stream gives an empty script.
pub fn parse(tokens: &TokenStream) -> Result<Script, Diagnostic> {
    Parser::new(tokens).parse_script()
}
