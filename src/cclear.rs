//! Main module for the cclear library
//!
//!     source text -> lexing -> TokenStream -> parsing -> Script -> generating -> C++
//!
//! Each stage is a one-shot synchronous function. [pipeline] chains them and exposes
//! intermediate outputs.

pub mod ast;
pub mod error;
pub mod formats;
pub mod generating;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod testing;
pub mod token;

pub use ast::{Command, Script};
pub use error::{CompileError, Diagnostic, ErrorKind, LexError};
pub use generating::{generate, Generator, GeneratorOptions};
pub use lexing::{detokenize, tokenize, tokenize_raw};
pub use parsing::parse;
pub use pipeline::{compile, process, ProcessingSpec};
pub use token::{Token, TokenKind, TokenStream};
