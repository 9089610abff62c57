//! Syntax tree for CClear scripts
//!
//!     The tree is a closed sum type, [`Command`], with one variant per construct the parser
//!     recognizes. It is built bottom-up in a single parse pass, never mutated afterwards, and
//!     read by the generator and the output formats.
//!
//! Ownership
//!
//!     Every node owns its children outright (boxes and vectors, no sharing), so the tree is a
//!     strict tree: a Script owns its top-level statements, a CodeBlock owns its nested
//!     statements, expressions own their operands.
//!
//! Source Reconstruction
//!
//!     Nodes keep every token they consumed, keywords and punctuation included. Walking
//!     [`Command::tokens`] yields them in source order, so the text of any node can be
//!     rebuilt from the tree alone (see [`Command::source_text`]). Round-trip tests rely on
//!     this.
//!
//! Indentation
//!
//!     Statements remember the indentation of the line they begin on ([`Command::indent`]),
//!     and code blocks store the indentation shared by their body. The generator reads these
//!     values as-is; it never recomputes indentation from the nesting depth.

pub mod command;
pub mod nodes;
pub mod snapshot;
pub mod traits;

pub use command::Command;
pub use nodes::{
    Assignment, BinaryExpression, CodeBlock, ExpressionStatement, FunctionDef, Group, IfChain,
    IfStatement, Literal, Script, TokenList, VarDeclaration, VarTypeSpecifier,
};
pub use snapshot::{snapshot_command, snapshot_from_script, AstSnapshot};
pub use traits::AstNode;
