//! AST traits - common interface for uniform node access

use crate::cclear::token::Token;

/// Uniform read access to any tree node
pub trait AstNode {
    /// The node's variant name (e.g. "VarDeclaration", "CodeBlock")
    fn node_type(&self) -> &'static str;

    /// A short human label used by the tree visualizer
    fn display_label(&self) -> String;

    /// Indentation of the line the node begins on
    fn indent(&self) -> usize;

    /// Appends the node's tokens to `out`, in source order
    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>);

    /// Every token reachable from the node, in source order
    fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.push_tokens(&mut out);
        out
    }

    /// The node's source text, tokens joined by single spaces
    fn source_text(&self) -> String {
        self.tokens()
            .iter()
            .map(|token| token.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
