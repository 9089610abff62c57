//! AST Snapshot - a normalized intermediate representation of the tree
//!
//! Output formats that only need "node type, label, children" consume a snapshot instead of
//! walking [`Command`] themselves.

use super::command::Command;
use super::nodes::{IfStatement, Script};
use super::traits::AstNode;
use serde::Serialize;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "VarDeclaration", "CodeBlock")
    pub node_type: String,

    /// The primary label of the node
    pub label: String,

    /// Source line the node starts on, when it has tokens
    pub row: Option<usize>,

    /// Child nodes in the tree
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            row: None,
            children: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Option<usize>) -> Self {
        self.row = row;
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

fn first_row(node: &dyn AstNode) -> Option<usize> {
    node.tokens().first().map(|token| token.row)
}

/// Snapshot of one node and all its descendants
pub fn snapshot_command(command: &Command) -> AstSnapshot {
    let base = AstSnapshot::new(command.node_type(), command.display_label())
        .with_row(first_row(command));

    match command {
        Command::IfChain(chain) => {
            base.with_children(chain.clauses.iter().map(snapshot_clause).collect())
        }
        Command::IfStatement(clause) => snapshot_clause(clause),
        _ => base.with_children(command.children().into_iter().map(snapshot_command).collect()),
    }
}

fn snapshot_clause(clause: &IfStatement) -> AstSnapshot {
    let mut children = Vec::new();
    if !clause.condition.is_empty() {
        children.push(snapshot_command(&clause.condition));
    }
    children.extend(clause.body.body.iter().map(snapshot_command));

    AstSnapshot::new(clause.node_type(), clause.display_label())
        .with_row(first_row(clause))
        .with_children(children)
}

/// Snapshot of a whole script
pub fn snapshot_from_script(script: &Script) -> AstSnapshot {
    AstSnapshot::new(script.node_type(), script.display_label())
        .with_children(script.body.iter().map(snapshot_command).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cclear::ast::Literal;
    use crate::cclear::token::{Token, TokenKind};

    #[test]
    fn test_script_snapshot_lists_statements() {
        let token = Token::new("x", TokenKind::VarName, 0, 3, 0, 0);
        let script = Script::new(vec![Command::Identifier(Literal::new(token))]);
        let snapshot = snapshot_from_script(&script);

        assert_eq!(snapshot.node_type, "Script");
        assert_eq!(snapshot.label, "1 statements");
        assert_eq!(snapshot.children[0].node_type, "Identifier");
        assert_eq!(snapshot.children[0].label, "x");
        assert_eq!(snapshot.children[0].row, Some(3));
    }
}
