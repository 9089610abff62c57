//! The closed set of tree nodes

use super::nodes::{
    Assignment, BinaryExpression, CodeBlock, ExpressionStatement, FunctionDef, Group, IfChain,
    IfStatement, Literal, Script, TokenList, VarDeclaration, VarTypeSpecifier,
};
use super::traits::AstNode;
use crate::cclear::token::Token;
use serde::Serialize;

/// A syntax tree node
///
/// `Empty` means "nothing parsed here" and is how grammar rules report a non-match; it is
/// not an error. Parse failures travel as `Err(Diagnostic)` instead of living in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node")]
pub enum Command {
    Empty,
    NumericLiteral(Literal),
    Identifier(Literal),
    TokenList(TokenList),
    BinaryExpression(BinaryExpression),
    Group(Group),
    VarTypeSpecifier(VarTypeSpecifier),
    Assignment(Assignment),
    VarDeclaration(VarDeclaration),
    ExpressionStatement(ExpressionStatement),
    CodeBlock(CodeBlock),
    IfStatement(IfStatement),
    IfChain(IfChain),
    FunctionDef(FunctionDef),
    Script(Script),
}

impl Command {
    pub fn is_empty(&self) -> bool {
        matches!(self, Command::Empty)
    }

    /// Direct children, for generic tree walks
    pub fn children(&self) -> Vec<&Command> {
        match self {
            Command::Empty
            | Command::NumericLiteral(_)
            | Command::Identifier(_)
            | Command::TokenList(_)
            | Command::VarTypeSpecifier(_) => Vec::new(),
            Command::BinaryExpression(expr) => vec![&*expr.left, &*expr.right],
            Command::Group(group) => [&*group.left, &*group.right]
                .into_iter()
                .filter(|child| !child.is_empty())
                .collect(),
            Command::Assignment(assignment) => vec![&*assignment.expression],
            Command::VarDeclaration(decl) => [&*decl.options, &*decl.assignment]
                .into_iter()
                .filter(|child| !child.is_empty())
                .collect(),
            Command::ExpressionStatement(statement) => vec![&*statement.expression],
            Command::CodeBlock(block) => block.body.iter().collect(),
            Command::IfStatement(clause) => clause.body.body.iter().collect(),
            Command::IfChain(_) => Vec::new(),
            Command::FunctionDef(function) => function.body.body.iter().collect(),
            Command::Script(script) => script.body.iter().collect(),
        }
    }

    fn as_node(&self) -> Option<&dyn AstNode> {
        match self {
            Command::Empty | Command::NumericLiteral(_) | Command::Identifier(_) => None,
            Command::TokenList(node) => Some(node),
            Command::BinaryExpression(node) => Some(node),
            Command::Group(node) => Some(node),
            Command::VarTypeSpecifier(node) => Some(node),
            Command::Assignment(node) => Some(node),
            Command::VarDeclaration(node) => Some(node),
            Command::ExpressionStatement(node) => Some(node),
            Command::CodeBlock(node) => Some(node),
            Command::IfStatement(node) => Some(node),
            Command::IfChain(node) => Some(node),
            Command::FunctionDef(node) => Some(node),
            Command::Script(node) => Some(node),
        }
    }
}

impl AstNode for Command {
    fn node_type(&self) -> &'static str {
        match self {
            Command::Empty => "Empty",
            Command::NumericLiteral(_) => "NumericLiteral",
            Command::Identifier(_) => "Identifier",
            _ => self.as_node().map(|node| node.node_type()).unwrap_or("Empty"),
        }
    }

    fn display_label(&self) -> String {
        match self {
            Command::Empty => String::new(),
            Command::NumericLiteral(literal) | Command::Identifier(literal) => {
                literal.text().to_string()
            }
            _ => self
                .as_node()
                .map(|node| node.display_label())
                .unwrap_or_default(),
        }
    }

    fn indent(&self) -> usize {
        match self {
            Command::Empty => 0,
            Command::NumericLiteral(literal) | Command::Identifier(literal) => {
                literal.token.indent
            }
            _ => self.as_node().map(|node| node.indent()).unwrap_or(0),
        }
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Command::Empty => {}
            Command::NumericLiteral(literal) | Command::Identifier(literal) => {
                out.push(&literal.token)
            }
            _ => {
                if let Some(node) = self.as_node() {
                    node.push_tokens(out);
                }
            }
        }
    }
}

impl From<Script> for Command {
    fn from(script: Script) -> Self {
        Command::Script(script)
    }
}

impl From<IfStatement> for Command {
    fn from(clause: IfStatement) -> Self {
        Command::IfStatement(clause)
    }
}

impl From<CodeBlock> for Command {
    fn from(block: CodeBlock) -> Self {
        Command::CodeBlock(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cclear::token::TokenKind;

    fn tok(text: &str, kind: TokenKind, col: usize, indent: usize) -> Token {
        Token::new(text, kind, col, 1, col, indent)
    }

    fn number(text: &str, col: usize) -> Command {
        Command::NumericLiteral(Literal::new(tok(text, TokenKind::Int, col, 0)))
    }

    #[test]
    fn test_empty_has_no_tokens() {
        assert!(Command::Empty.is_empty());
        assert!(Command::Empty.tokens().is_empty());
        assert_eq!(Command::Empty.indent(), 0);
    }

    #[test]
    fn test_binary_expression_walks_left_to_right() {
        let expr = Command::BinaryExpression(BinaryExpression {
            op: tok("+", TokenKind::Symbol, 2, 0),
            left: Box::new(number("1", 0)),
            right: Box::new(number("2", 4)),
        });
        assert_eq!(expr.source_text(), "1 + 2");
        assert_eq!(expr.node_type(), "BinaryExpression");
        assert_eq!(expr.children().len(), 2);
    }

    #[test]
    fn test_group_reproduces_brackets() {
        let group = Command::Group(Group::bracket(
            tok("(", TokenKind::Symbol, 0, 0),
            number("5", 1),
            tok(")", TokenKind::Symbol, 2, 0),
        ));
        assert_eq!(group.source_text(), "( 5 )");
        assert_eq!(group.display_label(), "( )");
    }

    #[test]
    fn test_indent_comes_from_leading_token() {
        let decl = Command::VarDeclaration(VarDeclaration {
            keyword: tok("alc", TokenKind::Keyword, 2, 2),
            options: Box::new(Command::Empty),
            specifier: VarTypeSpecifier {
                name: tok("x", TokenKind::VarName, 6, 2),
                separator: tok(":", TokenKind::Symbol, 7, 2),
                var_type: tok("int", TokenKind::VarName, 8, 2),
            },
            assignment: Box::new(Command::Empty),
            terminator: tok(";", TokenKind::Symbol, 11, 2),
        });
        assert_eq!(decl.indent(), 2);
        assert_eq!(decl.source_text(), "alc x : int ;");
        assert_eq!(decl.display_label(), "x:int");
    }

    #[test]
    fn test_serializes_with_node_tag() {
        let json = serde_json::to_value(number("7", 0)).unwrap();
        assert_eq!(json["node"], "NumericLiteral");
        assert_eq!(json["token"]["text"], "7");
    }
}
