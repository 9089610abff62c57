//! Node structs wrapped by [`Command`]
//!
//! Keywords and punctuation are stored as tokens next to the semantic fields, so that each
//! node can reproduce its source (see [`AstNode::push_tokens`]).

use super::command::Command;
use super::traits::AstNode;
use crate::cclear::token::Token;
use serde::Serialize;

/// A single-token leaf: numeric literal or identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub token: Token,
}

impl Literal {
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    pub fn text(&self) -> &str {
        &self.token.text
    }
}

/// Declaration options, in source order. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    pub fn keys(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::as_str).collect()
    }
}

impl AstNode for TokenList {
    fn node_type(&self) -> &'static str {
        "TokenList"
    }

    fn display_label(&self) -> String {
        self.keys().join(" ")
    }

    fn indent(&self) -> usize {
        self.tokens.first().map(|token| token.indent).unwrap_or(0)
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.extend(self.tokens.iter());
    }
}

/// `left op right`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    pub op: Token,
    pub left: Box<Command>,
    pub right: Box<Command>,
}

impl AstNode for BinaryExpression {
    fn node_type(&self) -> &'static str {
        "BinaryExpression"
    }

    fn display_label(&self) -> String {
        self.op.text.clone()
    }

    fn indent(&self) -> usize {
        if self.left.is_empty() {
            self.op.indent
        } else {
            self.left.indent()
        }
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        self.left.push_tokens(out);
        out.push(&self.op);
        self.right.push_tokens(out);
    }
}

/// Generic wrapper for `[pre_op] left [op] right [pos_op]`
///
/// Used for parenthesized expressions, statement headers, option lists, parameter lists
/// (with `,` as `op`) and chains of sibling clauses (no operators at all).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub pre_op: Option<Token>,
    pub left: Box<Command>,
    pub op: Option<Token>,
    pub right: Box<Command>,
    pub pos_op: Option<Token>,
}

impl Group {
    /// `pre left pos`
    pub fn bracket(pre_op: Token, left: Command, pos_op: Token) -> Self {
        Self {
            pre_op: Some(pre_op),
            left: Box::new(left),
            op: None,
            right: Box::new(Command::Empty),
            pos_op: Some(pos_op),
        }
    }

    /// `left op right`, or a plain pair when `op` is absent
    pub fn infix(left: Command, op: Option<Token>, right: Command) -> Self {
        Self {
            pre_op: None,
            left: Box::new(left),
            op,
            right: Box::new(right),
            pos_op: None,
        }
    }
}

impl AstNode for Group {
    fn node_type(&self) -> &'static str {
        "Group"
    }

    fn display_label(&self) -> String {
        [&self.pre_op, &self.op, &self.pos_op]
            .iter()
            .filter_map(|token| token.as_ref().map(|t| t.text.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn indent(&self) -> usize {
        match &self.pre_op {
            Some(token) => token.indent,
            None => self.left.indent(),
        }
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.extend(self.pre_op.as_ref());
        self.left.push_tokens(out);
        out.extend(self.op.as_ref());
        self.right.push_tokens(out);
        out.extend(self.pos_op.as_ref());
    }
}

/// `name : type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarTypeSpecifier {
    pub name: Token,
    pub separator: Token,
    pub var_type: Token,
}

impl AstNode for VarTypeSpecifier {
    fn node_type(&self) -> &'static str {
        "VarTypeSpecifier"
    }

    fn display_label(&self) -> String {
        format!("{}:{}", self.name, self.var_type)
    }

    fn indent(&self) -> usize {
        self.name.indent
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.extend([&self.name, &self.separator, &self.var_type]);
    }
}

/// `= expression`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub equator: Token,
    pub expression: Box<Command>,
}

impl AstNode for Assignment {
    fn node_type(&self) -> &'static str {
        "Assignment"
    }

    fn display_label(&self) -> String {
        self.equator.text.clone()
    }

    fn indent(&self) -> usize {
        self.equator.indent
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.push(&self.equator);
        self.expression.push_tokens(out);
    }
}

/// `alc (options) name:type = expression ;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclaration {
    pub keyword: Token,
    /// `Empty`, or a bracketed [`Group`] around a [`TokenList`]
    pub options: Box<Command>,
    pub specifier: VarTypeSpecifier,
    /// `Empty` or an [`Assignment`]
    pub assignment: Box<Command>,
    pub terminator: Token,
}

impl VarDeclaration {
    /// The declared options (`static`, `const`) in source order
    pub fn option_tokens(&self) -> &[Token] {
        match self.options.as_ref() {
            Command::Group(group) => match group.left.as_ref() {
                Command::TokenList(list) => &list.tokens,
                _ => &[],
            },
            _ => &[],
        }
    }
}

impl AstNode for VarDeclaration {
    fn node_type(&self) -> &'static str {
        "VarDeclaration"
    }

    fn display_label(&self) -> String {
        self.specifier.display_label()
    }

    fn indent(&self) -> usize {
        self.keyword.indent
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.push(&self.keyword);
        self.options.push_tokens(out);
        self.specifier.push_tokens(out);
        self.assignment.push_tokens(out);
        out.push(&self.terminator);
    }
}

/// A bare expression used as a statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Box<Command>,
    pub terminator: Option<Token>,
}

impl AstNode for ExpressionStatement {
    fn node_type(&self) -> &'static str {
        "ExpressionStatement"
    }

    fn display_label(&self) -> String {
        self.expression.source_text()
    }

    fn indent(&self) -> usize {
        self.expression.indent()
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        self.expression.push_tokens(out);
        out.extend(self.terminator.as_ref());
    }
}

/// Statements sharing one indentation level below a header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub body: Vec<Command>,
    pub indent: usize,
}

impl AstNode for CodeBlock {
    fn node_type(&self) -> &'static str {
        "CodeBlock"
    }

    fn display_label(&self) -> String {
        format!("{} statements", self.body.len())
    }

    fn indent(&self) -> usize {
        self.indent
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for statement in &self.body {
            statement.push_tokens(out);
        }
    }
}

/// One `if`, `elif` or `else` clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub keyword: Token,
    /// `Empty` for `else`
    pub condition: Box<Command>,
    pub terminator: Token,
    pub body: CodeBlock,
}

impl IfStatement {
    pub fn is_else(&self) -> bool {
        self.condition.is_empty()
    }
}

impl AstNode for IfStatement {
    fn node_type(&self) -> &'static str {
        "IfStatement"
    }

    fn display_label(&self) -> String {
        if self.is_else() {
            self.keyword.text.clone()
        } else {
            format!("{} {}", self.keyword, self.condition.source_text())
        }
    }

    fn indent(&self) -> usize {
        self.keyword.indent
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.push(&self.keyword);
        self.condition.push_tokens(out);
        out.push(&self.terminator);
        self.body.push_tokens(out);
    }
}

/// `if` clause, then any `elif` clauses, then an optional `else`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfChain {
    pub clauses: Vec<IfStatement>,
}

impl AstNode for IfChain {
    fn node_type(&self) -> &'static str {
        "IfChain"
    }

    fn display_label(&self) -> String {
        format!("{} clauses", self.clauses.len())
    }

    fn indent(&self) -> usize {
        self.clauses.first().map(|clause| clause.indent()).unwrap_or(0)
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for clause in &self.clauses {
            clause.push_tokens(out);
        }
    }
}

/// `func name(params): <block>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub keyword: Token,
    pub name: Token,
    /// Bracketed [`Group`]; inside, parameters are nested right with `,` as `op`
    pub params: Box<Command>,
    pub terminator: Token,
    pub body: CodeBlock,
}

impl FunctionDef {
    /// Parameters in declaration order
    pub fn parameters(&self) -> Vec<&VarTypeSpecifier> {
        let mut out = Vec::new();
        collect_parameters(&self.params, &mut out);
        out
    }
}

fn collect_parameters<'a>(command: &'a Command, out: &mut Vec<&'a VarTypeSpecifier>) {
    match command {
        Command::VarTypeSpecifier(specifier) => out.push(specifier),
        Command::Group(group) => {
            collect_parameters(&group.left, out);
            collect_parameters(&group.right, out);
        }
        _ => {}
    }
}

impl AstNode for FunctionDef {
    fn node_type(&self) -> &'static str {
        "FunctionDef"
    }

    fn display_label(&self) -> String {
        self.name.text.clone()
    }

    fn indent(&self) -> usize {
        self.keyword.indent
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        out.push(&self.keyword);
        out.push(&self.name);
        self.params.push_tokens(out);
        out.push(&self.terminator);
        self.body.push_tokens(out);
    }
}

/// A whole source file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Script {
    pub body: Vec<Command>,
}

impl Script {
    pub fn new(body: Vec<Command>) -> Self {
        Self { body }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl AstNode for Script {
    fn node_type(&self) -> &'static str {
        "Script"
    }

    fn display_label(&self) -> String {
        format!("{} statements", self.body.len())
    }

    fn indent(&self) -> usize {
        0
    }

    fn push_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for statement in &self.body {
            statement.push_tokens(out);
        }
    }
}
