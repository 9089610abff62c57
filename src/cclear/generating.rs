//! C++ generator
//!
//!     Renders a [`Script`] as C/C++ source text. The generator is a pure function of the
//!     tree: a single depth-first pass where every node kind has one fixed rendering, and
//!     indentation always comes from the node itself.
//!
//!         Script          each statement, concatenated
//!         CodeBlock       indent(n) "{\n" body indent(n) "}\n"
//!         VarDeclaration  indent options.. type " " name [" = " expr] ";\n"
//!         IfStatement     indent keyword " (" condition "):\n" block     (else: indent "else:\n" block)
//!         FunctionDef     indent return_type " " name "(" params ")\n" block
//!         Expression      indent expr ";\n"
//!
//!     `indent(n)` is `n` copies of the indentation unit. Groups re-emit their literal
//!     brackets, so `(2+5/4)` comes out as `( 2 + 5 / 4 )`.

use crate::cclear::ast::{
    AstNode, CodeBlock, Command, FunctionDef, IfStatement, Script, VarDeclaration,
};
use cclear_config::GeneratorConfig;

/// Rendering knobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// One level of indentation in the output
    pub indent_unit: String,
    /// Return type written in front of every function
    pub return_type: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent_unit: "\t".to_string(),
            return_type: "void".to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            indent_unit: config.indent_unit.clone(),
            return_type: config.return_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Renders a whole script
    pub fn generate(&self, script: &Script) -> String {
        script
            .body
            .iter()
            .map(|statement| self.statement(statement))
            .collect()
    }

    fn indent(&self, level: usize) -> String {
        self.options.indent_unit.repeat(level)
    }

    fn statement(&self, command: &Command) -> String {
        match command {
            Command::Empty => String::new(),
            Command::VarDeclaration(decl) => self.var_declaration(decl),
            Command::IfChain(chain) => chain
                .clauses
                .iter()
                .map(|clause| self.if_statement(clause))
                .collect(),
            Command::IfStatement(clause) => self.if_statement(clause),
            Command::FunctionDef(function) => self.function(function),
            Command::CodeBlock(block) => self.block(block),
            Command::Script(script) => self.generate(script),
            Command::ExpressionStatement(statement) => format!(
                "{}{};\n",
                self.indent(command.indent()),
                self.expression(&statement.expression)
            ),
            other => format!("{}{};\n", self.indent(other.indent()), self.expression(other)),
        }
    }

    fn block(&self, block: &CodeBlock) -> String {
        let indent = self.indent(block.indent);
        let body: String = block
            .body
            .iter()
            .map(|statement| self.statement(statement))
            .collect();
        format!("{}{{\n{}{}}}\n", indent, body, indent)
    }

    fn var_declaration(&self, decl: &VarDeclaration) -> String {
        let mut out = self.indent(decl.keyword.indent);
        for option in decl.option_tokens() {
            out.push_str(&option.text);
            out.push(' ');
        }
        out.push_str(&decl.specifier.var_type.text);
        out.push(' ');
        out.push_str(&decl.specifier.name.text);
        if let Command::Assignment(assignment) = decl.assignment.as_ref() {
            out.push_str(" = ");
            out.push_str(&self.expression(&assignment.expression));
        }
        out.push_str(";\n");
        out
    }

    fn if_statement(&self, clause: &IfStatement) -> String {
        let indent = self.indent(clause.keyword.indent);
        let header = if clause.is_else() {
            format!("{}else:\n", indent)
        } else {
            format!(
                "{}{} ({}):\n",
                indent,
                clause.keyword,
                self.expression(&clause.condition)
            )
        };
        header + &self.block(&clause.body)
    }

    fn function(&self, function: &FunctionDef) -> String {
        let params = function
            .parameters()
            .iter()
            .map(|param| format!("{} {}", param.var_type, param.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}{} {}({})\n{}",
            self.indent(function.keyword.indent),
            self.options.return_type,
            function.name,
            params,
            self.block(&function.body)
        )
    }

    fn expression(&self, command: &Command) -> String {
        match command {
            Command::Empty => String::new(),
            Command::NumericLiteral(literal) | Command::Identifier(literal) => {
                literal.text().to_string()
            }
            Command::BinaryExpression(expr) => format!(
                "{} {} {}",
                self.expression(&expr.left),
                expr.op,
                self.expression(&expr.right)
            ),
            Command::Group(group) => {
                let mut parts = Vec::new();
                parts.extend(group.pre_op.as_ref().map(|token| token.text.clone()));
                parts.push(self.expression(&group.left));
                parts.extend(group.op.as_ref().map(|token| token.text.clone()));
                parts.push(self.expression(&group.right));
                parts.extend(group.pos_op.as_ref().map(|token| token.text.clone()));
                parts.retain(|part| !part.is_empty());
                parts.join(" ")
            }
            Command::VarTypeSpecifier(specifier) => {
                format!("{} {}", specifier.var_type, specifier.name)
            }
            Command::TokenList(list) => list.keys().join(" "),
            Command::Assignment(assignment) => self.expression(&assignment.expression),
            Command::ExpressionStatement(statement) => self.expression(&statement.expression),
            other => other.source_text(),
        }
    }
}

/// Renders a script with the default options
pub fn generate(script: &Script) -> String {
    Generator::default().generate(script)
}
