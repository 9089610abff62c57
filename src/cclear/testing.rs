//! Fluent assertion API for parsed scripts
//!
//!     Tests that walk the tree by hand break whenever a node's fields move around, and
//!     they tend to check only shallow things like counts. This module lets a test describe
//!     what it expects from any statement, including nested blocks, through semantic
//!     methods (`.name()`, `.condition()`, `.statement()`), so only the assertions here need
//!     updating when the tree changes.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use cclear::cclear::testing::{assert_script, parse_ok};
//!
//!     let script = parse_ok("if 5;\n\talc num:int;\n");
//!     assert_script(&script)
//!         .statement_count(1)
//!         .statement(0, |stmt| {
//!             stmt.assert_if_chain()
//!                 .clause_count(1)
//!                 .clause(0, |clause| {
//!                     clause.keyword("if").condition("5").statement(0, |inner| {
//!                         inner.assert_var_declaration().name("num").var_type("int");
//!                     });
//!                 });
//!         });
//!     ```

use crate::cclear::ast::{
    AstNode, CodeBlock, Command, FunctionDef, IfChain, IfStatement, Script, VarDeclaration,
};
use crate::cclear::error::Diagnostic;
use crate::cclear::lexing::tokenize;
use crate::cclear::parsing::parse;

/// Tokenizes and parses, panicking with the rendered diagnostic on failure
pub fn parse_ok(source: &str) -> Script {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(err) => panic!("lexing failed:\n{}", err.render("<test>", source)),
    };
    match parse(&tokens) {
        Ok(script) => script,
        Err(diagnostic) => panic!("parsing failed:\n{}", diagnostic.render("<test>", source)),
    }
}

/// Tokenizes and parses, panicking unless parsing fails
pub fn parse_err(source: &str) -> Diagnostic {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(err) => panic!("lexing failed:\n{}", err.render("<test>", source)),
    };
    match parse(&tokens) {
        Ok(script) => panic!("expected a parse error, got {:#?}", script),
        Err(diagnostic) => diagnostic,
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a script
pub fn assert_script(script: &Script) -> ScriptAssertion<'_> {
    ScriptAssertion { script }
}

pub struct ScriptAssertion<'a> {
    script: &'a Script,
}

impl<'a> ScriptAssertion<'a> {
    pub fn statement_count(self, expected: usize) -> Self {
        assert_eq!(
            self.script.body.len(),
            expected,
            "script: expected {} statements, found {}",
            expected,
            self.script.body.len()
        );
        self
    }

    pub fn statement<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(StatementAssertion<'a>),
    {
        check(statement_at(&self.script.body, index, "script"));
        self
    }
}

fn statement_at<'a>(body: &'a [Command], index: usize, context: &str) -> StatementAssertion<'a> {
    let command = body.get(index).unwrap_or_else(|| {
        panic!(
            "{}: no statement at index {} (only {} statements)",
            context,
            index,
            body.len()
        )
    });
    StatementAssertion {
        command,
        context: format!("{}[{}]", context, index),
    }
}

// ============================================================================
// Statement Assertions
// ============================================================================

pub struct StatementAssertion<'a> {
    command: &'a Command,
    context: String,
}

impl<'a> StatementAssertion<'a> {
    pub fn indent(self, expected: usize) -> Self {
        assert_eq!(
            self.command.indent(),
            expected,
            "{}: wrong indentation",
            self.context
        );
        self
    }

    pub fn node_type(self, expected: &str) -> Self {
        assert_eq!(self.command.node_type(), expected, "{}: wrong node", self.context);
        self
    }

    pub fn source(self, expected: &str) -> Self {
        assert_eq!(self.command.source_text(), expected, "{}: wrong source", self.context);
        self
    }

    pub fn assert_var_declaration(self) -> VarDeclarationAssertion<'a> {
        match self.command {
            Command::VarDeclaration(decl) => VarDeclarationAssertion {
                decl,
                context: self.context,
            },
            other => panic!(
                "{}: expected VarDeclaration, found {}",
                self.context,
                other.node_type()
            ),
        }
    }

    pub fn assert_if_chain(self) -> IfChainAssertion<'a> {
        match self.command {
            Command::IfChain(chain) => IfChainAssertion {
                chain,
                context: self.context,
            },
            other => panic!(
                "{}: expected IfChain, found {}",
                self.context,
                other.node_type()
            ),
        }
    }

    pub fn assert_function(self) -> FunctionAssertion<'a> {
        match self.command {
            Command::FunctionDef(function) => FunctionAssertion {
                function,
                context: self.context,
            },
            other => panic!(
                "{}: expected FunctionDef, found {}",
                self.context,
                other.node_type()
            ),
        }
    }

    /// Asserts an expression statement whose expression has the given source text
    pub fn assert_expression(self, expected: &str) -> Self {
        match self.command {
            Command::ExpressionStatement(statement) => assert_eq!(
                statement.expression.source_text(),
                expected,
                "{}: wrong expression",
                self.context
            ),
            other => panic!(
                "{}: expected ExpressionStatement, found {}",
                self.context,
                other.node_type()
            ),
        }
        self
    }
}

pub struct VarDeclarationAssertion<'a> {
    decl: &'a VarDeclaration,
    context: String,
}

impl<'a> VarDeclarationAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.decl.specifier.name.text, expected,
            "{}: wrong variable name",
            self.context
        );
        self
    }

    pub fn var_type(self, expected: &str) -> Self {
        assert_eq!(
            self.decl.specifier.var_type.text, expected,
            "{}: wrong type",
            self.context
        );
        self
    }

    pub fn options(self, expected: &[&str]) -> Self {
        let options: Vec<&str> = self.decl.option_tokens().iter().map(|t| t.as_str()).collect();
        assert_eq!(options, expected, "{}: wrong options", self.context);
        self
    }

    /// Source text of the assigned expression
    pub fn assigned(self, expected: &str) -> Self {
        match self.decl.assignment.as_ref() {
            Command::Assignment(assignment) => assert_eq!(
                assignment.expression.source_text(),
                expected,
                "{}: wrong assignment",
                self.context
            ),
            _ => panic!("{}: expected an assignment", self.context),
        }
        self
    }

    pub fn unassigned(self) -> Self {
        assert!(
            self.decl.assignment.is_empty(),
            "{}: expected no assignment",
            self.context
        );
        self
    }
}

pub struct IfChainAssertion<'a> {
    chain: &'a IfChain,
    context: String,
}

impl<'a> IfChainAssertion<'a> {
    pub fn clause_count(self, expected: usize) -> Self {
        assert_eq!(
            self.chain.clauses.len(),
            expected,
            "{}: wrong number of clauses",
            self.context
        );
        self
    }

    pub fn clause<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(ClauseAssertion<'a>),
    {
        let clause = self.chain.clauses.get(index).unwrap_or_else(|| {
            panic!("{}: no clause at index {}", self.context, index)
        });
        check(ClauseAssertion {
            clause,
            context: format!("{}.clause[{}]", self.context, index),
        });
        self
    }
}

pub struct ClauseAssertion<'a> {
    clause: &'a IfStatement,
    context: String,
}

impl<'a> ClauseAssertion<'a> {
    pub fn keyword(self, expected: &str) -> Self {
        assert_eq!(self.clause.keyword.text, expected, "{}: wrong keyword", self.context);
        self
    }

    pub fn condition(self, expected: &str) -> Self {
        assert_eq!(
            self.clause.condition.source_text(),
            expected,
            "{}: wrong condition",
            self.context
        );
        self
    }

    pub fn is_else(self) -> Self {
        assert!(self.clause.is_else(), "{}: expected an else clause", self.context);
        self
    }

    pub fn block_indent(self, expected: usize) -> Self {
        check_block_indent(&self.clause.body, expected, &self.context);
        self
    }

    pub fn statement_count(self, expected: usize) -> Self {
        check_statement_count(&self.clause.body, expected, &self.context);
        self
    }

    pub fn statement<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(StatementAssertion<'a>),
    {
        check(statement_at(&self.clause.body.body, index, &self.context));
        self
    }
}

pub struct FunctionAssertion<'a> {
    function: &'a FunctionDef,
    context: String,
}

impl<'a> FunctionAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.function.name.text, expected, "{}: wrong name", self.context);
        self
    }

    /// Parameters as `name:type`
    pub fn parameters(self, expected: &[&str]) -> Self {
        let params: Vec<String> = self
            .function
            .parameters()
            .iter()
            .map(|param| param.display_label())
            .collect();
        assert_eq!(params, expected, "{}: wrong parameters", self.context);
        self
    }

    pub fn block_indent(self, expected: usize) -> Self {
        check_block_indent(&self.function.body, expected, &self.context);
        self
    }

    pub fn statement_count(self, expected: usize) -> Self {
        check_statement_count(&self.function.body, expected, &self.context);
        self
    }

    pub fn statement<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(StatementAssertion<'a>),
    {
        check(statement_at(&self.function.body.body, index, &self.context));
        self
    }
}

fn check_block_indent(block: &CodeBlock, expected: usize, context: &str) {
    assert_eq!(block.indent, expected, "{}: wrong block indentation", context);
}

fn check_statement_count(block: &CodeBlock, expected: usize, context: &str) {
    assert_eq!(
        block.body.len(),
        expected,
        "{}: expected {} statements in block, found {}",
        context,
        expected,
        block.body.len()
    );
}
