//! Statement grammar and indentation scopes
//!
//! Statements are tried in a fixed order: variable declaration, if chain, function
//! definition, bare expression. The first rule that produces a node wins. Blocks are not
//! delimited by braces; a header ending in `;` opens a scope whose statements all sit one
//! level deeper, and the first shallower token closes it.

use super::parser::{OperatorMode, ParseResult, Parser, Rule};
use crate::cclear::ast::{
    Assignment, CodeBlock, Command, ExpressionStatement, FunctionDef, Group, IfChain, IfStatement,
    Script, TokenList, VarDeclaration, VarTypeSpecifier,
};
use crate::cclear::error::{Diagnostic, ErrorKind};
use crate::cclear::token::{Token, TokenKind};

/// Options accepted inside `alc( ... )`
const DECLARATION_OPTIONS: [&str; 2] = ["static", "const"];

impl<'t> Parser<'t> {
    // ---- scopes -----------------------------------------------------------

    /// Parses the whole stream as the top-level scope
    pub fn parse_script(&mut self) -> Result<Script, Diagnostic> {
        if self.at_end() {
            return Ok(Script::default());
        }
        self.expected_indent = Some(self.peek().indent);
        self.can_dedent = false;

        let mut body = Vec::new();
        while !self.at_end() {
            let token = self.peek();
            if !self.check_indent(token)? {
                return Err(self.error(
                    ErrorKind::UnexpectedDedent,
                    "unexpected dedent: no enclosing block uses this indentation",
                    token,
                ));
            }
            body.push(self.parse_statement()?);
            self.can_dedent = true;
        }

        Ok(Script::new(body))
    }

    /// Parses the block below a header whose line is indented by `header_indent`
    fn parse_block(&mut self, header_indent: usize) -> Result<CodeBlock, Diagnostic> {
        self.nested(|parser| parser.parse_block_body(header_indent))
    }

    fn parse_block_body(&mut self, header_indent: usize) -> Result<CodeBlock, Diagnostic> {
        let first = self.peek();
        if first.is_end() || first.indent == header_indent {
            return Err(self.error(ErrorKind::ExpectedBlock, "expected an indented block", first));
        }
        if first.indent < header_indent {
            return Err(self.error(ErrorKind::AbruptDedent, "abrupt dedent", first));
        }

        let indent = first.indent;
        let outer_indent = self.expected_indent.replace(indent);
        self.can_dedent = false;

        let mut body = Vec::new();
        while !self.at_end() {
            if !self.check_indent(self.peek())? {
                break;
            }
            body.push(self.parse_statement()?);
            self.can_dedent = true;
        }

        // The header's scope already holds the header statement, so it may close too
        self.expected_indent = outer_indent;
        self.can_dedent = true;

        Ok(CodeBlock { body, indent })
    }

    // ---- statements -------------------------------------------------------

    /// One statement of the current scope
    pub fn parse_statement(&mut self) -> ParseResult {
        let rules: [Rule<'t>; 4] = [
            Self::parse_var_declaration,
            Self::parse_if_chain,
            Self::parse_function,
            Self::parse_expression_statement,
        ];
        for rule in rules {
            let statement = rule(self)?;
            if !statement.is_empty() {
                return Ok(statement);
            }
        }

        let token = self.peek();
        Err(self.error(
            ErrorKind::UndefinedToken,
            format!("undefined token '{}'", token),
            token,
        ))
    }

    fn parse_expression_statement(&mut self) -> ParseResult {
        let expression = self.parse_expression()?;
        if expression.is_empty() {
            return Ok(expression);
        }
        let terminator = if self.next_if_equals(";")? {
            Some(self.current().clone())
        } else {
            None
        };

        Ok(Command::ExpressionStatement(ExpressionStatement {
            expression: Box::new(expression),
            terminator,
        }))
    }

    // ---- alc --------------------------------------------------------------

    /// `alc (options) name:type = expression ;`
    fn parse_var_declaration(&mut self) -> ParseResult {
        if !self.next_if_equals("alc")? {
            return Ok(Command::Empty);
        }
        let keyword = self.current().clone();

        let options = self.binary_or_fallback(
            Self::parse_empty,
            Some(Self::parse_var_options),
            OperatorMode::Bracket { pre: "(", pos: ")" },
        )?;

        let specifier = self.expect_specifier("variable")?;

        let assignment = if self.next_if_equals("=")? {
            let equator = self.current().clone();
            let expression = self.parse_expression()?;
            if expression.is_empty() {
                return Err(self.error_here(
                    ErrorKind::Expected,
                    "expected an expression after '='",
                ));
            }
            Command::Assignment(Assignment {
                equator,
                expression: Box::new(expression),
            })
        } else {
            Command::Empty
        };

        if !self.next_if_equals(";")? {
            return Err(self.error_here(
                ErrorKind::Expected,
                "variable declaration expected a ';'",
            ));
        }
        let terminator = self.current().clone();

        Ok(Command::VarDeclaration(VarDeclaration {
            keyword,
            options: Box::new(options),
            specifier,
            assignment: Box::new(assignment),
            terminator,
        }))
    }

    /// Contents of `alc( ... )`: any number of `static` / `const`
    fn parse_var_options(&mut self) -> ParseResult {
        let mut tokens = Vec::new();
        loop {
            let token = self.peek();
            if token.is_end() || *token == ")" {
                break;
            }
            if !DECLARATION_OPTIONS.contains(&token.as_str()) {
                return Err(self.error(
                    ErrorKind::InvalidKeyword,
                    format!("'{}' is not a declaration option", token),
                    token,
                ));
            }
            match self.next_if(|_| true)? {
                Some(option) => tokens.push(option.clone()),
                None => break,
            }
        }
        Ok(Command::TokenList(TokenList { tokens }))
    }

    /// `name : type`
    fn expect_specifier(&mut self, what: &str) -> Result<VarTypeSpecifier, Diagnostic> {
        let name = self.expect_name(&format!("{} name", what))?;
        if !self.next_if_equals(":")? {
            return Err(self.error_here(
                ErrorKind::Expected,
                format!("expected ':' after {} name '{}'", what, name),
            ));
        }
        let separator = self.current().clone();
        let var_type = self.expect_name("type name")?;

        Ok(VarTypeSpecifier {
            name,
            separator,
            var_type,
        })
    }

    fn expect_name(&mut self, what: &str) -> Result<Token, Diagnostic> {
        // The lexer only tags identifier-shaped non-keywords as names
        match self.next_if(|token| token.kind == TokenKind::VarName)? {
            Some(token) => Ok(token.clone()),
            None => {
                let token = self.peek();
                let message = if token.is_end() {
                    format!("expected a {}", what)
                } else {
                    format!("'{}' is not a valid {}", token, what)
                };
                Err(self.error(ErrorKind::InvalidName, message, token))
            }
        }
    }

    // ---- if / elif / else -------------------------------------------------

    fn parse_if_chain(&mut self) -> ParseResult {
        let chain = self.binary_or_fallback(
            Self::parse_if_clause,
            Some(Self::parse_else_chain),
            OperatorMode::Chain,
        )?;
        if chain.is_empty() {
            return Ok(chain);
        }

        let mut clauses = Vec::new();
        collect_clauses(chain, &mut clauses);
        Ok(Command::IfChain(IfChain { clauses }))
    }

    /// Any number of `elif` clauses, then an optional `else`
    fn parse_else_chain(&mut self) -> ParseResult {
        let mut clauses = Vec::new();
        loop {
            let clause = self.parse_elif_clause()?;
            if clause.is_empty() {
                break;
            }
            clauses.push(clause);
        }
        let last = self.parse_else_clause()?;
        if !last.is_empty() {
            clauses.push(last);
        }

        // Same shape the chain template builds: clause, then the rest of the chain
        let mut chain = Command::Empty;
        for clause in clauses.into_iter().rev() {
            chain = if chain.is_empty() {
                clause
            } else {
                Command::Group(Group::infix(clause, None, chain))
            };
        }
        Ok(chain)
    }

    fn parse_if_clause(&mut self) -> ParseResult {
        self.parse_clause("if", true)
    }

    fn parse_elif_clause(&mut self) -> ParseResult {
        self.parse_clause("elif", true)
    }

    fn parse_else_clause(&mut self) -> ParseResult {
        let clause = self.parse_clause("else", false)?;
        if !clause.is_empty() {
            return Ok(clause);
        }
        self.parse_clause("els", false)
    }

    /// `keyword condition ;` followed by a block
    fn parse_clause(&mut self, keyword: &str, conditioned: bool) -> ParseResult {
        let condition_rule: Option<Rule<'t>> = if conditioned {
            Some(Self::parse_expression)
        } else {
            None
        };
        let header = self.binary_or_fallback(
            Self::parse_empty,
            condition_rule,
            OperatorMode::Bracket {
                pre: keyword,
                pos: ";",
            },
        )?;

        let Command::Group(Group {
            pre_op: Some(keyword),
            left: condition,
            pos_op: Some(terminator),
            ..
        }) = header
        else {
            return Ok(Command::Empty);
        };

        if conditioned && condition.is_empty() {
            return Err(self.error(
                ErrorKind::Expected,
                format!("expected a condition after '{}'", keyword),
                &terminator,
            ));
        }

        let body = self.parse_block(keyword.indent)?;
        Ok(Command::IfStatement(IfStatement {
            keyword,
            condition,
            terminator,
            body,
        }))
    }

    // ---- func -------------------------------------------------------------

    /// `func name(params):` followed by a block
    fn parse_function(&mut self) -> ParseResult {
        if !self.next_if_equals("func")? {
            return Ok(Command::Empty);
        }
        let keyword = self.current().clone();
        let name = self.expect_name("function name")?;

        let params = self.binary_or_fallback(
            Self::parse_empty,
            Some(Self::parse_parameters),
            OperatorMode::Bracket { pre: "(", pos: ")" },
        )?;
        if params.is_empty() {
            return Err(self.error_here(
                ErrorKind::Expected,
                format!("function '{}' expected a parameter list", name),
            ));
        }

        if !(self.next_if_equals(";")? || self.next_if_equals(":")?) {
            return Err(self.error_here(
                ErrorKind::Expected,
                "function header expected a ':' or ';'",
            ));
        }
        let terminator = self.current().clone();

        let body = self.parse_block(keyword.indent)?;
        Ok(Command::FunctionDef(FunctionDef {
            keyword,
            name,
            params: Box::new(params),
            terminator,
            body,
        }))
    }

    /// `name:type, name:type, ...`
    fn parse_parameters(&mut self) -> ParseResult {
        self.binary_or_fallback(
            Self::parse_parameter,
            Some(Self::parse_parameters),
            OperatorMode::Infix(","),
        )
    }

    fn parse_parameter(&mut self) -> ParseResult {
        if self.peek().kind != TokenKind::VarName {
            return Ok(Command::Empty);
        }
        Ok(Command::VarTypeSpecifier(self.expect_specifier("parameter")?))
    }
}

/// Flattens the chain groups built by the clause rules
fn collect_clauses(command: Command, out: &mut Vec<IfStatement>) {
    match command {
        Command::IfStatement(clause) => out.push(clause),
        Command::Group(group) => {
            collect_clauses(*group.left, out);
            collect_clauses(*group.right, out);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cclear::ast::AstNode;
    use crate::cclear::lexing::tokenize;

    fn parse(source: &str) -> Result<Script, Diagnostic> {
        let tokens = tokenize(source).expect("source to lex");
        Parser::new(&tokens).parse_script()
    }

    #[test]
    fn test_names_come_from_the_lexer() {
        let script = parse("alc _yo___:tes5t;").unwrap();
        assert_eq!(script.body[0].display_label(), "_yo___:tes5t");

        let err = parse("alc 5test:int;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidName);
        assert_eq!(err.message, "'5' is not a valid variable name");
    }

    #[test]
    fn test_long_elif_chain() {
        let mut source = String::from("if a;\n\tx;\n");
        for _ in 0..200 {
            source.push_str("elif b;\n\tx;\n");
        }
        source.push_str("els;\n\ty;\n");
        let script = parse(&source).unwrap();
        let Command::IfChain(chain) = &script.body[0] else {
            panic!("expected an if chain");
        };
        assert_eq!(chain.clauses.len(), 202);
        assert!(chain.clauses[201].is_else());
    }

    #[test]
    fn test_blocks_nested_past_the_limit() {
        let mut source = String::new();
        for level in 0..40 {
            source.push_str(&"\t".repeat(level));
            source.push_str("if a;\n");
        }
        source.push_str(&"\t".repeat(40));
        source.push_str("b;\n");
        let err = parse(&source).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TooDeep);
        assert_eq!(err.row(), 33);
    }

    #[test]
    fn test_declaration_fields() {
        let script = parse("alc(static const static) x:int = 1;").unwrap();
        let Command::VarDeclaration(decl) = &script.body[0] else {
            panic!("expected a declaration, got {:?}", script.body[0]);
        };
        let options: Vec<_> = decl.option_tokens().iter().map(Token::as_str).collect();
        assert_eq!(options, vec!["static", "const", "static"]);
        assert_eq!(decl.specifier.name.text, "x");
        assert_eq!(decl.specifier.var_type.text, "int");
        assert!(!decl.assignment.is_empty());
    }

    #[test]
    fn test_unknown_option_is_an_invalid_keyword() {
        let err = parse("alc(static mutable) x:int;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidKeyword);
        assert_eq!(err.token.text, "mutable");
    }

    #[test]
    fn test_declaration_requires_terminator() {
        let err = parse("alc x:int = 5").unwrap_err();
        assert_eq!(err.message, "variable declaration expected a ';'");
    }

    #[test]
    fn test_declaration_requires_valid_name() {
        let err = parse("alc 5:int;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidName);
        let err = parse("alc if:int;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidName);
    }

    #[test]
    fn test_else_alias() {
        let script = parse("if 1;\n\tx;\nels;\n\ty;\n").unwrap();
        let Command::IfChain(chain) = &script.body[0] else {
            panic!("expected an if chain");
        };
        assert_eq!(chain.clauses.len(), 2);
        assert!(chain.clauses[1].is_else());
        assert_eq!(chain.clauses[1].keyword.text, "els");
    }

    #[test]
    fn test_chain_stops_after_else() {
        let err = parse("if 1;\n\tx;\nelse;\n\ty;\nelif 2;\n\tz;\n").unwrap_err();
        // A stray elif after else is not a statement
        assert_eq!(err.kind, ErrorKind::UndefinedToken);
        assert_eq!(err.token.text, "elif");
    }

    #[test]
    fn test_function_parameters() {
        let script = parse("func add(a:int, b:float):\n\ta + b;\n").unwrap();
        let Command::FunctionDef(function) = &script.body[0] else {
            panic!("expected a function");
        };
        let params: Vec<_> = function
            .parameters()
            .iter()
            .map(|p| p.display_label())
            .collect();
        assert_eq!(params, vec!["a:int", "b:float"]);
        assert_eq!(function.body.indent, 1);
    }

    #[test]
    fn test_function_without_parameters() {
        let script = parse("func main();\n\tx;\n").unwrap();
        let Command::FunctionDef(function) = &script.body[0] else {
            panic!("expected a function");
        };
        assert!(function.parameters().is_empty());
    }
}
