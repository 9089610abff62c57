//! Expression grammar
//!
//! Precedence, tightest first: atom (literal, name or parenthesized expression), `*`, `/`,
//! `+`, `-`. Each level's right operand is a whole expression, so every operator is
//! right-associative and `-` binds loosest:
//!
//!     1 - 2 + 3   parses as   1 - (2 + 3)
//!     2 * 5 - 1   parses as   2 * (5 - 1)
//!
//! A level only claims its own operator and hands everything after it to the top of the
//! grammar, so an operator run always nests to the right whatever the operators are:
//! `a op1 b op2 c` is `a op1 (b op2 c)`. The parser reads the run in a loop and folds it
//! from the right, which keeps long expressions off the call stack. Only parentheses recurse.
//!
//! Rendering is unaffected since the generator re-emits operands in source order.

use super::parser::{OperatorMode, ParseResult, Parser};
use crate::cclear::ast::{BinaryExpression, Command, Literal};
use crate::cclear::error::ErrorKind;
use crate::cclear::token::{Token, TokenKind};

/// Binary operators, tightest first
const OPERATORS: [&str; 4] = ["*", "/", "+", "-"];

impl<'t> Parser<'t> {
    pub fn parse_expression(&mut self) -> ParseResult {
        self.nested(Self::parse_operator_run)
    }

    /// `atom (op atom)*`, folded into right-nested binary expressions
    fn parse_operator_run(&mut self) -> ParseResult {
        let first = self.parse_atom()?;
        if first.is_empty() {
            return Ok(first);
        }

        let mut operands = vec![first];
        let mut operators = Vec::new();
        loop {
            let token = self.peek();
            if !OPERATORS.contains(&token.as_str()) {
                break;
            }

            self.save();
            if !self.next_if_equals(&token.text)? {
                self.discard();
                break;
            }
            let op = self.current().clone();

            // A dangling operator is given back to the caller
            let operand = self.parse_atom()?;
            if operand.is_empty() {
                self.restore();
                break;
            }
            self.discard();

            operators.push(op);
            operands.push(operand);
        }

        Ok(fold_right(operands, operators))
    }

    /// Literal, name, or `( expression )`
    fn parse_atom(&mut self) -> ParseResult {
        let atom = self.binary_or_fallback(
            Self::parse_primary,
            Some(Self::parse_expression),
            OperatorMode::Bracket { pre: "(", pos: ")" },
        )?;

        if let Command::Group(group) = &atom {
            if group.left.is_empty() {
                let close = group.pos_op.as_ref().unwrap_or_else(|| self.current());
                return Err(self.error(
                    ErrorKind::Expected,
                    "expected an expression inside '( )'",
                    close,
                ));
            }
        }
        Ok(atom)
    }

    fn parse_primary(&mut self) -> ParseResult {
        if let Some(token) = self.next_if(|token| token.kind.is_numeric())? {
            return Ok(Command::NumericLiteral(Literal::new(token.clone())));
        }
        if let Some(token) = self.next_if(|token| token.kind == TokenKind::VarName)? {
            return Ok(Command::Identifier(Literal::new(token.clone())));
        }
        Ok(Command::Empty)
    }
}

/// `[a, b, c]` with `[op1, op2]` becomes `a op1 (b op2 c)`
fn fold_right(operands: Vec<Command>, operators: Vec<Token>) -> Command {
    let mut operands = operands.into_iter().rev();
    let mut tree = operands.next().unwrap_or(Command::Empty);
    for (op, left) in operators.into_iter().rev().zip(operands) {
        tree = Command::BinaryExpression(BinaryExpression {
            op,
            left: Box::new(left),
            right: Box::new(tree),
        });
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cclear::ast::AstNode;
    use crate::cclear::lexing::tokenize;

    fn expression(source: &str) -> Command {
        let tokens = tokenize(source).expect("source to lex");
        let mut parser = Parser::new(&tokens);
        parser.parse_expression().expect("expression to parse")
    }

    /// Fully parenthesized shape of an expression tree
    fn shape(command: &Command) -> String {
        match command {
            Command::BinaryExpression(expr) => {
                format!("{}({}, {})", expr.op, shape(&expr.left), shape(&expr.right))
            }
            Command::Group(group) => format!("[{}]", shape(&group.left)),
            other => other.display_label(),
        }
    }

    #[test]
    fn test_literals_and_names() {
        assert_eq!(shape(&expression("42")), "42");
        assert_eq!(shape(&expression("1.5")), "1.5");
        assert_eq!(shape(&expression("speed")), "speed");
        assert!(expression("").is_empty());
        assert!(expression(";").is_empty());
    }

    #[test]
    fn test_subtraction_binds_loosest() {
        assert_eq!(shape(&expression("1 - 2 + 3")), "-(1, +(2, 3))");
    }

    #[test]
    fn test_operators_are_right_associative() {
        assert_eq!(shape(&expression("1 * 2 * 3")), "*(1, *(2, 3))");
        assert_eq!(shape(&expression("8 / 4 / 2")), "/(8, /(4, 2))");
    }

    #[test]
    fn test_mixed_operators_nest_to_the_right() {
        assert_eq!(
            shape(&expression("1 * 2 - 3 / 4 + 5")),
            "*(1, -(2, /(3, +(4, 5))))"
        );
        assert_eq!(shape(&expression("(1 - 2) + 3")), "+([-(1, 2)], 3)");
    }

    #[test]
    fn test_nested_parentheses_have_a_limit() {
        let source = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        let tokens = tokenize(&source).unwrap();
        let err = Parser::new(&tokens).parse_expression().unwrap_err();
        assert_eq!(err.kind, ErrorKind::TooDeep);
        assert_eq!(err.token.text, "(");
    }

    #[test]
    fn test_groups_keep_their_brackets() {
        let expr = expression("2 * (3 + 4)");
        assert_eq!(shape(&expr), "*(2, [+(3, 4)])");
        assert_eq!(expr.source_text(), "2 * ( 3 + 4 )");
    }

    #[test]
    fn test_dangling_operator_is_given_back() {
        let tokens = tokenize("1 + ;").unwrap();
        let mut parser = Parser::new(&tokens);
        let expr = parser.parse_expression().unwrap();
        assert_eq!(shape(&expr), "1");
        assert_eq!(parser.peek().text, "+");
    }

    #[test]
    fn test_empty_parentheses_are_rejected() {
        let tokens = tokenize("( )").unwrap();
        let mut parser = Parser::new(&tokens);
        let err = parser.parse_expression().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Expected);
        assert_eq!(err.token.text, ")");
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let tokens = tokenize("(1 + 2").unwrap();
        let mut parser = Parser::new(&tokens);
        let err = parser.parse_expression().unwrap_err();
        assert_eq!(err.message, "expected ')' to close '('");
    }
}
