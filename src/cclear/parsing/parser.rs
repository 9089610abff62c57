//! Parser state and the primitives every grammar rule is built from
//!
//! The parser is a plain recursive-descent engine over a [`TokenStream`]. Per-parse state is
//! owned by one [`Parser`] value:
//!
//!     cursor           index of the next unread token
//!     saved            LIFO stack of cursor positions for backtracking
//!     expected_indent  indentation every statement of the current scope must have
//!     can_dedent       whether a shallower token may close the current scope
//!     depth            open blocks and parenthesized expressions, capped at [`MAX_NESTING`]
//!
//! Grammar rules return `Ok(Command::Empty)` when they do not apply, which lets callers try
//! alternatives. Contract violations return `Err(Diagnostic)` and abort the whole parse.

use crate::cclear::ast::{Command, Group};
use crate::cclear::error::{Diagnostic, ErrorKind};
use crate::cclear::token::{Token, TokenStream};

pub type ParseResult = Result<Command, Diagnostic>;

/// Deepest nesting of blocks and parentheses a script may use
pub const MAX_NESTING: usize = 32;

/// A grammar rule
pub type Rule<'t> = fn(&mut Parser<'t>) -> ParseResult;

/// How [`Parser::binary_or_fallback`] combines its sub-rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorMode<'a> {
    /// `pre body pos`, e.g. `( expr )` or `if expr ;`
    Bracket { pre: &'a str, pos: &'a str },
    /// `left op right`
    Infix(&'a str),
    /// `left right` with no separator
    Chain,
}

pub struct Parser<'t> {
    tokens: &'t TokenStream,
    cursor: usize,
    saved: Vec<usize>,
    pub(crate) expected_indent: Option<usize>,
    pub(crate) can_dedent: bool,
    depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t TokenStream) -> Self {
        Self {
            tokens,
            cursor: 0,
            saved: Vec::new(),
            expected_indent: None,
            can_dedent: false,
            depth: 0,
        }
    }

    // ---- cursor -----------------------------------------------------------

    /// The next unread token, or the sentinel past the end
    pub fn peek(&self) -> &'t Token {
        self.tokens.get(self.cursor)
    }

    /// The most recently consumed token
    pub fn current(&self) -> &'t Token {
        match self.cursor.checked_sub(1) {
            Some(index) => self.tokens.get(index),
            None => self.tokens.get(self.tokens.len()),
        }
    }

    /// Consumes and returns the next token (the sentinel once past the end)
    pub fn next(&mut self) -> &'t Token {
        let token = self.tokens.get(self.cursor);
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    pub fn at_end(&self) -> bool {
        self.peek().is_end()
    }

    /// Consumes the next token if its text is `expected` and its indentation fits the scope
    pub fn next_if_equals(&mut self, expected: &str) -> Result<bool, Diagnostic> {
        let token = self.peek();
        if token.is_end() || *token != expected {
            return Ok(false);
        }
        if !self.check_indent(token)? {
            return Ok(false);
        }
        self.cursor += 1;
        Ok(true)
    }

    /// Consumes the next token if `accept` likes it and its indentation fits the scope
    pub fn next_if(&mut self, accept: impl Fn(&Token) -> bool) -> Result<Option<&'t Token>, Diagnostic> {
        let token = self.peek();
        if token.is_end() || !accept(token) {
            return Ok(None);
        }
        if !self.check_indent(token)? {
            return Ok(None);
        }
        self.cursor += 1;
        Ok(Some(token))
    }

    // ---- backtracking -----------------------------------------------------

    pub fn save(&mut self) {
        self.saved.push(self.cursor);
    }

    /// Rewinds to the most recent save and drops it
    pub fn restore(&mut self) {
        if let Some(cursor) = self.saved.pop() {
            self.cursor = cursor;
        }
    }

    /// Drops the most recent save without moving the cursor
    pub fn discard(&mut self) {
        self.saved.pop();
    }

    /// Runs `rule` one nesting level deeper, failing once [`MAX_NESTING`] is reached
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, Diagnostic>,
    ) -> Result<T, Diagnostic> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_here(
                ErrorKind::TooDeep,
                format!("nesting deeper than {} levels", MAX_NESTING),
            ));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // ---- indentation ------------------------------------------------------

    /// Checks a token about to be consumed against the scope's expected indentation
    ///
    /// Returns `Ok(false)` when the token is shallower and the scope may close. Deeper tokens,
    /// and shallower ones before the scope holds any statement, are fatal.
    pub fn check_indent(&self, token: &Token) -> Result<bool, Diagnostic> {
        let expected = match self.expected_indent {
            Some(expected) => expected,
            None => return Ok(true),
        };

        if token.indent == expected {
            Ok(true)
        } else if token.indent > expected {
            Err(self.error(ErrorKind::UnexpectedIndent, "unexpected indent", token))
        } else if self.can_dedent {
            Ok(false)
        } else {
            Err(self.error(ErrorKind::AbruptDedent, "abrupt dedent", token))
        }
    }

    // ---- diagnostics ------------------------------------------------------

    pub fn error(&self, kind: ErrorKind, message: impl Into<String>, token: &Token) -> Diagnostic {
        let token = if token.is_end() {
            self.end_token()
        } else {
            token.clone()
        };
        Diagnostic::new(kind, message, token)
    }

    /// Error pointing at the next unread token
    pub fn error_here(&self, kind: ErrorKind, message: impl Into<String>) -> Diagnostic {
        self.error(kind, message, self.peek())
    }

    /// Position just past the last token, for errors at end of input
    fn end_token(&self) -> Token {
        match self.tokens.as_slice().last() {
            Some(last) => Token::new(
                "",
                last.kind,
                last.index + last.text.len(),
                last.row,
                last.col + last.text.chars().count(),
                last.indent,
            ),
            None => Token::sentinel(),
        }
    }

    // ---- operator template ------------------------------------------------

    /// Shared shape of every binary, bracketed and chained construct
    ///
    /// Bracket mode consumes `pre`, parses the body with `right` (falling back to `left`
    /// when `right` yields nothing), then requires `pos`. When `pre` is absent it delegates
    /// to `left`. Infix mode parses `left`, then `op right`; if `right` yields nothing the
    /// operator is given back and `left` is returned alone. Chain mode parses `left`, then
    /// tries `right` with no separator.
    pub fn binary_or_fallback(
        &mut self,
        left: Rule<'t>,
        right: Option<Rule<'t>>,
        mode: OperatorMode<'_>,
    ) -> ParseResult {
        match mode {
            OperatorMode::Bracket { pre, pos } => {
                if !self.next_if_equals(pre)? {
                    return left(self);
                }
                let pre_token = self.current().clone();

                let mut body = match right {
                    Some(right) => right(self)?,
                    None => Command::Empty,
                };
                if body.is_empty() {
                    body = left(self)?;
                }

                if !self.next_if_equals(pos)? {
                    return Err(self.error_here(
                        ErrorKind::Expected,
                        format!("expected '{}' to close '{}'", pos, pre_token),
                    ));
                }
                let pos_token = self.current().clone();

                Ok(Command::Group(Group::bracket(pre_token, body, pos_token)))
            }
            OperatorMode::Infix(op) => {
                let lhs = left(self)?;
                if lhs.is_empty() {
                    return Ok(lhs);
                }

                self.save();
                if !self.next_if_equals(op)? {
                    self.discard();
                    return Ok(lhs);
                }
                let op_token = self.current().clone();

                let rhs = match right {
                    Some(right) => right(self)?,
                    None => left(self)?,
                };
                if rhs.is_empty() {
                    self.restore();
                    return Ok(lhs);
                }
                self.discard();

                Ok(Command::Group(Group::infix(lhs, Some(op_token), rhs)))
            }
            OperatorMode::Chain => {
                let lhs = left(self)?;
                if lhs.is_empty() {
                    return Ok(lhs);
                }

                let rhs = match right {
                    Some(right) => right(self)?,
                    None => Command::Empty,
                };
                if rhs.is_empty() {
                    return Ok(lhs);
                }

                Ok(Command::Group(Group::infix(lhs, None, rhs)))
            }
        }
    }

    /// Rule that never matches
    pub fn parse_empty(&mut self) -> ParseResult {
        Ok(Command::Empty)
    }
}
