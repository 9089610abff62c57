//! Error types for lexing and parsing
//!
//! Both stages fail fast: the first problem aborts the stage and is returned to the caller
//! with the offending token, which carries enough position data to render a diagnostic
//! against the original source. Generation has no error type; it is total over any tree
//! the parser returns.

use crate::cclear::token::Token;
use std::fmt;

/// Classifies a parse diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input no lexing rule accepts
    InvalidToken,
    /// A statement is indented deeper than its scope
    UnexpectedIndent,
    /// A scope dedents before holding any statement
    AbruptDedent,
    /// Indentation returns to a level no enclosing scope uses
    UnexpectedDedent,
    /// A block header is not followed by an indented statement
    ExpectedBlock,
    /// No statement rule accepts the token
    UndefinedToken,
    /// A declaration option other than `static` or `const`
    InvalidKeyword,
    /// A name that does not follow the identifier grammar
    InvalidName,
    /// A required token or construct is missing
    Expected,
    /// Blocks or parentheses nested past the parser's limit
    TooDeep,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidToken => "invalid token",
            ErrorKind::UnexpectedIndent => "unexpected indent",
            ErrorKind::AbruptDedent => "abrupt dedent",
            ErrorKind::UnexpectedDedent => "unexpected dedent",
            ErrorKind::ExpectedBlock => "expected block",
            ErrorKind::UndefinedToken => "undefined token",
            ErrorKind::InvalidKeyword => "invalid keyword",
            ErrorKind::InvalidName => "invalid name",
            ErrorKind::Expected => "syntax error",
            ErrorKind::TooDeep => "nesting too deep",
        };
        write!(f, "{}", name)
    }
}

/// A fatal, positioned parse error
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    pub token: Token,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, message: impl Into<String>, token: Token) -> Self {
        Self {
            kind,
            message: message.into(),
            token,
        }
    }

    pub fn row(&self) -> usize {
        self.token.row
    }

    pub fn col(&self) -> usize {
        self.token.col
    }

    /// Renders the diagnostic with surrounding source lines
    pub fn render(&self, source_name: &str, source: &str) -> String {
        render_report(source_name, source, &self.token, &self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} col {} - {}",
            self.token.row, self.token.col, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

/// A fatal lexing error. The token is the `Error` token for the rejected input run.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub token: Token,
}

impl LexError {
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    pub fn message(&self) -> String {
        format!("invalid token '{}'", self.token.text)
    }

    pub fn render(&self, source_name: &str, source: &str) -> String {
        render_report(source_name, source, &self.token, &self.message())
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} col {} - {}",
            self.token.row,
            self.token.col,
            self.message()
        )
    }
}

impl std::error::Error for LexError {}

/// Any failure of the source-to-output pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Lex(LexError),
    Parse(Diagnostic),
}

impl CompileError {
    /// The token the failure points at
    pub fn token(&self) -> &Token {
        match self {
            CompileError::Lex(err) => &err.token,
            CompileError::Parse(diagnostic) => &diagnostic.token,
        }
    }

    pub fn render(&self, source_name: &str, source: &str) -> String {
        match self {
            CompileError::Lex(err) => err.render(source_name, source),
            CompileError::Parse(diagnostic) => diagnostic.render(source_name, source),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(err) => write!(f, "Lexing error: {}", err),
            CompileError::Parse(diagnostic) => write!(f, "Parse error: {}", diagnostic),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

impl From<Diagnostic> for CompileError {
    fn from(diagnostic: Diagnostic) -> Self {
        CompileError::Parse(diagnostic)
    }
}

fn render_report(source_name: &str, source: &str, token: &Token, message: &str) -> String {
    let mut report = format_source_context(source, token.row, token.col);
    report.push_str(&format!(
        "[Error in {} on line {} col {} - {}]",
        source_name, token.row, token.col, message
    ));
    report
}

/// Format source code context around an error location
///
/// Shows 2 lines before the error, the error line with >> marker and a caret under
/// `col`, and 2 lines after. `row` is 1-based; all lines are numbered.
pub fn format_source_context(source: &str, row: usize, col: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = row.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for line_num in start_line..end_line {
        let marker = if line_num == error_line { ">>" } else { "  " };
        let display_line_num = line_num + 1;

        context.push_str(&format!(
            "{} {:3} | {}\n",
            marker, display_line_num, lines[line_num]
        ));

        if line_num == error_line {
            let prefix: String = lines[line_num]
                .chars()
                .take(col)
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            context.push_str(&format!("       | {}^\n", prefix));
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cclear::token::TokenKind;

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";

        let context = format_source_context(source, 4, 6);

        // Should show lines 2-6
        assert!(!context.contains("line 1"));
        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("       |       ^"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 7"));
    }

    #[test]
    fn test_context_at_first_line() {
        let context = format_source_context("only\nsecond", 1, 0);
        assert!(context.starts_with(">>   1 | only\n       | ^\n"));
        assert!(context.contains("second"));
    }

    #[test]
    fn test_caret_keeps_tabs_aligned() {
        let context = format_source_context("\talc x", 1, 5);
        assert!(context.contains("       | \t    ^"));
    }

    #[test]
    fn test_render_trailer() {
        let token = Token::new("y", TokenKind::VarName, 15, 2, 4, 0);
        let diagnostic = Diagnostic::new(ErrorKind::Expected, "expected ':'", token);
        let report = diagnostic.render("main.cclr", "alc x:int;\nalc y int;\n");
        assert!(report.ends_with("[Error in main.cclr on line 2 col 4 - expected ':']"));
        assert!(report.contains(">>   2 | alc y int;"));
    }

    #[test]
    fn test_lex_error_message() {
        let token = Token::new("§", TokenKind::Error, 0, 1, 0, 0);
        let err = LexError::new(token);
        assert_eq!(err.to_string(), "line 1 col 0 - invalid token '§'");
        assert_eq!(
            CompileError::from(err).to_string(),
            "Lexing error: line 1 col 0 - invalid token '§'"
        );
    }
}
