//! Positional scanner on top of the logos rule table
//!
//! Logos only knows byte ranges. This scanner walks its output and attaches the
//! line-oriented metadata the parser depends on: `row`, `col`, and the per-line
//! `indent`, which is measured once from the leading whitespace run of each line and
//! copied onto every token of that line.
//!
//! An input run that no rule accepts stops the scan. The offending run (up to the next
//! whitespace) becomes an `Error` token and is returned inside a [`LexError`]; no partial
//! stream escapes.

use crate::cclear::error::LexError;
use crate::cclear::lexing::tokens::RawToken;
use crate::cclear::token::{Token, TokenKind, TokenStream};
use logos::Logos;

/// Scans one source text. Holds only per-call state.
pub struct Scanner<'src> {
    source: &'src str,
    row: usize,
    col: usize,
    indent: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            row: 1,
            col: 0,
            indent: 0,
        }
    }

    /// Scans the whole source, keeping newline, indentation and comment tokens
    pub fn scan(mut self) -> Result<TokenStream, LexError> {
        let mut tokens = Vec::new();
        let mut lexer = RawToken::lexer(self.source);

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let start_col = self.col;

            let raw = match result {
                Ok(raw) => raw,
                Err(()) => return Err(self.error_at(span.start)),
            };
            let text = lexer.slice();

            match raw {
                RawToken::Newline => {
                    tokens.push(Token::new(
                        text,
                        TokenKind::Newline,
                        span.start,
                        self.row,
                        start_col,
                        self.indent,
                    ));
                    self.row += 1;
                    self.col = 0;
                    self.indent = 0;
                }
                RawToken::Whitespace => {
                    let width = text.chars().count();
                    if start_col == 0 {
                        self.indent = width;
                        tokens.push(Token::new(
                            text,
                            TokenKind::Indent,
                            span.start,
                            self.row,
                            start_col,
                            self.indent,
                        ));
                    }
                    self.col += width;
                }
                RawToken::BlockComment => {
                    tokens.push(Token::new(
                        text,
                        TokenKind::Comment,
                        span.start,
                        self.row,
                        start_col,
                        self.indent,
                    ));
                    self.advance_over_multiline(text);
                }
                _ => {
                    tokens.push(Token::new(
                        text,
                        raw.kind(),
                        span.start,
                        self.row,
                        start_col,
                        self.indent,
                    ));
                    self.col += text.chars().count();
                }
            }
        }

        Ok(TokenStream::new(tokens))
    }

    /// Block comments may span lines; keep row/col in step with the source
    fn advance_over_multiline(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last_newline) => {
                self.row += text.matches('\n').count();
                self.col = text[last_newline + 1..].chars().count();
                self.indent = 0;
            }
            None => self.col += text.chars().count(),
        }
    }

    /// Builds the error for the unmatched run starting at `start`
    fn error_at(&self, start: usize) -> LexError {
        let rest = &self.source[start..];
        // The first char is always part of the run, even when it is unicode whitespace
        let end = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_whitespace())
            .map_or(rest.len(), |(index, _)| index);
        let run = &rest[..end];

        LexError::new(Token::new(
            run,
            TokenKind::Error,
            start,
            self.row,
            self.col,
            self.indent,
        ))
    }
}
