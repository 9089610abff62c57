//! Token definitions shared by the lexer and the parser
//!
//! A [`Token`] is produced once by the lexer and never mutated afterwards. Every token
//! carries the position data the parser needs for indentation tracking and that
//! diagnostics need for rendering:
//!
//!     text    the matched substring
//!     index   byte offset of the token in the source
//!     row     1-based line
//!     col     0-based column within the line (in characters)
//!     indent  leading whitespace columns of the token's line, copied onto every token of it
//!
//! Tokens compare equal to string slices by text, so grammar code reads as
//! `token == "alc"`.
//!
//! [`TokenStream`] is the read-only sequence handed to the parser. Indexing past either
//! end yields the terminal sentinel (empty text, kind `None`) instead of panicking, which
//! keeps lookahead code free of bounds checks.

use serde::Serialize;
use std::fmt;
use std::ops::Index;

/// Semantic category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Whitespace, and the terminal sentinel
    None,
    Unknown,
    /// Input no lexing rule accepts
    Error,
    VarName,
    Keyword,
    Int,
    Float,
    Newline,
    Indent,
    Symbol,
    Comment,
}

impl TokenKind {
    /// Trivia never reaches the parser
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::None | TokenKind::Newline | TokenKind::Indent | TokenKind::Comment
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::None => "None",
            TokenKind::Unknown => "Unknown",
            TokenKind::Error => "Error",
            TokenKind::VarName => "VarName",
            TokenKind::Keyword => "Keyword",
            TokenKind::Int => "Int",
            TokenKind::Float => "Float",
            TokenKind::Newline => "Newline",
            TokenKind::Indent => "Indent",
            TokenKind::Symbol => "Symbol",
            TokenKind::Comment => "Comment",
        };
        write!(f, "{}", name)
    }
}

/// A single lexical unit with its position metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub indent: usize,
    pub kind: TokenKind,
}

static SENTINEL: Token = Token::sentinel();

impl Token {
    pub fn new(
        text: impl Into<String>,
        kind: TokenKind,
        index: usize,
        row: usize,
        col: usize,
        indent: usize,
    ) -> Self {
        Self {
            text: text.into(),
            index,
            row,
            col,
            indent,
            kind,
        }
    }

    /// The terminal sentinel returned for out-of-range lookahead
    pub const fn sentinel() -> Self {
        Self {
            text: String::new(),
            index: 0,
            row: 0,
            col: 0,
            indent: 0,
            kind: TokenKind::None,
        }
    }

    /// True for the terminal sentinel
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::None && self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// Ordered, read-only sequence of tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Token at `index`, or the sentinel when out of range
    pub fn get(&self, index: usize) -> &Token {
        self.tokens.get(index).unwrap_or(&SENTINEL)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// The text of every token, in order
    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::as_str).collect()
    }

    /// Drops trivia tokens (whitespace, newlines, indentation, comments)
    pub fn without_trivia(self) -> Self {
        Self {
            tokens: self
                .tokens
                .into_iter()
                .filter(|token| !token.kind.is_trivia())
                .collect(),
        }
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
