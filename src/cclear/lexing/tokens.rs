//! Raw token shapes for CClear source
//!
//! This is the rule table of the lexer. Logos picks the longest match at every position
//! and breaks ties by priority, which gives the ordering the language needs:
//! comments win over the `/` symbol, keywords win over identifiers of the same length,
//! floats win over ints. Positions, indentation and the final [`TokenKind`] are assigned
//! afterwards by the scanner in [`lexer_impl`](super::lexer_impl).
//!
//! [`TokenKind`]: crate::cclear::token::TokenKind
use crate::cclear::token::TokenKind;
use logos::Logos;

/// All shapes the CClear lexer recognizes
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RawToken {
    // Line breaks
    #[regex(r"\r\n|\n|\r")]
    Newline,

    // Spaces and tabs. Becomes indentation when it starts a line.
    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // Keywords
    #[token("alc")]
    #[token("if")]
    #[token("elif")]
    #[token("else")]
    #[token("els")]
    #[token("func")]
    Keyword,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Single character symbols
    #[regex(r#"[`~!@#$%^&*()\-=+\[\]{}\\|:;"',<.>/?]"#)]
    Symbol,
}

impl RawToken {
    /// The token kind this shape maps to, ignoring position (indentation is decided by the scanner)
    pub fn kind(&self) -> TokenKind {
        match self {
            RawToken::Newline => TokenKind::Newline,
            RawToken::Whitespace => TokenKind::None,
            RawToken::LineComment | RawToken::BlockComment => TokenKind::Comment,
            RawToken::Keyword => TokenKind::Keyword,
            RawToken::Float => TokenKind::Float,
            RawToken::Int => TokenKind::Int,
            RawToken::Identifier => TokenKind::VarName,
            RawToken::Symbol => TokenKind::Symbol,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, RawToken::LineComment | RawToken::BlockComment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes(source: &str) -> Vec<RawToken> {
        RawToken::lexer(source).filter_map(|result| result.ok()).collect()
    }

    #[test]
    fn test_keywords_beat_identifiers() {
        assert_eq!(shapes("alc"), vec![RawToken::Keyword]);
        assert_eq!(shapes("els"), vec![RawToken::Keyword]);
        // Longer identifiers that start with a keyword stay identifiers
        assert_eq!(shapes("alcx"), vec![RawToken::Identifier]);
        assert_eq!(shapes("iffy"), vec![RawToken::Identifier]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(shapes("123"), vec![RawToken::Int]);
        assert_eq!(shapes("1.5"), vec![RawToken::Float]);
        assert_eq!(shapes("2isa"), vec![RawToken::Int, RawToken::Identifier]);
    }

    #[test]
    fn test_comments_beat_division() {
        assert_eq!(shapes("// note"), vec![RawToken::LineComment]);
        assert_eq!(shapes("/* a * b */"), vec![RawToken::BlockComment]);
        assert_eq!(
            shapes("4 / 2"),
            vec![
                RawToken::Int,
                RawToken::Whitespace,
                RawToken::Symbol,
                RawToken::Whitespace,
                RawToken::Int
            ]
        );
    }

    #[test]
    fn test_underscore_names() {
        assert_eq!(shapes("____hi"), vec![RawToken::Identifier]);
        assert_eq!(shapes("_yo___"), vec![RawToken::Identifier]);
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(shapes("\r\n"), vec![RawToken::Newline]);
        assert_eq!(shapes("\n\n"), vec![RawToken::Newline, RawToken::Newline]);
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        let mut lexer = RawToken::lexer("§");
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert_eq!(lexer.span().start, 0);
    }
}
