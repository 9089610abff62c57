//! Lexer behavior seen from outside the crate: token kinds, positions and failures

use cclear::cclear::lexing::{tokenize, tokenize_raw, TokenKind};
use rstest::rstest;
use std::fs;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .expect("source to lex")
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[rstest]
#[case::int("42", TokenKind::Int)]
#[case::float("4.25", TokenKind::Float)]
#[case::name("story", TokenKind::VarName)]
#[case::underscore_name("_tmp", TokenKind::VarName)]
#[case::keyword("elif", TokenKind::Keyword)]
#[case::else_alias("els", TokenKind::Keyword)]
#[case::keyword_prefix("iffy", TokenKind::VarName)]
#[case::symbol(";", TokenKind::Symbol)]
fn single_token_kind(#[case] source: &str, #[case] expected: TokenKind) {
    assert_eq!(kinds(source), vec![expected]);
}

#[test]
fn float_is_not_split_into_ints() {
    let tokens = tokenize("1.5 2").unwrap();
    assert_eq!(tokens.texts(), vec!["1.5", "2"]);
}

#[test]
fn comments_never_reach_the_parser_stream() {
    let tokens = tokenize("a / b // half\n/* gone\n   too */ c").unwrap();
    assert_eq!(tokens.texts(), vec!["a", "/", "b", "c"]);
}

#[test]
fn positions_follow_rows_and_indentation() {
    let tokens = tokenize("alc x:int;\n\tif y;").unwrap();
    let if_token = &tokens[5];
    assert_eq!(if_token.text, "if");
    assert_eq!(
        (if_token.row, if_token.col, if_token.indent, if_token.index),
        (2, 1, 1, 12)
    );

    let y = &tokens[6];
    assert_eq!((y.row, y.col, y.indent), (2, 4, 1));
}

#[test]
fn spaces_count_as_indentation_columns() {
    let tokens = tokenize("if 1;\n    x;").unwrap();
    assert_eq!(tokens[3].text, "x");
    assert_eq!(tokens[3].indent, 4);
}

#[test]
fn crlf_is_one_line_break() {
    let tokens = tokenize_raw("a\r\nb").unwrap();
    assert_eq!(tokens.texts(), vec!["a", "\r\n", "b"]);
    assert_eq!(tokens[2].row, 2);
}

#[test]
fn lex_failure_reports_the_exact_position() {
    let source = fs::read_to_string("tests/fixtures/invalid_char.cclr").unwrap();
    let err = tokenize(&source).unwrap_err();
    assert_eq!(err.token.kind, TokenKind::Error);
    assert_eq!((err.token.row, err.token.col), (2, 12));
    assert!(err.token.text.starts_with('§'));
}

#[test]
fn lex_failure_renders_source_context() {
    let source = "alc x:int;\nalc y:int = §;\n";
    let rendered = tokenize(source).unwrap_err().render("invalid.cclr", source);
    assert!(rendered.contains(">>   2 | alc y:int = §;"));
    assert!(rendered.ends_with("[Error in invalid.cclr on line 2 col 12 - invalid token '§;']"));
}

#[test]
fn unicode_whitespace_error_stays_on_its_line() {
    let source = "alc x:int;\u{a0}\nalc y:int;\nalc z:int;\n";
    let err = tokenize(source).unwrap_err();
    assert_eq!(err.token.text, "\u{a0}");
    assert_eq!((err.token.row, err.token.col), (1, 10));
    assert!(!err.message().contains('\n'));
}
