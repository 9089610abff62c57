//! Output formats for intermediate stages
//!
//! Token streams and syntax trees can be dumped for inspection. JSON output goes through
//! serde; the simple token format and treeviz are hand-rendered.

pub mod treeviz;

use crate::cclear::ast::Script;
use crate::cclear::token::{TokenKind, TokenStream};

pub use treeviz::{to_treeviz_str, to_treeviz_str_with_linum};

/// One line per source row, each token as `Kind(text)`
pub fn tokens_to_simple(tokens: &TokenStream) -> String {
    let mut result = String::new();
    let mut row = None;

    for token in tokens {
        if token.kind == TokenKind::Newline {
            if row.is_some() {
                result.push(' ');
            }
            result.push_str("Newline\n");
            row = None;
            continue;
        }
        match row {
            Some(current) if current == token.row => result.push(' '),
            Some(_) => result.push('\n'),
            None => {}
        }
        row = Some(token.row);
        result.push_str(&format!("{}({:?})", token.kind, token.text));
    }

    if row.is_some() {
        result.push('\n');
    }
    result
}

pub fn tokens_to_json(tokens: &TokenStream) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tokens)
}

pub fn script_to_json(script: &Script) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cclear::lexing::{tokenize, tokenize_raw};

    #[test]
    fn test_simple_tokens_break_on_rows() {
        let tokens = tokenize("alc x:int;\ny;").unwrap();
        assert_eq!(
            tokens_to_simple(&tokens),
            "Keyword(\"alc\") VarName(\"x\") Symbol(\":\") VarName(\"int\") Symbol(\";\")\nVarName(\"y\") Symbol(\";\")\n"
        );
    }

    #[test]
    fn test_simple_raw_tokens_show_trivia() {
        let tokens = tokenize_raw("\tx\n").unwrap();
        assert_eq!(
            tokens_to_simple(&tokens),
            "Indent(\"\\t\") VarName(\"x\") Newline\n"
        );
    }

    #[test]
    fn test_json_tokens() {
        let tokens = tokenize("5").unwrap();
        let json: serde_json::Value = serde_json::from_str(&tokens_to_json(&tokens).unwrap()).unwrap();
        assert_eq!(json[0]["kind"], "Int");
        assert_eq!(json[0]["text"], "5");
        assert_eq!(json[0]["row"], 1);
    }
}
