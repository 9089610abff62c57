//! Detokenizer for CClear token streams
//!
//! Converts a stream of tokens back into text. The output is the whitespace-normalized
//! form of the source: token texts joined by single spaces. Re-tokenizing it yields the
//! same token texts and kinds as the original stream.
use crate::cclear::token::TokenStream;

/// Joins the token texts of a stream with single spaces
pub fn detokenize(tokens: &TokenStream) -> String {
    tokens.texts().join(" ")
}
