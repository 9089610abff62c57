//! # cclear
//!
//! Front end for the CClear scripting language: a lexer, an indentation-aware
//! recursive-descent parser and a C++ generator.
//!
//! ## Testing
//!
//! Parser tests should describe the expected tree through the fluent assertions in the
//! [testing module](cclear::testing) rather than walking nodes by hand.

pub mod cclear;
