//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts PL/0 source
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords (case-insensitive), identifiers, numbers and operators
//! - Token position tracking for error reporting
//! - Whitespace handling

pub mod lexer;
pub mod tokens;
