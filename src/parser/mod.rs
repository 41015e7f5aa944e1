//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into the tree consumed by the analysis passes. It uses precedence
//! climbing for expressions and handles:
//!
//! - Block parsing (CONST, VAR and PROCEDURE sections followed by a statement)
//! - Statement parsing (assignment, CALL, READ, WRITE, BEGIN/END, IF, WHILE)
//! - Expression and condition parsing
//! - Error reporting (no recovery; the first error ends the parse)
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
