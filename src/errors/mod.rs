//! Error types and error handling for the checker.
//!
//! This module defines the single diagnostic type shared by every phase:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing, type checking and scoping
//! - Categorisation used when reporting (`Type Error: ...`, `Semantic Error: ...`)
//! - Helpful error messages and suggestions

pub mod errors;
