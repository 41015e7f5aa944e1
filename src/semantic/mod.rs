//! Semantic (scope) analysis module.
//!
//! This pass builds the scope chain while descending through blocks and
//! verifies that:
//!
//! - Every name is declared before it is used
//! - No name is declared twice in the same scope (shadowing an outer name is fine)
//! - Assignment, CALL and READ targets are of the right kind
//!
//! Each procedure body gets its own scope, visible to that body and the
//! procedures nested in it but not to its siblings or callers.

pub mod analyzer;
pub mod symbol_table;

#[cfg(test)]
mod tests;
