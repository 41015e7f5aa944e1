//! Type checking module.
//!
//! This pass walks the whole tree independently of scoping and verifies that
//! operand and result types are consistent:
//!
//! - Arithmetic operands and results are integers
//! - Conditions (ODD and the relational operators) take integers and yield booleans
//! - Assignments and WRITE take integer expressions
//! - IF and WHILE require a boolean condition
//! - Constants are initialized with a number literal
//!
//! The first violation ends the pass.

pub mod type_checker;
pub mod types;
