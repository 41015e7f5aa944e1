//! Runs the checking phases in order and reports their outcome.

pub mod driver;
pub mod options;
