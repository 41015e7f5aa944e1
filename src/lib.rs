#![allow(clippy::module_inception)]

use std::{io::Write, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod driver;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantic;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Finds the line containing `position`, returning its 1-based number, its text
/// and the column of `position` within it.
///
/// Offsets past the end of the source resolve to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    let last = source.rsplit('\n').next().unwrap_or("");
    (line_number.saturating_sub(1).max(1), last.to_string(), last.len())
}

pub fn display_error(
    error: &Error,
    source: &str,
    file: &str,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    /*
        Semantic Error: message
        -> final.pl0
           |
        20 | x := y
           | -----^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    writeln!(out, "{} Error: {}", error.get_category(), error)?;
    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        writeln!(out, "  ({})", tip)?;
    }
    writeln!(out, "-> {}", file)?;
    writeln!(out, "{:>padding$}", "|")?;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    writeln!(out, "{} | {}", line_string, line_text_removed.trim_end())?;

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    writeln!(out, "{:>padding$} {:->arrows$}", "|", "^")
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
