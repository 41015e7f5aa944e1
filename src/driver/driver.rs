use std::{
    io::{self, Write},
    rc::Rc,
};

use crate::{
    ast::{ast::Node, printer::print_tree},
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    semantic::analyzer::analyze_semantics,
    type_checker::type_checker::type_check,
};

use super::options::Options;

/// Phase 1. Writes `Type Error: <message>` to `err` on failure.
pub fn run_type_checking(
    tree: &Node,
    options: &Options,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<bool> {
    if options.verbose {
        writeln!(out, "Phase 1: Type Checking")?;
    }

    let (_, result) = type_check(tree);
    if let Err(error) = result {
        writeln!(err, "Type Error: {}", error)?;
        return Ok(false);
    }

    if options.verbose {
        writeln!(out, "Type checking completed successfully")?;
    }
    Ok(true)
}

/// Phase 2. Writes `Semantic Error: <message>` to `err` on failure; the symbol
/// table is dumped when requested whatever the outcome.
pub fn run_semantic_analysis(
    tree: &Node,
    options: &Options,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<bool> {
    if options.verbose {
        writeln!(out, "Phase 2: Semantic Analysis")?;
    }

    let (analyzer, result) = analyze_semantics(tree);
    let passed = match result {
        Ok(()) => {
            if options.verbose {
                writeln!(out, "Semantic analysis completed successfully")?;
            }
            true
        }
        Err(error) => {
            writeln!(err, "Semantic Error: {}", error)?;
            false
        }
    };

    if options.symbols {
        analyzer.get_symbol_table().dump(out)?;
    }

    Ok(passed)
}

/// Lexes, parses and checks `source`, stopping at the first failing phase.
///
/// Returns `Ok(false)` when the program is rejected; `Err` only for failures
/// writing to the sinks.
pub fn run(
    source: &str,
    file_name: &str,
    options: &Options,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<bool> {
    let tokens = match tokenize(source.to_string(), Some(file_name.to_string())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, source, file_name, err)?;
            return Ok(false);
        }
    };
    log::debug!("tokenized {} tokens", tokens.len());

    let tree = match parse(tokens, Rc::new(file_name.to_string())) {
        Ok(tree) => tree,
        Err(error) => {
            display_error(&error, source, file_name, err)?;
            return Ok(false);
        }
    };

    if options.debug {
        writeln!(out, "Abstract Syntax Tree:")?;
        print_tree(&tree, out)?;
        writeln!(out)?;
    }

    if !options.no_types && !run_type_checking(&tree, options, out, err)? {
        return Ok(false);
    }

    if !options.no_semantics && !run_semantic_analysis(&tree, options, out, err)? {
        return Ok(false);
    }

    Ok(true)
}
