use std::path::PathBuf;

use clap::Parser;

/// PL/0 static checker
///
/// Parses a PL/0 program and validates it: types first, then scoping.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pl0check")]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Input PL/0 source file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write reports to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the syntax tree
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Print the symbol table after semantic analysis
    #[arg(short, long, default_value_t = false)]
    pub symbols: bool,

    /// Report each phase as it runs
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Skip type checking
    #[arg(long, default_value_t = false)]
    pub no_types: bool,

    /// Skip semantic analysis
    #[arg(long, default_value_t = false)]
    pub no_semantics: bool,
}
