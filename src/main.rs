use std::{
    fs::{read_to_string, File},
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use clap::Parser;
use pl0check::driver::{driver::run, options::Options};

fn main() -> ExitCode {
    let options = Options::parse();

    let default_filter = if options.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let source = match read_to_string(&options.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: could not read '{}': {}", options.input.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let file_name = options
        .input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| options.input.display().to_string());

    let mut out: Box<dyn Write> = match &options.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(error) => {
                eprintln!("Error: could not create '{}': {}", path.display(), error);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdout().lock()),
    };
    let mut err = io::stderr().lock();

    let result = run(&source, &file_name, &options, &mut out, &mut err).and_then(|passed| {
        out.flush()?;
        Ok(passed)
    });

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            log::error!("failed to write report: {}", error);
            ExitCode::FAILURE
        }
    }
}
