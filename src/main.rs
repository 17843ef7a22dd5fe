use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pyline::parser::parse_source;
use pyline::{Interpreter, WriterSink, logging};

mod cli;
mod config;

use cli::Args;
use config::{Config, Mode, ProgramSource};

fn read_source(source: &ProgramSource) -> Result<String> {
    match source {
        ProgramSource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))
        }
        ProgramSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Reading stdin")?;
            Ok(buffer)
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let source = read_source(&config.source)?;
    let interpreter = Interpreter::from_program(parse_source(&source)?);
    info!(
        statements = interpreter.program().statements.len(),
        "program parsed"
    );

    if config.dump_tree {
        eprint!("{}", interpreter.program());
    }
    if config.mode == Mode::Check {
        println!("ok");
        return Ok(());
    }

    let mut output = WriterSink::new(io::stdout().lock());
    let state = interpreter.run_program(&mut output)?;
    if config.dump_tree {
        for (name, value) in state.iter() {
            eprintln!("{name} = {value}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::from_args(&args);
    logging::init_tracing(config.verbosity);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
