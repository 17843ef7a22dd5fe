use std::path::PathBuf;

use crate::cli::Args;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run,
    Check,
}

pub struct Config {
    pub source: ProgramSource,
    pub mode: Mode,
    pub dump_tree: bool,
    pub verbosity: u8,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        let source = match &args.program {
            Some(path) if path.as_os_str() != "-" => ProgramSource::File(path.clone()),
            _ => ProgramSource::Stdin,
        };
        let mode = if args.check { Mode::Check } else { Mode::Run };

        Config {
            source,
            mode,
            dump_tree: args.dump_tree,
            verbosity: args.verbose,
        }
    }
}
