use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pyline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Line-oriented, indentation-delimited script interpreter", long_about = None)]
pub struct Args {
    /// Program file; reads stdin when absent or `-`.
    #[arg(value_name = "PROGRAM")]
    pub program: Option<PathBuf>,

    /// Parse the program and report success without running it.
    #[arg(long = "check")]
    pub check: bool,

    /// Print the parsed statement tree to stderr before running, and the
    /// final variable bindings after a successful run.
    #[arg(long = "dump-tree")]
    pub dump_tree: bool,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
