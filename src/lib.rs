pub mod ast;
pub mod classify;
pub mod error;
pub mod eval;
pub mod expression;
pub mod interpreter;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod source;
pub mod state;
pub mod token;
pub mod value;

pub use error::{Error, ExpressionError, ParseError, RuntimeError};
pub use interpreter::{Interpreter, OutputSink, WriterSink};
pub use state::ProgramState;
pub use value::Value;

/// Filters, parses and runs `source` in one go, writing `print` output to
/// `output`.
pub fn run_source(source: &str, output: &mut dyn OutputSink) -> Result<ProgramState, Error> {
    let program = parser::parse_source(source)?;
    Ok(program.run(output)?)
}
