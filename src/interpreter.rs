use std::io::Write;

use tracing::{debug, instrument, trace};

use crate::ast::{Program, Statement};
use crate::error::{ParseError, RuntimeError};
use crate::eval::evaluate;
use crate::parser::parse_source;
use crate::state::ProgramState;

/// Destination for lines written by `print`.
pub trait OutputSink {
    fn emit(&mut self, line: &str) -> Result<(), RuntimeError>;
}

impl OutputSink for Vec<String> {
    fn emit(&mut self, line: &str) -> Result<(), RuntimeError> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Streams each line to an `io::Write`, e.g. stdout.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn emit(&mut self, line: &str) -> Result<(), RuntimeError> {
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|error| RuntimeError::Output {
                message: error.to_string(),
            })
    }
}

impl Statement {
    pub fn run(
        &self,
        state: &mut ProgramState,
        output: &mut dyn OutputSink,
    ) -> Result<(), RuntimeError> {
        match self {
            Statement::Assign { name, value } => {
                let value = evaluate(value, state)?;
                trace!(%name, %value, "assign");
                state.set(name.as_str(), value);
                Ok(())
            }
            Statement::Print(expr) => {
                let value = evaluate(expr, state)?;
                trace!(%value, "print");
                output.emit(&value.to_string())
            }
            Statement::If { condition, body } => {
                let taken = evaluate(condition, state)?.is_truthy();
                trace!(%condition, taken, "if");
                if taken {
                    run_block(body, state, output)?;
                }
                Ok(())
            }
        }
    }
}

/// Runs `body` in order against one shared state, stopping at the first error.
pub fn run_block(
    body: &[Statement],
    state: &mut ProgramState,
    output: &mut dyn OutputSink,
) -> Result<(), RuntimeError> {
    for statement in body {
        statement.run(state, output)?;
    }
    Ok(())
}

impl Program {
    /// Runs the program once against a fresh state and returns the final
    /// bindings. Lines already emitted stay emitted if a later statement fails.
    pub fn run(&self, output: &mut dyn OutputSink) -> Result<ProgramState, RuntimeError> {
        let mut state = ProgramState::new();
        self.run_with_state(&mut state, output)?;
        Ok(state)
    }

    pub fn run_with_state(
        &self,
        state: &mut ProgramState,
        output: &mut dyn OutputSink,
    ) -> Result<(), RuntimeError> {
        run_block(&self.statements, state, output)
    }
}

/// A program parsed once from source and runnable any number of times.
#[derive(Debug, Clone)]
pub struct Interpreter {
    program: Program,
}

impl Interpreter {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Ok(Self {
            program: parse_source(source)?,
        })
    }

    pub fn from_program(program: Program) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    #[instrument(level = "debug", skip_all, fields(statements = self.program.statements.len()))]
    pub fn run_program(&self, output: &mut dyn OutputSink) -> Result<ProgramState, RuntimeError> {
        let state = self.program.run(output)?;
        debug!(variables = state.len(), "run complete");
        Ok(state)
    }

    /// Runs the program and returns its output joined by newlines.
    pub fn run_to_string(&self) -> Result<String, RuntimeError> {
        let mut output: Vec<String> = Vec::new();
        self.run_program(&mut output)?;
        Ok(output.join("\n"))
    }
}
