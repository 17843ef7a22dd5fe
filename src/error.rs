use thiserror::Error;

/// Failures while turning an expression substring into an `Expression`, or
/// while applying an operator to the values it produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Unexpected character '{ch}' at column {column}")]
    UnexpectedCharacter { ch: char, column: usize },
    #[error("Unterminated string literal at column {column}")]
    UnterminatedString { column: usize },
    #[error("Invalid integer literal '{literal}'")]
    InvalidInteger { literal: String },
    #[error("Expected {expected}, got {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("Empty expression")]
    Empty,
    #[error("Expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },
    #[error("Chained comparison with '{operator}' is not supported")]
    ChainedComparison { operator: String },
    #[error("Operator '{operator}' is not supported between {left} and {right}")]
    IncompatibleOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("Operator '{operator}' is not supported for {operand}")]
    IncompatibleOperand { operator: String, operand: String },
    #[error("Division by zero in '{operator}'")]
    DivisionByZero { operator: String },
    #[error("Integer overflow in '{operator}'")]
    Overflow { operator: String },
}

/// Typed errors produced while building the statement tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unrecognized statement at line {line}: {text}")]
    Syntax { line: usize, text: String },
    #[error(
        "Line with unexpected indentation at line {line} (expected {expected}, found {found}): {text}"
    )]
    Indentation {
        line: usize,
        text: String,
        expected: String,
        found: usize,
    },
    #[error("Block statement at line {line} has an empty body: {text}")]
    EmptyBody { line: usize, text: String },
    #[error("Invalid expression at line {line}: {error}")]
    Expression { line: usize, error: ExpressionError },
    #[error("Unexpected end of input")]
    UnexpectedEnd,
}

/// Typed errors produced while running a statement tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    #[error("Failed to write output: {message}")]
    Output { message: String },
}

/// Any failure of a full filter, parse and run pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
