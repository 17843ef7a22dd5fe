use tracing::{debug, instrument, trace};

use crate::ast::{Expression, Program, Statement};
use crate::classify::{LineKind, classify};
use crate::error::ParseError;
use crate::expression::parse_expression;
use crate::source::{LineQueue, SourceLine, code_lines};

/// Parses one statement from the front of `lines`. A block header consumes
/// its whole body as well.
pub fn parse_statement(lines: &mut LineQueue, depth: usize) -> Result<Statement, ParseError> {
    let line = lines.pop_front().ok_or(ParseError::UnexpectedEnd)?;
    if line.depth != depth {
        return Err(ParseError::Indentation {
            line: line.number,
            text: line.trimmed().to_string(),
            expected: depth.to_string(),
            found: line.depth,
        });
    }

    match classify(&line)? {
        LineKind::If { condition } => {
            let body = parse_body(lines, &line)?;
            let condition = expression_at(&line, condition)?;
            Ok(Statement::If { condition, body })
        }
        LineKind::Print { expression } => {
            Ok(Statement::Print(expression_at(&line, expression)?))
        }
        LineKind::Assign { name, expression } => Ok(Statement::Assign {
            name: name.to_string(),
            value: expression_at(&line, expression)?,
        }),
    }
}

/// Parses the body of the block opened by `header`.
///
/// The first body line fixes the body depth, which must exceed the header's.
/// The body ends at the first line indented no deeper than the header, or at
/// end of input; that line is left in the queue for the enclosing scope.
pub fn parse_body(lines: &mut LineQueue, header: &SourceLine) -> Result<Vec<Statement>, ParseError> {
    let Some(first) = lines.front() else {
        return Err(ParseError::EmptyBody {
            line: header.number,
            text: header.trimmed().to_string(),
        });
    };
    let body_depth = first.depth;
    if body_depth <= header.depth {
        return Err(ParseError::Indentation {
            line: first.number,
            text: first.trimmed().to_string(),
            expected: format!("more than {}", header.depth),
            found: body_depth,
        });
    }
    trace!(header = header.number, body_depth, "entering block");

    let mut body = Vec::new();
    while let Some(next) = lines.front() {
        if next.depth <= header.depth {
            break;
        }
        if next.depth != body_depth {
            return Err(ParseError::Indentation {
                line: next.number,
                text: next.trimmed().to_string(),
                expected: body_depth.to_string(),
                found: next.depth,
            });
        }
        body.push(parse_statement(lines, body_depth)?);
    }

    trace!(header = header.number, statements = body.len(), "leaving block");
    Ok(body)
}

fn expression_at(line: &SourceLine, text: &str) -> Result<Expression, ParseError> {
    parse_expression(text).map_err(|error| ParseError::Expression {
        line: line.number,
        error,
    })
}

/// Parses every remaining line as top-level statements at depth 0.
#[instrument(level = "debug", skip_all, fields(lines = lines.len()))]
pub fn parse_program(mut lines: LineQueue) -> Result<Program, ParseError> {
    let mut statements = Vec::new();
    while !lines.is_empty() {
        statements.push(parse_statement(&mut lines, 0)?);
    }
    debug!(statements = statements.len(), "parsed program");
    Ok(Program { statements })
}

/// Filters blank and comment lines out of `source`, then parses the rest.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    parse_program(code_lines(source))
}
