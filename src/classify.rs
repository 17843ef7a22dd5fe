use crate::error::ParseError;
use crate::source::SourceLine;

const KEYWORDS: [&str; 7] = ["if", "and", "or", "not", "True", "False", "print"];

/// Statement form of a single trimmed code line, with the substrings each
/// form captures. Nothing here is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `if <condition>:`
    If { condition: &'a str },
    /// `print(<expression>)`
    Print { expression: &'a str },
    /// `<name> = <expression>`
    Assign { name: &'a str, expression: &'a str },
}

/// Matches a line against the statement forms, conditional header first,
/// then output, then assignment.
pub fn classify(line: &SourceLine) -> Result<LineKind<'_>, ParseError> {
    let text = line.trimmed();
    if let Some(condition) = match_if(text) {
        return Ok(LineKind::If { condition });
    }
    if let Some(expression) = match_print(text) {
        return Ok(LineKind::Print { expression });
    }
    if let Some((name, expression)) = match_assign(text) {
        return Ok(LineKind::Assign { name, expression });
    }
    Err(ParseError::Syntax {
        line: line.number,
        text: text.to_string(),
    })
}

fn match_if(text: &str) -> Option<&str> {
    let inner = text.strip_prefix("if ")?.strip_suffix(':')?;
    (!inner.is_empty()).then(|| inner.trim())
}

fn match_print(text: &str) -> Option<&str> {
    let inner = text.strip_prefix("print(")?.strip_suffix(')')?;
    (!inner.is_empty()).then(|| inner.trim())
}

fn match_assign(text: &str) -> Option<(&str, &str)> {
    let (name, expression) = text.split_once(" = ")?;
    let name = name.trim();
    if !is_identifier(name) || expression.is_empty() {
        return None;
    }
    Some((name, expression.trim()))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !KEYWORDS.contains(&name)
}
