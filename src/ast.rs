use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Integer(i64),
    Boolean(bool),
    String(String),
    Identifier(String),
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOperator {
    Neg,
    Not,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEq => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEq => ">=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Neg => "-",
            UnaryOperator::Not => "not",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(value) => write!(f, "{value}"),
            Expression::Boolean(true) => write!(f, "True"),
            Expression::Boolean(false) => write!(f, "False"),
            Expression::String(value) => write!(f, "\"{value}\""),
            Expression::Identifier(name) => write!(f, "{name}"),
            Expression::Unary {
                op: UnaryOperator::Neg,
                operand,
            } => write!(f, "(-{operand})"),
            Expression::Unary {
                op: UnaryOperator::Not,
                operand,
            } => write!(f, "(not {operand})"),
            Expression::BinaryOp { left, op, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
        }
    }
}

/// One node of the statement tree. Every field is resolved at parse time.
#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Assign {
        name: String,
        value: Expression,
    },
    Print(Expression),
    If {
        condition: Expression,
        body: Vec<Statement>,
    },
}

impl Statement {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            Statement::Assign { name, value } => writeln!(f, "{pad}assign {name} = {value}"),
            Statement::Print(expr) => writeln!(f, "{pad}print {expr}"),
            Statement::If { condition, body } => {
                writeln!(f, "{pad}if {condition}")?;
                for statement in body {
                    statement.write_tree(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Top-level statements in source order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            statement.write_tree(f, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn renders_statement_tree() {
        let program = Program {
            statements: vec![
                Statement::Assign {
                    name: "x".to_string(),
                    value: Expression::Unary {
                        op: UnaryOperator::Neg,
                        operand: Box::new(Expression::Integer(1)),
                    },
                },
                Statement::If {
                    condition: Expression::BinaryOp {
                        left: Box::new(Expression::Identifier("x".to_string())),
                        op: BinaryOperator::Less,
                        right: Box::new(Expression::Integer(0)),
                    },
                    body: vec![Statement::Print(Expression::String("neg".to_string()))],
                },
            ],
        };

        assert_eq!(
            program.to_string(),
            indoc! {r#"
                assign x = (-1)
                if (x < 0)
                  print "neg"
            "#}
        );
    }
}
