use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::error::{ExpressionError, RuntimeError};
use crate::state::ProgramState;
use crate::value::Value;

/// Evaluates `expr` against `state`. Never mutates the state.
pub fn evaluate(expr: &Expression, state: &ProgramState) -> Result<Value, RuntimeError> {
    match expr {
        Expression::Integer(value) => Ok(Value::Integer(*value)),
        Expression::Boolean(value) => Ok(Value::Boolean(*value)),
        Expression::String(value) => Ok(Value::String(value.clone())),
        Expression::Identifier(name) => {
            state
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UndefinedVariable {
                    name: name.to_string(),
                })
        }
        Expression::Unary { op, operand } => {
            let operand = evaluate(operand, state)?;
            Ok(eval_unary(*op, operand)?)
        }
        Expression::BinaryOp { left, op, right } => match op {
            BinaryOperator::And => {
                let left = evaluate(left, state)?;
                if !left.is_truthy() {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(evaluate(right, state)?.is_truthy()))
            }
            BinaryOperator::Or => {
                let left = evaluate(left, state)?;
                if left.is_truthy() {
                    return Ok(Value::Boolean(true));
                }
                Ok(Value::Boolean(evaluate(right, state)?.is_truthy()))
            }
            _ => {
                let left = evaluate(left, state)?;
                let right = evaluate(right, state)?;
                Ok(eval_binary(*op, left, right)?)
            }
        },
    }
}

fn eval_unary(op: UnaryOperator, operand: Value) -> Result<Value, ExpressionError> {
    match op {
        UnaryOperator::Not => Ok(Value::Boolean(!operand.is_truthy())),
        UnaryOperator::Neg => {
            let value = operand
                .as_int()
                .ok_or_else(|| ExpressionError::IncompatibleOperand {
                    operator: op.symbol().to_string(),
                    operand: operand.type_name().to_string(),
                })?;
            value
                .checked_neg()
                .map(Value::Integer)
                .ok_or_else(|| ExpressionError::Overflow {
                    operator: op.symbol().to_string(),
                })
        }
    }
}

fn eval_binary(op: BinaryOperator, left: Value, right: Value) -> Result<Value, ExpressionError> {
    match (op, &left, &right) {
        (BinaryOperator::Eq, _, _) => Ok(Value::Boolean(left == right)),
        (BinaryOperator::NotEq, _, _) => Ok(Value::Boolean(left != right)),
        (BinaryOperator::Add, Value::String(l), Value::String(r)) => {
            Ok(Value::String(format!("{l}{r}")))
        }
        (
            BinaryOperator::Less
            | BinaryOperator::LessEq
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEq,
            Value::String(l),
            Value::String(r),
        ) => Ok(Value::Boolean(compare(op, l.as_str().cmp(r.as_str())))),
        (_, Value::Integer(l), Value::Integer(r)) => eval_integer(op, *l, *r),
        _ => Err(ExpressionError::IncompatibleOperands {
            operator: op.symbol().to_string(),
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        }),
    }
}

fn eval_integer(op: BinaryOperator, left: i64, right: i64) -> Result<Value, ExpressionError> {
    let overflow = || ExpressionError::Overflow {
        operator: op.symbol().to_string(),
    };
    let value = match op {
        BinaryOperator::Add => left.checked_add(right).ok_or_else(overflow)?,
        BinaryOperator::Sub => left.checked_sub(right).ok_or_else(overflow)?,
        BinaryOperator::Mul => left.checked_mul(right).ok_or_else(overflow)?,
        BinaryOperator::Div | BinaryOperator::Mod => {
            if right == 0 {
                return Err(ExpressionError::DivisionByZero {
                    operator: op.symbol().to_string(),
                });
            }
            let (quotient, remainder) = floor_div_mod(left, right).ok_or_else(overflow)?;
            if op == BinaryOperator::Div {
                quotient
            } else {
                remainder
            }
        }
        BinaryOperator::Less
        | BinaryOperator::LessEq
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEq => return Ok(Value::Boolean(compare(op, left.cmp(&right)))),
        BinaryOperator::Eq => return Ok(Value::Boolean(left == right)),
        BinaryOperator::NotEq => return Ok(Value::Boolean(left != right)),
        BinaryOperator::And => return Ok(Value::Boolean(left != 0 && right != 0)),
        BinaryOperator::Or => return Ok(Value::Boolean(left != 0 || right != 0)),
    };
    Ok(Value::Integer(value))
}

/// Quotient rounded toward negative infinity; the remainder takes the sign of
/// the divisor.
fn floor_div_mod(left: i64, right: i64) -> Option<(i64, i64)> {
    let quotient = left.checked_div(right)?;
    let remainder = left.checked_rem(right)?;
    if remainder != 0 && ((remainder < 0) != (right < 0)) {
        Some((quotient - 1, remainder + right))
    } else {
        Some((quotient, remainder))
    }
}

fn compare(op: BinaryOperator, ordering: std::cmp::Ordering) -> bool {
    match op {
        BinaryOperator::Less => ordering.is_lt(),
        BinaryOperator::LessEq => ordering.is_le(),
        BinaryOperator::Greater => ordering.is_gt(),
        BinaryOperator::GreaterEq => ordering.is_ge(),
        _ => false,
    }
}
