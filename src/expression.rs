use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::error::ExpressionError;
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

/// Deepest expression the parser accepts, both in tree height and in nesting
/// of parentheses and prefix operators. Evaluation and drop recurse over the
/// tree.
pub const MAX_EXPRESSION_DEPTH: usize = 200;

/// A parsed subexpression and the height of its tree (a leaf is 1).
struct Node {
    expr: Expression,
    height: usize,
}

impl Node {
    fn leaf(expr: Expression) -> Self {
        Self { expr, height: 1 }
    }
}

/// Recursive-descent parser over the tokens of one expression substring.
pub struct ExpressionParser<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
    nesting: usize,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            position: 0,
            nesting: 0,
        }
    }

    pub fn parse(mut self) -> Result<Expression, ExpressionError> {
        if matches!(self.current(), TokenKind::EOF) {
            return Err(ExpressionError::Empty);
        }
        let node = self.parse_or()?;
        if !matches!(self.current(), TokenKind::EOF) {
            return Err(self.error("end of expression"));
        }
        Ok(node.expr)
    }

    fn parse_or(&mut self) -> Result<Node, ExpressionError> {
        let mut node = self.parse_and()?;
        while matches!(self.current(), TokenKind::Or) {
            self.advance();
            let right = self.parse_and()?;
            node = binary(node, BinaryOperator::Or, right)?;
        }
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<Node, ExpressionError> {
        let mut node = self.parse_not()?;
        while matches!(self.current(), TokenKind::And) {
            self.advance();
            let right = self.parse_not()?;
            node = binary(node, BinaryOperator::And, right)?;
        }
        Ok(node)
    }

    fn parse_not(&mut self) -> Result<Node, ExpressionError> {
        if matches!(self.current(), TokenKind::Not) {
            self.advance();
            self.enter()?;
            let operand = self.parse_not()?;
            self.leave();
            return unary(UnaryOperator::Not, operand);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Node, ExpressionError> {
        let left = self.parse_additive()?;
        let Some(op) = comparison_operator(self.current()) else {
            return Ok(left);
        };
        self.advance();
        let right = self.parse_additive()?;
        if let Some(next) = comparison_operator(self.current()) {
            return Err(ExpressionError::ChainedComparison {
                operator: next.symbol().to_string(),
            });
        }
        binary(left, op, right)
    }

    fn parse_additive(&mut self) -> Result<Node, ExpressionError> {
        let mut node = self.parse_term()?;
        loop {
            let op = match self.current() {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            node = binary(node, op, right)?;
        }
        Ok(node)
    }

    fn parse_term(&mut self) -> Result<Node, ExpressionError> {
        let mut node = self.parse_unary()?;
        loop {
            let op = match self.current() {
                TokenKind::Star => BinaryOperator::Mul,
                TokenKind::Slash => BinaryOperator::Div,
                TokenKind::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            node = binary(node, op, right)?;
        }
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Node, ExpressionError> {
        if matches!(self.current(), TokenKind::Minus) {
            self.advance();
            self.enter()?;
            let operand = self.parse_unary()?;
            self.leave();
            return unary(UnaryOperator::Neg, operand);
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Node, ExpressionError> {
        let current = *self.current();
        let expr = match current {
            TokenKind::Integer(value) => Expression::Integer(value),
            TokenKind::String(value) => Expression::String(value.to_string()),
            TokenKind::True => Expression::Boolean(true),
            TokenKind::False => Expression::Boolean(false),
            TokenKind::Identifier(name) => Expression::Identifier(name.to_string()),
            TokenKind::LParen => {
                self.advance();
                self.enter()?;
                let node = self.parse_or()?;
                self.leave();
                self.expect_rparen()?;
                return Ok(node);
            }
            _ => return Err(self.error("expression")),
        };
        self.advance();
        Ok(Node::leaf(expr))
    }

    fn expect_rparen(&mut self) -> Result<(), ExpressionError> {
        if matches!(self.current(), TokenKind::RParen) {
            self.advance();
            Ok(())
        } else {
            Err(self.error("')'"))
        }
    }

    /// Opens one level of parentheses or prefix operators.
    fn enter(&mut self) -> Result<(), ExpressionError> {
        self.nesting += 1;
        if self.nesting > MAX_EXPRESSION_DEPTH {
            return Err(too_deep());
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn current(&self) -> &TokenKind<'a> {
        self.tokens
            .get(self.position)
            .map(Token::kind)
            .unwrap_or(&TokenKind::EOF)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn error(&self, expected: &str) -> ExpressionError {
        ExpressionError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current().describe(),
        }
    }
}

fn too_deep() -> ExpressionError {
    ExpressionError::TooDeep {
        limit: MAX_EXPRESSION_DEPTH,
    }
}

fn parent(expr: Expression, child_height: usize) -> Result<Node, ExpressionError> {
    let height = child_height + 1;
    if height > MAX_EXPRESSION_DEPTH {
        return Err(too_deep());
    }
    Ok(Node { expr, height })
}

fn unary(op: UnaryOperator, operand: Node) -> Result<Node, ExpressionError> {
    parent(
        Expression::Unary {
            op,
            operand: Box::new(operand.expr),
        },
        operand.height,
    )
}

fn binary(left: Node, op: BinaryOperator, right: Node) -> Result<Node, ExpressionError> {
    let child_height = left.height.max(right.height);
    parent(
        Expression::BinaryOp {
            left: Box::new(left.expr),
            op,
            right: Box::new(right.expr),
        },
        child_height,
    )
}

fn comparison_operator(kind: &TokenKind<'_>) -> Option<BinaryOperator> {
    match kind {
        // A lone `=` compares, the same as `==`.
        TokenKind::Equal | TokenKind::EqualEqual => Some(BinaryOperator::Eq),
        TokenKind::NotEqual => Some(BinaryOperator::NotEq),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEq),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEq),
        _ => None,
    }
}

/// Parses an expression substring into an evaluable tree.
pub fn parse_expression(input: &str) -> Result<Expression, ExpressionError> {
    ExpressionParser::new(tokenize(input)?).parse()
}
