use std::{iter::Peekable, str::CharIndices};

use crate::error::ExpressionError;
use crate::token::{Span, Token, TokenKind};

/// Scanner over a single expression substring.
///
/// Statements are recognised a whole line at a time; this only splits the
/// expression text embedded in a statement.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    eof_reached: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            eof_reached: false,
        }
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, ExpressionError> {
        self.skip_whitespace();

        let Some(&(start, ch)) = self.chars.peek() else {
            self.eof_reached = true;
            let end = self.input.len();
            return Ok(Token::new(TokenKind::EOF, Span { start: end, end }));
        };

        match ch {
            '+' => Ok(self.single(TokenKind::Plus, start)),
            '-' => Ok(self.single(TokenKind::Minus, start)),
            '*' => Ok(self.single(TokenKind::Star, start)),
            '/' => Ok(self.single(TokenKind::Slash, start)),
            '%' => Ok(self.single(TokenKind::Percent, start)),
            '(' => Ok(self.single(TokenKind::LParen, start)),
            ')' => Ok(self.single(TokenKind::RParen, start)),
            '=' => Ok(self.with_optional_equal(
                TokenKind::Equal,
                TokenKind::EqualEqual,
                start,
            )),
            '<' => Ok(self.with_optional_equal(TokenKind::Less, TokenKind::LessEqual, start)),
            '>' => Ok(self.with_optional_equal(
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                start,
            )),
            '!' => {
                self.chars.next();
                if matches!(self.chars.peek(), Some(&(_, '='))) {
                    self.chars.next();
                    Ok(Token::new(
                        TokenKind::NotEqual,
                        Span {
                            start,
                            end: start + 2,
                        },
                    ))
                } else {
                    Err(ExpressionError::UnexpectedCharacter {
                        ch,
                        column: self.column(start),
                    })
                }
            }
            '"' => self.read_string(start),
            c if c.is_alphabetic() || c == '_' => Ok(self.read_identifier(start)),
            c if c.is_ascii_digit() => self.read_integer(start),
            _ => Err(ExpressionError::UnexpectedCharacter {
                ch,
                column: self.column(start),
            }),
        }
    }

    fn single(&mut self, kind: TokenKind<'a>, start: usize) -> Token<'a> {
        self.chars.next();
        Token::new(
            kind,
            Span {
                start,
                end: start + 1,
            },
        )
    }

    fn with_optional_equal(
        &mut self,
        bare: TokenKind<'a>,
        with_equal: TokenKind<'a>,
        start: usize,
    ) -> Token<'a> {
        self.chars.next();
        if matches!(self.chars.peek(), Some(&(_, '='))) {
            self.chars.next();
            Token::new(
                with_equal,
                Span {
                    start,
                    end: start + 2,
                },
            )
        } else {
            Token::new(
                bare,
                Span {
                    start,
                    end: start + 1,
                },
            )
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self, start: usize) -> Token<'a> {
        self.chars.next(); // Consume first char
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.chars.next();
            } else {
                break;
            }
        }

        let end = self.current_index();
        let ident = &self.input[start..end];
        let kind = match ident {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            _ => TokenKind::Identifier(ident),
        };
        Token::new(kind, Span { start, end })
    }

    fn read_integer(&mut self, start: usize) -> Result<Token<'a>, ExpressionError> {
        self.chars.next(); // Consume first digit
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.chars.next();
            } else {
                break;
            }
        }

        let end = self.current_index();
        let literal = &self.input[start..end];
        let value = literal
            .parse::<i64>()
            .map_err(|_| ExpressionError::InvalidInteger {
                literal: literal.to_string(),
            })?;
        Ok(Token::new(TokenKind::Integer(value), Span { start, end }))
    }

    fn read_string(&mut self, start: usize) -> Result<Token<'a>, ExpressionError> {
        self.chars.next(); // Consume opening quote
        let content_start = start + 1;
        while let Some((index, c)) = self.chars.next() {
            if c == '"' {
                return Ok(Token::new(
                    TokenKind::String(&self.input[content_start..index]),
                    Span {
                        start,
                        end: index + 1,
                    },
                ));
            }
        }
        Err(ExpressionError::UnterminatedString {
            column: self.column(start),
        })
    }

    fn current_index(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(index, _)| *index)
            .unwrap_or(self.input.len())
    }

    /// 1-based character column of a byte offset.
    fn column(&self, offset: usize) -> usize {
        self.input[..offset].chars().count() + 1
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, ExpressionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_reached {
            return None;
        }
        Some(self.next_token())
    }
}

/// Splits an expression into tokens, always ending with `EOF`.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ExpressionError> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind<'_>> {
        tokenize(input)
            .expect("tokenize should succeed")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn tokenizes_condition() {
        assert_eq!(
            kinds("x >= 10 and not done"),
            vec![
                TokenKind::Identifier("x"),
                TokenKind::GreaterEqual,
                TokenKind::Integer(10),
                TokenKind::And,
                TokenKind::Not,
                TokenKind::Identifier("done"),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn keeps_single_and_double_equal_apart() {
        assert_eq!(
            kinds("x = 1"),
            vec![
                TokenKind::Identifier("x"),
                TokenKind::Equal,
                TokenKind::Integer(1),
                TokenKind::EOF,
            ]
        );
        assert_eq!(kinds("x == 1")[1], TokenKind::EqualEqual);
        assert_eq!(kinds("x === 1")[1..3], [TokenKind::EqualEqual, TokenKind::Equal]);
        assert_eq!(kinds("x != 1")[1], TokenKind::NotEqual);
    }

    #[test]
    fn strings_keep_their_contents() {
        let tokens = tokenize("\"a b\" + name").expect("tokenize should succeed");
        assert_eq!(tokens[0].kind, TokenKind::String("a b"));
        assert_eq!(tokens[0].span, Span { start: 0, end: 5 });
    }

    #[test]
    fn errors_on_invalid_character() {
        let err = tokenize("1 @ 2").expect_err("expected lexing failure");
        assert_eq!(
            err,
            ExpressionError::UnexpectedCharacter { ch: '@', column: 3 }
        );
        assert!(matches!(
            tokenize("!x"),
            Err(ExpressionError::UnexpectedCharacter { ch: '!', column: 1 })
        ));
    }

    #[test]
    fn errors_on_unterminated_string() {
        assert_eq!(
            tokenize("\"open"),
            Err(ExpressionError::UnterminatedString { column: 1 })
        );
    }

    #[test]
    fn errors_on_integer_overflow() {
        let err = tokenize("99999999999999999999999999").expect_err("expected overflow");
        assert!(err.to_string().contains("Invalid integer literal"));
    }
}
