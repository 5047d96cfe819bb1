use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, Number, Token, TokenKind, UnaryOp},
    lexer::{LexError, Lexer},
};

/// Errors raised while lexing or building the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token that cannot start or continue an expression here
    #[error("Unexpected token: {text}")]
    UnexpectedToken { text: String, offset: usize },

    /// A required `)` or `:` is missing; located where it was expected
    #[error("Expected {expected}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },

    /// A complete expression was followed by more input
    #[error("Unexpected token after expression: {text}")]
    TrailingToken { text: String, offset: usize },

    /// A numeral that does not fit its numeric type
    #[error("Invalid number literal")]
    InvalidNumber { offset: usize },

    /// Nesting or operator chains beyond the parser's limits
    #[error("Expression is nested too deeply")]
    TooDeep { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lex(e) => e.offset(),
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::Expected { offset, .. }
            | ParseError::TrailingToken { offset, .. }
            | ParseError::InvalidNumber { offset }
            | ParseError::TooDeep { offset } => *offset,
        }
    }
}

/// Recursive-descent parser over an eagerly lexed token list.
///
/// ```text
/// conditional    = logicalOr ( '?' conditional ':' conditional )?
/// logicalOr      = logicalAnd ( '||' logicalAnd )*
/// logicalAnd     = equality ( '&&' equality )*
/// equality       = relational ( ('==' | '!=') relational )*
/// relational     = additive ( ('>' | '>=' | '<' | '<=') additive )*
/// additive       = multiplicative ( ('+' | '-') multiplicative )*
/// multiplicative = unary ( ('*' | '/' | '%') unary )*
/// unary          = ('!' | '+' | '-') unary | primary
/// primary        = NUMBER | STRING | IDENTIFIER | '(' conditional ')'
/// ```
///
/// Parentheses, prefix operators and conditional branches may nest at most
/// [`MAX_NESTING`] levels, and no operator chain may produce a tree taller
/// than [`MAX_HEIGHT`]. Input beyond either limit is a [`ParseError::TooDeep`].
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

/// Deepest nesting of `(`, prefix operators and conditional branches.
pub const MAX_NESTING: usize = 64;

/// Tallest syntax tree the parser builds.
pub const MAX_HEIGHT: usize = 256;

impl Parser {
    /// Runs the lexer to completion and prepares to parse its tokens.
    pub fn new(lexer: Lexer) -> Result<Self, ParseError> {
        Ok(Parser::from_tokens(lexer.tokenize()?))
    }

    /// Parses an already lexed token list.
    ///
    /// An end-of-input token is appended if the list does not end with one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfInput) {
            let offset = tokens
                .last()
                .map(|t| t.offset + t.len())
                .unwrap_or_default();
            tokens.push(Token::new(TokenKind::EndOfInput, "", offset));
        }
        Parser {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Moves past the current token and returns it. Never moves past end of input.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if token.kind != TokenKind::EndOfInput {
            self.index += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::Expected {
                expected,
                offset: self.current().offset,
            })
        }
    }

    /// Runs `parse` one nesting level deeper, failing at `offset` past the limit.
    fn nested<T>(
        &mut self,
        offset: usize,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep { offset });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parses the whole token list as one expression.
    ///
    /// Tokens left over after a complete expression are an error located at
    /// the first of them.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_conditional()?;

        if !self.check(TokenKind::EndOfInput) {
            let token = self.current();
            return Err(ParseError::TrailingToken {
                text: token.text.clone(),
                offset: token.offset,
            });
        }
        Ok(expr)
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_or()?;

        if !self.check(TokenKind::Question) {
            return Ok(condition);
        }
        let question = self.advance().offset;

        let when_true = self.nested(question, Self::parse_conditional)?;
        let colon = self
            .expect(TokenKind::Colon, "':' in conditional expression")?
            .offset;
        let when_false = self.nested(colon, Self::parse_conditional)?;

        Ok(Expr::Conditional {
            condition: Box::new(condition),
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        })
    }

    /// Parses one left-associative precedence level whose operators are `ops`.
    fn parse_level(
        &mut self,
        ops: &[BinOp],
        next: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        let mut height = left.height();

        while let Some(op) =
            BinOp::from_token(self.current().kind).filter(|op| ops.contains(op))
        {
            let pos = self.advance().offset;
            let right = next(self)?;

            height = height.max(right.height()) + 1;
            if height > MAX_HEIGHT {
                return Err(ParseError::TooDeep { offset: pos });
            }

            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                pos,
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_level(&[BinOp::Or], Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_level(&[BinOp::And], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_level(&[BinOp::Equal, BinOp::NotEqual], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_level(
            &[
                BinOp::GreaterThan,
                BinOp::GreaterEqual,
                BinOp::LessThan,
                BinOp::LessEqual,
            ],
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_level(&[BinOp::Add, BinOp::Subtract], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_level(
            &[BinOp::Multiply, BinOp::Divide, BinOp::Modulo],
            Self::parse_unary,
        )
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match UnaryOp::from_token(self.current().kind) {
            Some(op) => {
                let pos = self.current().offset;
                let operand = self.nested(pos, |parser| {
                    parser.advance();
                    parser.parse_unary() // right-associative
                })?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                    pos,
                })
            }
            None => self.parse_primary(),
        }
    }

    /// Parse primary expressions (atoms): numbers, strings, identifiers, '(' ... ')'
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current().kind {
            TokenKind::Number => {
                let token = self.advance();
                let value = parse_number(&token.text)
                    .ok_or(ParseError::InvalidNumber { offset: token.offset })?;
                Ok(Expr::Number {
                    value,
                    pos: token.offset,
                })
            }
            TokenKind::String => {
                let token = self.advance();
                let value = token.string_contents().unwrap_or_default().to_string();
                Ok(Expr::String {
                    value,
                    pos: token.offset,
                })
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Expr::Identifier {
                    name: token.text,
                    pos: token.offset,
                })
            }
            TokenKind::LParen => {
                let open = self.current().offset;
                self.nested(open, |parser| {
                    parser.advance();
                    let inner = parser.parse_conditional()?;
                    parser.expect(TokenKind::RParen, "')' to close '('")?;
                    Ok(inner)
                })
            }
            _ => {
                let token = self.current();
                Err(ParseError::UnexpectedToken {
                    text: token.display_text().to_string(),
                    offset: token.offset,
                })
            }
        }
    }
}

/// Numerals with a `.` are floats, all others integers.
fn parse_number(text: &str) -> Option<Number> {
    if text.contains('.') {
        text.parse::<f64>().ok().map(Number::Float)
    } else {
        text.parse::<i64>().ok().map(Number::Integer)
    }
}

/// Lexes and parses `source` into a syntax tree.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(source))?.parse_expression()
}

#[test]
fn test_conditional_is_right_associative() {
    let expr = parse("a ? b : c ? d : e").unwrap();
    match expr {
        Expr::Conditional { when_false, .. } => {
            assert!(matches!(*when_false, Expr::Conditional { .. }));
        }
        _ => panic!("Expected conditional"),
    }
}
