use thiserror::Error;

use crate::ast::{Token, TokenKind};

/// Errors raised while splitting the source into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A quote was opened but never closed; located at the opening quote
    #[error("Unterminated string literal")]
    UnterminatedString { offset: usize },

    /// A character that starts no token, or a lone `=`, `&` or `|`
    #[error("Unexpected symbol: {symbol}")]
    UnexpectedSymbol { symbol: char, offset: usize },

    /// A numeral followed directly by a second `.`, as in `1.2.3`
    #[error("Malformed number literal: unexpected second '.'")]
    MalformedNumber { offset: usize },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedString { offset }
            | LexError::UnexpectedSymbol { offset, .. }
            | LexError::MalformedNumber { offset } => *offset,
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            finished: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn lexeme(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.lexeme(start), start)
    }

    /// Identifiers start with a letter or `_` and continue with any Unicode
    /// letter, digit or `_`.
    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        self.token(TokenKind::Identifier, start)
    }

    /// Reads raw characters up to the matching quote, no escapes.
    fn read_string(&mut self, quote: char) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(self.token(TokenKind::String, start));
            }
        }

        Err(LexError::UnterminatedString { offset: start })
    }

    /// Numerals are ASCII digits with at most one `.`. Other Unicode digits
    /// start no token, though they may continue an identifier.
    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut seen_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' {
                if seen_dot {
                    return Err(LexError::MalformedNumber {
                        offset: self.position,
                    });
                }
                seen_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        Ok(self.token(TokenKind::Number, start))
    }

    /// Consumes the current character, and `second` too when it follows.
    fn one_or_two(&mut self, second: char, double: TokenKind, single: TokenKind) -> Token {
        let start = self.position;
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            self.token(double, start)
        } else {
            self.token(single, start)
        }
    }

    /// Consumes a symbol that is only valid when doubled (`==`, `&&`, `||`).
    fn doubled(&mut self, ch: char, kind: TokenKind) -> Result<Token, LexError> {
        let start = self.position;
        if self.peek_char(1) == Some(ch) {
            self.advance();
            self.advance();
            Ok(self.token(kind, start))
        } else {
            Err(LexError::UnexpectedSymbol {
                symbol: ch,
                offset: start,
            })
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.advance();
        self.token(kind, start)
    }

    /// Produces the next token. Once the end of input has been reached every
    /// further call keeps returning the end-of-input token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            self.finished = true;
            return Ok(Token::new(TokenKind::EndOfInput, "", self.input.len()));
        };

        let token = match ch {
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '?' => self.single(TokenKind::Question),
            ':' => self.single(TokenKind::Colon),
            '!' => self.one_or_two('=', TokenKind::Ne, TokenKind::Not),
            '>' => self.one_or_two('=', TokenKind::Ge, TokenKind::Gt),
            '<' => self.one_or_two('=', TokenKind::Le, TokenKind::Lt),
            '=' => self.doubled('=', TokenKind::Eq)?,
            '&' => self.doubled('&', TokenKind::And)?,
            '|' => self.doubled('|', TokenKind::Or)?,
            '"' | '\'' => self.read_string(ch)?,
            c if c.is_ascii_digit() => self.read_number()?,
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            symbol => {
                return Err(LexError::UnexpectedSymbol {
                    symbol,
                    offset: self.position,
                });
            }
        };

        Ok(token)
    }

    /// Lexes the whole input. The result always ends with exactly one
    /// end-of-input token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while !self.finished {
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }
}

/// Lexes `source` into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[test]
fn test_operators() {
    let kinds: Vec<TokenKind> = tokenize("&& || ! != >= > <= < ==")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::Ne,
            TokenKind::Ge,
            TokenKind::Gt,
            TokenKind::Le,
            TokenKind::Lt,
            TokenKind::Eq,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_end_of_input_repeats() {
    let mut lexer = Lexer::new("  ");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
    assert_eq!(lexer.next_token().unwrap().offset, 2);
}
