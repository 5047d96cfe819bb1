use std::fmt;

/// Classification of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    /// Bare name such as `yes` or `_flag1`
    ///
    /// Must start with a letter or underscore, followed by letters, digits, or underscores.
    Identifier,

    /// Integer or decimal numeral
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// 5.
    /// ```
    Number,

    /// Single or double quoted string, taken verbatim (no escape sequences)
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'it works'
    /// ```
    String,

    // Arithmetic
    /// Addition, string concatenation or unary plus
    Plus,
    /// Subtraction or unary minus
    Minus,
    /// Multiplication
    Star,
    /// Division
    Slash,
    /// Remainder
    Percent,

    // Comparison
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// Equality
    Eq,
    /// Inequality
    Ne,

    // Logical
    /// Logical AND (`&&`), both sides are always evaluated
    And,
    /// Logical OR (`||`), both sides are always evaluated
    Or,
    /// Logical NOT (`!`)
    Not,

    // Conditional
    /// `?` of `cond ? a : b`
    Question,
    /// `:` of `cond ? a : b`
    Colon,

    // Delimiters
    LParen,
    RParen,

    /// End of input, always the last token produced
    EndOfInput,
}

impl TokenKind {
    /// Human readable description used in error messages.
    pub fn describe(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Identifier => "identifier",
            Number => "number",
            String => "string",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Gt => "'>'",
            Ge => "'>='",
            Lt => "'<'",
            Le => "'<='",
            Eq => "'=='",
            Ne => "'!='",
            And => "'&&'",
            Or => "'||'",
            Not => "'!'",
            Question => "'?'",
            Colon => "':'",
            LParen => "'('",
            RParen => "')'",
            EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A classified lexeme together with its position in the source.
///
/// `text` is the exact slice of the source the token was read from (string
/// tokens keep their quotes), and `offset` is the 0-based character index of
/// its first character. The end-of-input token has empty text and an offset
/// equal to the source length.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Length of the lexeme in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The contents of a string token without its delimiting quotes.
    ///
    /// Returns `None` for any other kind of token.
    pub fn string_contents(&self) -> Option<&str> {
        if self.kind != TokenKind::String {
            return None;
        }
        let mut chars = self.text.chars();
        let quote = chars.next()?;
        self.text
            .get(quote.len_utf8()..self.text.len() - quote.len_utf8())
    }

    /// Text shown when the token shows up in an error message.
    pub fn display_text(&self) -> &str {
        match self.kind {
            TokenKind::EndOfInput => "end of input",
            _ => &self.text,
        }
    }
}
