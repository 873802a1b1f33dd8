use thiserror::Error;

use crate::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `null`
    Null,
    /// `false`
    False,
    /// `true`
    True,
    /// Any number literal
    Number,
    /// Key of the key/value pair or a string value, quotes included
    String,
    /// End of the source text
    Eof,
}

/// A single lexeme borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenType,
    pub lexeme: &'src str,
    /// Byte offset of the first character of `lexeme`
    pub offset: usize,
}

/// Which bytes are skipped between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Whitespace {
    /// Space, tab and newline
    #[default]
    Basic,
    /// Anything `u8::is_ascii_whitespace` accepts, including `\r` and form feed
    Ascii,
}

impl Whitespace {
    fn matches(self, byte: u8) -> bool {
        match self {
            Whitespace::Basic => matches!(byte, b' ' | b'\t' | b'\n'),
            Whitespace::Ascii => byte.is_ascii_whitespace(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },
    /// An opening quote with no closing quote before the end of input
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },
    /// A bare `-`, or a `.` with no digit after it
    #[error("invalid number at offset {offset}")]
    InvalidNumber { offset: usize },
    /// A run of letters that is not `true`, `false` or `null`
    #[error("invalid keyword at offset {offset}")]
    InvalidKeyword { offset: usize },
}

impl TokenizeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenizeError::UnexpectedCharacter { .. } => ErrorKind::UnexpectedCharacter,
            TokenizeError::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            TokenizeError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            TokenizeError::InvalidKeyword { .. } => ErrorKind::InvalidKeyword,
        }
    }

    /// Byte offset of the token that failed to scan.
    pub fn offset(&self) -> usize {
        match self {
            TokenizeError::UnexpectedCharacter { offset, .. }
            | TokenizeError::UnterminatedString { offset }
            | TokenizeError::InvalidNumber { offset }
            | TokenizeError::InvalidKeyword { offset } => *offset,
        }
    }
}

/// Tokenizer hands out one token per call, advancing a cursor over the source.
#[derive(Debug, Clone)]
pub struct Tokenizer<'src> {
    source: &'src str,
    cursor: usize,
    whitespace: Whitespace,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_whitespace(source, Whitespace::default())
    }

    pub fn with_whitespace(source: &'src str, whitespace: Whitespace) -> Self {
        Tokenizer {
            source,
            cursor: 0,
            whitespace,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn next_token(&mut self) -> Result<Token<'src>, TokenizeError> {
        self.skip_whitespace();

        let start = self.cursor;
        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Ok(self.token(TokenType::Eof, start)),
        };

        let kind = match ch {
            b'{' => self.punctuation(TokenType::LeftBrace),
            b'}' => self.punctuation(TokenType::RightBrace),
            b'[' => self.punctuation(TokenType::LeftBracket),
            b']' => self.punctuation(TokenType::RightBracket),
            b':' => self.punctuation(TokenType::Colon),
            b',' => self.punctuation(TokenType::Comma),
            b'"' => self.tokenize_string()?,
            c if c.is_ascii_digit() || c == b'-' => self.tokenize_number()?,
            c if c.is_ascii_alphabetic() => self.tokenize_keyword()?,
            _ => {
                // the cursor only ever stops on a char boundary
                let ch = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
                return Err(TokenizeError::UnexpectedCharacter { ch, offset: start });
            }
        };

        Ok(self.token(kind, start))
    }

    fn token(&self, kind: TokenType, start: usize) -> Token<'src> {
        Token {
            kind,
            lexeme: &self.source[start..self.cursor],
            offset: start,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.cursor).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !self.whitespace.matches(ch) {
                break;
            }
            self.cursor += 1;
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.cursor;
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.cursor += 1;
        }
        self.cursor - start
    }

    fn punctuation(&mut self, kind: TokenType) -> TokenType {
        self.cursor += 1;
        kind
    }

    fn tokenize_number(&mut self) -> Result<TokenType, TokenizeError> {
        let start = self.cursor;

        if self.peek() == Some(b'-') {
            self.cursor += 1;
        }
        if self.skip_digits() == 0 {
            return Err(TokenizeError::InvalidNumber { offset: start });
        }

        if self.peek() == Some(b'.') {
            self.cursor += 1;
            if self.skip_digits() == 0 {
                return Err(TokenizeError::InvalidNumber { offset: start });
            }
        }

        Ok(TokenType::Number)
    }

    fn tokenize_keyword(&mut self) -> Result<TokenType, TokenizeError> {
        let start = self.cursor;
        while self.peek().is_some_and(|ch| ch.is_ascii_alphanumeric()) {
            self.cursor += 1;
        }

        match &self.source[start..self.cursor] {
            "null" => Ok(TokenType::Null),
            "false" => Ok(TokenType::False),
            "true" => Ok(TokenType::True),
            _ => Err(TokenizeError::InvalidKeyword { offset: start }),
        }
    }

    // No escape handling: a `\"` inside the literal ends it.
    fn tokenize_string(&mut self) -> Result<TokenType, TokenizeError> {
        let start = self.cursor;
        let rest = &self.source.as_bytes()[start + 1..];

        match rest.iter().position(|&ch| ch == b'"') {
            Some(len) => {
                // opening quote, contents, closing quote
                self.cursor = start + len + 2;
                Ok(TokenType::String)
            }
            None => Err(TokenizeError::UnterminatedString { offset: start }),
        }
    }
}
