use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

use crate::options::{ParseOptions, STRICT_MAX_DEPTH};
use crate::tokenize::{Token, TokenType, TokenizeError, Tokenizer};
use crate::{ErrorKind, Value};

/// Parses a whole document with the default [`ParseOptions`].
pub fn parse(input: &str) -> Result<Value, ParseError> {
    parse_with(input, &ParseOptions::default())
}

/// Parses a whole document: exactly one value, then end of input.
#[tracing::instrument(level = "trace", skip_all, fields(len = input.len()))]
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    let tokenizer = Tokenizer::with_whitespace(input, options.whitespace);
    let result = Parser::new(tokenizer)
        .and_then(|parser| parser.with_max_depth(options.max_depth).parse_document());

    if let Err(err) = &result {
        trace!(kind = ?err.kind(), offset = err.offset(), "parse failed");
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// A token that cannot appear at this point in the grammar
    #[error("unexpected {found:?} token at offset {offset}")]
    UnexpectedToken { found: TokenType, offset: usize },
    /// A missing string key or missing colon inside an object
    #[error("expected {expected} in object, found {found:?} at offset {offset}")]
    ObjectSyntax {
        expected: &'static str,
        found: TokenType,
        offset: usize,
    },
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { limit: usize, offset: usize },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Tokenize(err) => err.kind(),
            ParseError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ParseError::ObjectSyntax { .. } => ErrorKind::ObjectSyntaxError,
            ParseError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    /// Byte offset in the source where the failure was detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Tokenize(err) => err.offset(),
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::ObjectSyntax { offset, .. }
            | ParseError::NestingTooDeep { offset, .. } => *offset,
        }
    }

    fn unexpected(token: &Token<'_>) -> Self {
        ParseError::UnexpectedToken {
            found: token.kind,
            offset: token.offset,
        }
    }
}

type ParseResult = Result<Value, ParseError>;

/// Recursive descent parser with a single token of lookahead.
#[derive(Debug)]
pub struct Parser<'src> {
    tokenizer: Tokenizer<'src>,
    current: Token<'src>,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'src> Parser<'src> {
    /// Binds to `tokenizer` and reads the first token. Nesting is capped at
    /// [`STRICT_MAX_DEPTH`] until [`Parser::with_max_depth`] says otherwise.
    pub fn new(mut tokenizer: Tokenizer<'src>) -> Result<Self, ParseError> {
        let current = tokenizer.next_token()?;
        Ok(Parser {
            tokenizer,
            current,
            depth: 0,
            max_depth: Some(STRICT_MAX_DEPTH),
        })
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The lookahead token, not yet consumed.
    pub fn current(&self) -> &Token<'src> {
        &self.current
    }

    /// Parses one value and requires nothing but whitespace after it.
    pub fn parse_document(&mut self) -> ParseResult {
        let value = self.parse_value()?;
        if self.current.kind != TokenType::Eof {
            return Err(ParseError::unexpected(&self.current));
        }
        Ok(value)
    }

    /// Parses the value starting at the current token, leaving the lookahead
    /// on the token right after it.
    pub fn parse_value(&mut self) -> ParseResult {
        let value = match self.current.kind {
            TokenType::Null => Value::Null,
            TokenType::False => Value::Boolean(false),
            TokenType::True => Value::Boolean(true),
            TokenType::Number => parse_number(&self.current)?,
            TokenType::String => Value::String(unquote(self.current.lexeme).to_owned()),
            TokenType::LeftBracket => return self.parse_array(),
            TokenType::LeftBrace => return self.parse_object(),
            _ => return Err(ParseError::unexpected(&self.current)),
        };

        self.advance()?;
        Ok(value)
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.tokenizer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenType) -> Result<(), ParseError> {
        if self.current.kind != kind {
            return Err(ParseError::unexpected(&self.current));
        }
        self.advance()
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => Err(ParseError::NestingTooDeep {
                limit,
                offset: self.current.offset,
            }),
            _ => Ok(()),
        }
    }

    fn parse_array(&mut self) -> ParseResult {
        self.enter()?;
        trace!(offset = self.current.offset, depth = self.depth, "array");

        // consume the LeftBracket token
        self.advance()?;

        let mut array = Vec::new();
        if self.current.kind != TokenType::RightBracket {
            array.push(self.parse_value()?);
            while self.current.kind == TokenType::Comma {
                self.advance()?;
                array.push(self.parse_value()?);
            }
        }

        self.expect(TokenType::RightBracket)?;
        self.depth -= 1;

        Ok(Value::Array(array))
    }

    fn parse_object(&mut self) -> ParseResult {
        self.enter()?;
        trace!(offset = self.current.offset, depth = self.depth, "object");

        // consume the LeftBrace token
        self.advance()?;

        let mut map = HashMap::new();
        if self.current.kind != TokenType::RightBrace {
            loop {
                let (key, value) = self.parse_member()?;
                // later duplicates overwrite earlier ones
                map.insert(key, value);

                if self.current.kind != TokenType::Comma {
                    break;
                }
                self.advance()?;
            }
        }

        self.expect(TokenType::RightBrace)?;
        self.depth -= 1;

        Ok(Value::Object(map))
    }

    fn parse_member(&mut self) -> Result<(String, Value), ParseError> {
        if self.current.kind != TokenType::String {
            return Err(self.object_syntax("string key"));
        }
        let key = unquote(self.current.lexeme).to_owned();
        self.advance()?;

        if self.current.kind != TokenType::Colon {
            return Err(self.object_syntax("`:`"));
        }
        self.advance()?;

        let value = self.parse_value()?;
        Ok((key, value))
    }

    fn object_syntax(&self, expected: &'static str) -> ParseError {
        ParseError::ObjectSyntax {
            expected,
            found: self.current.kind,
            offset: self.current.offset,
        }
    }
}

// A long enough digit run parses to infinity; that is rejected like any
// other malformed number.
fn parse_number(token: &Token<'_>) -> ParseResult {
    let invalid = || TokenizeError::InvalidNumber { offset: token.offset };
    let number: f64 = token.lexeme.parse().map_err(|_| invalid())?;
    if !number.is_finite() {
        return Err(invalid().into());
    }
    Ok(Value::Number(number))
}

/// Strips one leading and one trailing quote; nothing else is unescaped.
fn unquote(lexeme: &str) -> &str {
    let inner = lexeme.strip_prefix('"').unwrap_or(lexeme);
    inner.strip_suffix('"').unwrap_or(inner)
}
