use std::collections::HashMap;

use crate::error::ParseError;
use crate::parser::prelude::*;
use crate::value::Value;
use crate::ParseOptions;

use super::token::{Bracket, Punctuation, Token};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Separator {
    Next,
    End,
}

fn punct(description: &'static str, expected: Punctuation) -> RcParser<Token, ()> {
    terminal(description, move |t: &Token| match t {
        Token::Punct(p) if *p == expected => Some(()),
        _ => None,
    })
}

fn separator(description: &'static str, close: Punctuation) -> RcParser<Token, Separator> {
    terminal(description, move |t: &Token| match t {
        Token::Punct(Punctuation::Comma) => Some(Separator::Next),
        Token::Punct(p) if *p == close => Some(Separator::End),
        _ => None,
    })
}

fn key() -> RcParser<Token, String> {
    terminal("a string key", |t: &Token| match t {
        Token::StringLiteral(s) => Some(s.clone()),
        _ => None,
    })
}

fn scalar(allow_null: bool) -> RcParser<Token, Value> {
    let description = if allow_null {
        "a string, number, boolean or null"
    } else {
        "a string, number or boolean"
    };
    terminal(description, move |t: &Token| match t {
        Token::StringLiteral(s) => Some(Value::String(s.clone())),
        Token::Integer(n) => Some(Value::Integer(*n)),
        Token::Float(f) => Some(Value::Float(*f)),
        Token::Boolean(b) => Some(Value::Boolean(*b)),
        Token::Null if allow_null => Some(Value::Null),
        Token::Null | Token::Punct(_) => None,
    })
}

fn is_punct(tokens: &[Token], cursor: usize, expected: Punctuation) -> bool {
    matches!(tokens.get(cursor), Some(Token::Punct(p)) if *p == expected)
}

/// Recursive-descent JSON grammar. Every rule takes the cursor of its first
/// token and returns the cursor just past the last token it consumed.
pub struct Grammar {
    open_curly: RcParser<Token, ()>,
    open_square: RcParser<Token, ()>,
    colon: RcParser<Token, ()>,
    key: RcParser<Token, String>,
    scalar: RcParser<Token, Value>,
    object_separator: RcParser<Token, Separator>,
    array_separator: RcParser<Token, Separator>,
}

const CLOSE_CURLY: Punctuation = Punctuation::Curly(Bracket::Close);
const CLOSE_SQUARE: Punctuation = Punctuation::Square(Bracket::Close);

impl Grammar {
    pub fn new(options: &ParseOptions) -> Self {
        Grammar {
            open_curly: punct("'{'", Punctuation::Curly(Bracket::Open)),
            open_square: punct("'['", Punctuation::Square(Bracket::Open)),
            colon: punct("':'", Punctuation::Colon),
            key: key(),
            scalar: scalar(options.allow_null),
            object_separator: separator("',' or '}'", CLOSE_CURLY),
            array_separator: separator("',' or ']'", CLOSE_SQUARE),
        }
    }

    fn expect<O>(
        &self,
        parser: &RcParser<Token, O>,
        tokens: &[Token],
        cursor: usize,
    ) -> Result<(usize, O), ParseError> {
        let rest = tokens.get(cursor..).unwrap_or(&[]);
        let (consumed, output) = parser.parse(rest)?;
        Ok((cursor + consumed, output))
    }

    /// `{` then `key : value` pairs separated by `,` then `}`.
    pub fn object(
        &self,
        tokens: &[Token],
        cursor: usize,
    ) -> Result<(usize, HashMap<String, Value>), ParseError> {
        let (mut cursor, ()) = self.expect(&self.open_curly, tokens, cursor)?;
        let mut map = HashMap::new();
        if is_punct(tokens, cursor, CLOSE_CURLY) {
            return Ok((cursor + 1, map));
        }

        loop {
            let (next, key) = self.expect(&self.key, tokens, cursor)?;
            let (next, ()) = self.expect(&self.colon, tokens, next)?;
            let (next, value) = self.value(tokens, next)?;
            map.insert(key, value);

            let (next, separator) = self.expect(&self.object_separator, tokens, next)?;
            cursor = next;
            if separator == Separator::End {
                return Ok((cursor, map));
            }
        }
    }

    /// `[` then values separated by `,` then `]`.
    pub fn array(&self, tokens: &[Token], cursor: usize) -> Result<(usize, Vec<Value>), ParseError> {
        let (mut cursor, ()) = self.expect(&self.open_square, tokens, cursor)?;
        let mut items = Vec::new();
        if is_punct(tokens, cursor, CLOSE_SQUARE) {
            return Ok((cursor + 1, items));
        }

        loop {
            let (next, value) = self.value(tokens, cursor)?;
            items.push(value);

            let (next, separator) = self.expect(&self.array_separator, tokens, next)?;
            cursor = next;
            if separator == Separator::End {
                return Ok((cursor, items));
            }
        }
    }

    pub fn value(&self, tokens: &[Token], cursor: usize) -> Result<(usize, Value), ParseError> {
        match tokens.get(cursor) {
            Some(Token::Punct(Punctuation::Curly(Bracket::Open))) => self
                .object(tokens, cursor)
                .map(|(next, map)| (next, Value::Object(map))),
            Some(Token::Punct(Punctuation::Square(Bracket::Open))) => self
                .array(tokens, cursor)
                .map(|(next, items)| (next, Value::Array(items))),
            _ => self.expect(&self.scalar, tokens, cursor),
        }
    }
}

/// Parses a whole document: a single object or array.
impl Parser for Grammar {
    type Output = Value;
    type Token = Token;

    fn parse(&self, input: &[Token]) -> Result<(usize, Value), ParseError> {
        match input.first() {
            Some(Token::Punct(Punctuation::Curly(Bracket::Open)))
            | Some(Token::Punct(Punctuation::Square(Bracket::Open))) => self.value(input, 0),
            _ => {
                tracing::debug!(expected = %self.expected(), "document does not start with a container");
                Err(ParseError::InvalidJson)
            }
        }
    }

    fn expected(&self) -> String {
        "an object or an array".to_string()
    }
}

/// Builds the value tree for `tokens` with default options.
pub fn parse(tokens: &[Token]) -> Result<Value, ParseError> {
    parse_with(tokens, &ParseOptions::default())
}

/// Builds the value tree for `tokens`. All tokens must be consumed.
pub fn parse_with(tokens: &[Token], options: &ParseOptions) -> Result<Value, ParseError> {
    let (consumed, value) = Grammar::new(options).parse(tokens)?;
    if consumed != tokens.len() {
        tracing::debug!(
            trailing = tokens.len() - consumed,
            "tokens left after the document"
        );
        return Err(ParseError::InvalidJson);
    }
    Ok(value)
}
