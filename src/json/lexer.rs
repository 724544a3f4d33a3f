use crate::error::ParseError;
use crate::lexer::prelude::*;

use super::token::{Punctuation, Token};

/// Characters that may separate tokens.
pub const WHITESPACE: &str = " \t\n\r";

fn whitespace() -> RcLexer {
    one_of(WHITESPACE)
}

fn skip(_: &str) -> Result<Option<Token>, ParseError> {
    Ok(None)
}

fn punct_value(input: &str) -> Result<Option<Token>, ParseError> {
    Ok(input
        .chars()
        .next()
        .and_then(Punctuation::from_char)
        .map(Token::Punct))
}

/// A run of digits and dots, optionally signed, that must be followed by `,`,
/// `]` or `}`. Numbers can therefore only close out a container element.
fn number_lit() -> RcLexer {
    let run = some(pred(|c| c.is_ascii_digit() || c == '.'));
    let terminator = seq(&[many(whitespace()), one_of(",]}")]);

    seq(&[optional(is('-')), run, peek(terminator)])
}

fn number_lit_value(input: &str) -> Result<Option<Token>, ParseError> {
    let token = if input.contains('.') {
        input.parse().map(Token::Float).map_err(|_| ParseError::InvalidJson)?
    } else {
        input.parse().map(Token::Integer).map_err(|_| ParseError::InvalidJson)?
    };
    Ok(Some(token))
}

fn string_lit() -> RcLexer {
    let quote = is('"');

    seq(&[quote.clone(), many_until(any(), quote.clone()), quote])
}

fn string_lit_value(input: &str) -> Result<Option<Token>, ParseError> {
    let contents = &input[1..input.len() - 1];
    Ok(Some(Token::StringLiteral(contents.to_string())))
}

pub fn json_token_map() -> TokenMap<Token, ParseError> {
    token_map!(
        whitespace() => skip,
        one_of(Punctuation::CHARS) => punct_value,
        string_lit() => string_lit_value,
        exact("true") => |_: &str| Ok(Some(Token::Boolean(true))),
        exact("false") => |_: &str| Ok(Some(Token::Boolean(false))),
        exact("null") => |_: &str| Ok(Some(Token::Null)),
        number_lit() => number_lit_value,
    )
}

fn unmatched(rest: &str) -> ParseError {
    if rest.starts_with('"') {
        ParseError::UnterminatedString
    } else {
        ParseError::InvalidJson
    }
}

/// Splits `text` into tokens, skipping whitespace between them.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let tokens = get_tokens(&json_token_map(), text, unmatched)?;
    tracing::trace!(count = tokens.len(), "tokenized input");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::token::Bracket;

    const OPEN_CURLY: Token = Token::Punct(Punctuation::Curly(Bracket::Open));
    const CLOSE_CURLY: Token = Token::Punct(Punctuation::Curly(Bracket::Close));
    const OPEN_SQUARE: Token = Token::Punct(Punctuation::Square(Bracket::Open));
    const CLOSE_SQUARE: Token = Token::Punct(Punctuation::Square(Bracket::Close));
    const COMMA: Token = Token::Punct(Punctuation::Comma);
    const COLON: Token = Token::Punct(Punctuation::Colon);

    fn string(s: &str) -> Token {
        Token::StringLiteral(s.to_string())
    }

    #[test]
    fn all_punctuation() {
        assert_eq!(
            tokenize("{}[],:").unwrap(),
            vec![OPEN_CURLY, CLOSE_CURLY, OPEN_SQUARE, CLOSE_SQUARE, COMMA, COLON]
        );
    }

    #[test]
    fn simple_object() {
        assert_eq!(
            tokenize(r#"{"key": "value"}"#).unwrap(),
            vec![OPEN_CURLY, string("key"), COLON, string("value"), CLOSE_CURLY]
        );
    }

    #[test]
    fn literals() {
        assert_eq!(
            tokenize("[true,false,null]").unwrap(),
            vec![
                OPEN_SQUARE,
                Token::Boolean(true),
                COMMA,
                Token::Boolean(false),
                COMMA,
                Token::Null,
                CLOSE_SQUARE,
            ]
        );
    }

    #[test]
    fn integers_and_floats_are_distinct() {
        assert_eq!(
            tokenize("[1,-23,4.5,-0.25]").unwrap(),
            vec![
                OPEN_SQUARE,
                Token::Integer(1),
                COMMA,
                Token::Integer(-23),
                COMMA,
                Token::Float(4.5),
                COMMA,
                Token::Float(-0.25),
                CLOSE_SQUARE,
            ]
        );
    }

    #[test]
    fn number_may_be_followed_by_whitespace_then_terminator() {
        assert_eq!(
            tokenize("[1 ,\n2\t]").unwrap(),
            vec![OPEN_SQUARE, Token::Integer(1), COMMA, Token::Integer(2), CLOSE_SQUARE]
        );
    }

    #[test]
    fn number_needs_a_closing_terminator() {
        assert_eq!(tokenize("123"), Err(ParseError::InvalidJson));
        assert_eq!(tokenize("{1:2}"), Err(ParseError::InvalidJson));
    }

    #[test]
    fn malformed_numbers_fail() {
        assert_eq!(tokenize("[1.2.3]"), Err(ParseError::InvalidJson));
        assert_eq!(tokenize("[-]"), Err(ParseError::InvalidJson));
        assert_eq!(tokenize("[99999999999999999999]"), Err(ParseError::InvalidJson));
    }

    #[test]
    fn string_keeps_inner_whitespace_and_escapes_verbatim() {
        assert_eq!(tokenize(r#""a b\n""#).unwrap(), vec![string(r"a b\n")]);
        assert_eq!(tokenize(r#""""#).unwrap(), vec![string("")]);
        assert_eq!(tokenize("\"olá_こんにちは\"").unwrap(), vec![string("olá_こんにちは")]);
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(tokenize(r#"{"key": "value}"#), Err(ParseError::UnterminatedString));
        assert_eq!(tokenize("\""), Err(ParseError::UnterminatedString));
    }

    #[test]
    fn unknown_characters_fail() {
        assert_eq!(tokenize(r#"{"key": value"}"#), Err(ParseError::InvalidJson));
        assert_eq!(tokenize("[fals]"), Err(ParseError::InvalidJson));
        assert_eq!(tokenize("[nul]"), Err(ParseError::InvalidJson));
    }

    #[test]
    fn whitespace_only_input_has_no_tokens() {
        assert_eq!(tokenize(" \r\n\t").unwrap(), vec![]);
        assert_eq!(tokenize("").unwrap(), vec![]);
    }
}
