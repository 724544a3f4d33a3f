use std::ops::RangeBounds;
use std::rc::Rc;

pub trait Lexer {
    fn lex(&self, input: &str) -> Option<usize>;
    fn expected(&self) -> String;
}

pub type RcLexer = Rc<dyn Lexer>;

fn first_char_if(input: &str, accept: impl Fn(char) -> bool) -> Option<usize> {
    input
        .chars()
        .next()
        .and_then(|c| if accept(c) { Some(c.len_utf8()) } else { None })
}

pub struct Pred<F>(F)
where
    F: Fn(char) -> bool;

impl<F> Lexer for Pred<F>
where
    F: Fn(char) -> bool,
{
    fn lex(&self, input: &str) -> Option<usize> {
        first_char_if(input, &self.0)
    }

    fn expected(&self) -> String {
        "character matching predicate".to_string()
    }
}

pub fn pred(predicate: impl 'static + Fn(char) -> bool) -> RcLexer {
    Rc::new(Pred(predicate))
}

pub struct Is(char);

impl Lexer for Is {
    fn lex(&self, input: &str) -> Option<usize> {
        first_char_if(input, |c| c == self.0)
    }

    fn expected(&self) -> String {
        format!("'{}'", self.0)
    }
}

pub fn is(c: char) -> RcLexer {
    Rc::new(Is(c))
}

pub struct Exact(String);

impl Lexer for Exact {
    fn lex(&self, input: &str) -> Option<usize> {
        if input.starts_with(&self.0) {
            Some(self.0.len())
        } else {
            None
        }
    }

    fn expected(&self) -> String {
        format!("the string \"{}\"", &self.0)
    }
}

pub fn exact(string: impl AsRef<str>) -> RcLexer {
    Rc::new(Exact(string.as_ref().to_string()))
}

fn join_with_last<S: ToString>(items: impl AsRef<[S]>, sep: &str, last_sep: &str) -> String {
    let items = items.as_ref();
    let mut buf = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push_str(if i + 1 == items.len() { last_sep } else { sep });
        }
        buf.push_str(&item.to_string());
    }
    buf
}

pub struct OneOf(String);

impl Lexer for OneOf {
    fn lex(&self, input: &str) -> Option<usize> {
        first_char_if(input, |c| self.0.contains(c))
    }

    fn expected(&self) -> String {
        format!(
            "one of {}",
            join_with_last(
                self.0
                    .chars()
                    .map(|c| format!("'{}'", c))
                    .collect::<Vec<_>>(),
                ", ",
                ", or ",
            )
        )
    }
}

pub fn one_of(chars: impl AsRef<str>) -> RcLexer {
    Rc::new(OneOf(chars.as_ref().to_string()))
}

pub struct Any;

impl Lexer for Any {
    fn lex(&self, input: &str) -> Option<usize> {
        input.chars().next().map(char::len_utf8)
    }

    fn expected(&self) -> String {
        "any character".to_string()
    }
}

pub fn any() -> RcLexer {
    Rc::new(Any)
}

pub struct Repeat {
    lexer: RcLexer,
    min: usize,
    max: Option<usize>,
}

impl Lexer for Repeat {
    fn lex(&self, input: &str) -> Option<usize> {
        let mut count = 0;
        let mut len = 0;
        // `max` is exclusive
        while self.max.map_or(true, |max| count + 1 < max) {
            match self.lexer.lex(&input[len..]) {
                Some(n) => {
                    count += 1;
                    len += n;
                    // a zero-width match would repeat forever
                    if n == 0 {
                        break;
                    }
                }
                None => break,
            }
        }
        if count >= self.min { Some(len) } else { None }
    }

    fn expected(&self) -> String {
        let quantity = match self.max {
            Some(max) => format!("between {} and {}", self.min, max.saturating_sub(1)),
            None => format!("at least {}", self.min),
        };
        format!("{} {}", quantity, self.lexer.expected())
    }
}

pub fn repeat(lexer: RcLexer, bounds: impl RangeBounds<usize>) -> RcLexer {
    let (min, max) = crate::get_bounds(bounds);
    Rc::new(Repeat { lexer, min, max })
}

pub fn optional(lexer: RcLexer) -> RcLexer {
    repeat(lexer, 0..=1)
}

pub fn some(lexer: RcLexer) -> RcLexer {
    repeat(lexer, 1..)
}

pub fn many(lexer: RcLexer) -> RcLexer {
    repeat(lexer, ..)
}

pub struct Seq(Vec<RcLexer>);

impl Lexer for Seq {
    fn lex(&self, input: &str) -> Option<usize> {
        let mut len = 0;
        for lexer in &self.0 {
            len += lexer.lex(&input[len..])?;
        }
        Some(len)
    }

    fn expected(&self) -> String {
        join_with_last(
            self.0.iter().map(|l| l.expected()).collect::<Vec<_>>(),
            ", then ",
            ", then ",
        )
    }
}

pub fn seq(lexers: impl AsRef<[RcLexer]>) -> RcLexer {
    Rc::new(Seq(lexers.as_ref().into()))
}

struct Reject(RcLexer);

impl Lexer for Reject {
    fn lex(&self, input: &str) -> Option<usize> {
        if self.0.lex(input).is_none() {
            Some(0)
        } else {
            None
        }
    }

    fn expected(&self) -> String {
        format!("anything but {}", self.0.expected())
    }
}

pub fn reject(lexer: RcLexer) -> RcLexer {
    Rc::new(Reject(lexer))
}

struct Peek(RcLexer);

impl Lexer for Peek {
    fn lex(&self, input: &str) -> Option<usize> {
        self.0.lex(input).map(|_| 0)
    }

    fn expected(&self) -> String {
        format!("followed by {}", self.0.expected())
    }
}

/// Zero-width lookahead: matches without consuming when `lexer` would match.
pub fn peek(lexer: RcLexer) -> RcLexer {
    Rc::new(Peek(lexer))
}

pub fn many_until(lexer: RcLexer, stop_before: RcLexer) -> RcLexer {
    many(seq(&[reject(stop_before), lexer]))
}

/// Ordered lexing rules. A rule's token builder may discard the lexeme by
/// returning `Ok(None)`.
pub type TokenMap<T, E> = Vec<(RcLexer, Box<dyn Fn(&str) -> Result<Option<T>, E>>)>;

macro_rules! token_map {
    ($($lexer:expr => $to_token:expr),* $(,)?) => {
        vec![$(
            ($lexer, Box::new($to_token) as Box<dyn Fn(&str) -> Result<Option<_>, _>>),
        )*]
    };
}

pub(crate) use token_map;

/// Describes what any rule of `token_map` would have accepted.
pub fn expected_any<T, E>(token_map: &TokenMap<T, E>) -> String {
    join_with_last(
        token_map
            .iter()
            .map(|(lexer, _)| lexer.expected())
            .collect::<Vec<_>>(),
        ", ",
        ", or ",
    )
}

/// Splits `input` into tokens. The first rule with a non-empty match wins;
/// when none matches, `unmatched` builds the error from the rest of the input.
pub fn get_tokens<T, E>(
    token_map: &TokenMap<T, E>,
    input: &str,
    unmatched: impl Fn(&str) -> E,
) -> Result<Vec<T>, E> {
    let mut tokens = vec![];
    let mut pos = 0;
    'outer: while pos < input.len() {
        let rest = &input[pos..];
        for (lexer, make_token) in token_map {
            match lexer.lex(rest) {
                Some(n) if n > 0 => {
                    if let Some(token) = make_token(&rest[..n])? {
                        tokens.push(token);
                    }
                    pos += n;
                    continue 'outer;
                }
                _ => {}
            }
        }
        tracing::debug!(
            position = pos,
            expected = %expected_any(token_map),
            "no lexing rule matched"
        );
        return Err(unmatched(rest));
    }
    Ok(tokens)
}

pub mod prelude {
    pub use super::{
        any,
        exact,
        expected_any,
        get_tokens,
        is,
        many,
        many_until,
        one_of,
        optional,
        peek,
        pred,
        reject,
        repeat,
        seq,
        some,
        Lexer,
        RcLexer,
        TokenMap,
    };

    pub(crate) use super::token_map;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn primitives_consume_whole_chars() {
        assert_eq!(is('é').lex("éa"), Some(2));
        assert_eq!(any().lex("こん"), Some(3));
        assert_eq!(one_of("xyz").lex("y"), Some(1));
        assert_eq!(one_of("xyz").lex("a"), None);
        assert_eq!(pred(|c| c.is_ascii_digit()).lex("7"), Some(1));
        assert_eq!(exact("null").lex("nul"), None);
        assert_eq!(exact("null").lex("null,"), Some(4));
    }

    #[test]
    fn repeat_respects_bounds() {
        let digit = pred(|c| c.is_ascii_digit());
        assert_eq!(some(digit.clone()).lex("123a"), Some(3));
        assert_eq!(some(digit.clone()).lex("a"), None);
        assert_eq!(many(digit.clone()).lex("a"), Some(0));
        assert_eq!(optional(digit.clone()).lex("12"), Some(1));
        assert_eq!(repeat(digit.clone(), 2..=3).lex("1"), None);
        assert_eq!(repeat(digit.clone(), 2..=3).lex("12345"), Some(3));
        assert_eq!(repeat(digit, 1..3).lex("12345"), Some(2));
        assert_eq!(optional(is('-')).lex("--1"), Some(1));
    }

    #[test]
    fn repeat_of_zero_width_terminates() {
        assert_eq!(many(peek(is('a'))).lex("aaa"), Some(0));
    }

    #[test]
    fn lookahead_is_zero_width() {
        let number = seq(&[some(pred(|c| c.is_ascii_digit())), peek(is(','))]);
        assert_eq!(number.lex("12,"), Some(2));
        assert_eq!(number.lex("12:"), None);
        assert_eq!(reject(is('"')).lex("a"), Some(0));
        assert_eq!(reject(is('"')).lex("\""), None);
    }

    #[test]
    fn many_until_stops_before_terminator() {
        let body = many_until(any(), is('"'));
        assert_eq!(body.lex("abc\"def"), Some(3));
        assert_eq!(body.lex("abc"), Some(3));
    }

    #[test]
    fn expected_descriptions() {
        assert_eq!(one_of("ab").expected(), "one of 'a', or 'b'");
        assert_eq!(optional(is('-')).expected(), "between 0 and 1 '-'");
        assert_eq!(
            many_until(any(), is('"')).expected(),
            "at least 0 anything but '\"', then any character"
        );
        assert_eq!(peek(exact("ab")).expected(), "followed by the string \"ab\"");
        assert_eq!(seq(&[is('a'), is('b')]).expected(), "'a', then 'b'");
    }

    #[test]
    fn get_tokens_discards_and_reports_unmatched() {
        let map: TokenMap<char, String> = token_map!(
            is(' ') => |_: &str| Ok(None),
            one_of("ab") => |s: &str| Ok(s.chars().next()),
        );
        assert_eq!(get_tokens(&map, "a b a", |r| r.to_string()), Ok(vec!['a', 'b', 'a']));
        assert_eq!(
            get_tokens(&map, "a c", |r| r.to_string()),
            Err("c".to_string())
        );
        assert_eq!(expected_any(&map), "' ', or one of 'a', or 'b'");
    }
}
