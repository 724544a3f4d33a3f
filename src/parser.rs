use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::ParseError;

/// A parser over a token slice. On success it returns how many tokens it
/// consumed alongside its output.
pub trait Parser {
    type Token;
    type Output;

    fn parse(&self, input: &[Self::Token]) -> Result<(usize, Self::Output), ParseError>;

    fn expected(&self) -> String;
}

pub type RcParser<T, O> = Rc<dyn Parser<Token = T, Output = O>>;

pub struct Terminal<Token, Output, F>
where
    F: Fn(&Token) -> Option<Output>,
{
    description: &'static str,
    matcher: F,
    _marker: PhantomData<fn(&Token) -> Output>,
}

impl<Token, Output, F> Parser for Terminal<Token, Output, F>
where
    F: Fn(&Token) -> Option<Output>,
{
    type Output = Output;
    type Token = Token;

    fn parse(&self, input: &[Self::Token]) -> Result<(usize, Self::Output), ParseError> {
        input
            .first()
            .and_then(|token| (self.matcher)(token))
            .map(|value| (1, value))
            .ok_or_else(|| {
                tracing::debug!(
                    expected = self.description,
                    remaining = input.len(),
                    "token did not match"
                );
                ParseError::InvalidJson
            })
    }

    fn expected(&self) -> String {
        self.description.to_string()
    }
}

pub fn terminal<Token, Output, F>(description: &'static str, matcher: F) -> RcParser<Token, Output>
where
    Token: 'static,
    Output: 'static,
    F: 'static + Fn(&Token) -> Option<Output>,
{
    Rc::new(Terminal {
        description,
        matcher,
        _marker: PhantomData,
    })
}

pub mod prelude {
    pub use super::terminal;
    pub use super::Parser;
    pub use super::RcParser;
}
