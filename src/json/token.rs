#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bracket {
    Open,
    Close,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Punctuation {
    Comma,
    Colon,
    Square(Bracket),
    Curly(Bracket),
}

impl Punctuation {
    pub const CHARS: &'static str = "{}[],:";

    pub fn from_char(c: char) -> Option<Punctuation> {
        match c {
            '{' => Some(Punctuation::Curly(Bracket::Open)),
            '}' => Some(Punctuation::Curly(Bracket::Close)),
            '[' => Some(Punctuation::Square(Bracket::Open)),
            ']' => Some(Punctuation::Square(Bracket::Close)),
            ',' => Some(Punctuation::Comma),
            ':' => Some(Punctuation::Colon),
            _ => None,
        }
    }
}

/// A lexical unit of a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Punct(Punctuation),
    /// Contents between the quotes, taken verbatim.
    StringLiteral(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}
