//! A minimal JSON parser: text is tokenized, then the token sequence is
//! interpreted by recursive descent into a [`Value`] tree.
//!
//! ```
//! use minijson::{parse_json, Value};
//!
//! let value = parse_json(r#"{"value":1.2,"array":[1,2]}"#).unwrap();
//! assert_eq!(value.get("value"), Some(&Value::Float(1.2)));
//! assert_eq!(value.get("array").and_then(|a| a.get_index(1)), Some(&Value::Integer(2)));
//! ```

use std::ops::{Bound, RangeBounds};

pub mod error;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod value;

pub use error::ParseError;
pub use value::Value;

fn get_bounds(bounds: impl RangeBounds<usize>) -> (usize, Option<usize>) {
    let min = match bounds.start_bound() {
        Bound::Included(n) => *n,
        Bound::Excluded(n) => *n + 1,
        Bound::Unbounded => 0,
    };
    let max = match bounds.end_bound() {
        Bound::Included(n) => n.checked_add(1),
        Bound::Excluded(n) => Some(*n),
        Bound::Unbounded => None,
    };
    (min, max)
}

/// How whitespace in the input is treated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Whitespace {
    /// Whitespace is skipped between tokens; string contents are untouched.
    BetweenTokens,
    /// Every space, tab, CR and LF is removed before lexing, including those
    /// inside string literals.
    StripAll,
}

impl Default for Whitespace {
    fn default() -> Self {
        Whitespace::BetweenTokens
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ParseOptions {
    pub whitespace: Whitespace,
    /// Accept `null` as an object or array value. Off by default: `null`
    /// lexes as a token but is not a valid value.
    pub allow_null: bool,
}

/// Parses a JSON object or array with default options.
pub fn parse_json(input: &str) -> Result<Value, ParseError> {
    parse_json_with(input, &ParseOptions::default())
}

pub fn parse_json_with(input: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    tracing::debug!(len = input.len(), whitespace = ?options.whitespace, "parsing json");

    let tokens = match options.whitespace {
        Whitespace::BetweenTokens => json::tokenize(input)?,
        Whitespace::StripAll => {
            let stripped: String = input
                .chars()
                .filter(|c| !json::lexer::WHITESPACE.contains(*c))
                .collect();
            json::tokenize(&stripped)?
        }
    };
    json::parse_with(&tokens, options)
}
