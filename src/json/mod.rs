//! The JSON front end: [`lexer`] turns text into [`token::Token`]s and
//! [`parser`] turns those into a [`Value`](crate::Value) tree.

pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::tokenize;
pub use parser::{parse, parse_with};
