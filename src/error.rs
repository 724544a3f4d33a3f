/// Failure of any stage of a parse. Carries no position information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid json given")]
    InvalidJson,
    #[error("unterminated string literal")]
    UnterminatedString,
}
