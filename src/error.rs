use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("generation cannot be set to a negative number: {0}")]
    InvalidGeneration(i64),

    #[error("unsupported pattern format: {0}")]
    UnsupportedFormat(String),

    #[error("illegal character {character:?} in cell block line: {line}")]
    IllegalCharacter { line: String, character: char },

    #[error("invalid cell block header: {0}")]
    InvalidCellBlock(String),

    #[error("invalid rule notation: {0}")]
    InvalidRule(String),
}

pub type Result<T> = std::result::Result<T, Error>;
