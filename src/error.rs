//! Error types for this crate

use thiserror::Error;

/// Reasons why a task record (or a whole document) could not be decoded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date {0:?} (expected yyyy-MM-dd)")]
    InvalidDate(String),

    #[error("unknown category {0:?}")]
    UnknownCategory(String),

    #[error("invalid boolean {value:?} for field `{field}`")]
    InvalidBool { field: &'static str, value: String },

    #[error("syntax error at offset {position}: {message}")]
    Syntax { position: usize, message: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong passphrase, or corrupted ciphertext
    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("index {index} is out of range (the list contains {len} tasks)")]
    OutOfRange { index: usize, len: usize },

    #[error("postponing by {days} days leaves the supported date range")]
    DateOverflow { days: i64 },

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
