//! All error types for the localizables crate.
//!
//! These are returned from all fallible operations (parsing, merging, scanning, saving).

use std::path::PathBuf;

use thiserror::Error;

/// The structural reason a `.strings` entry was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    #[error("expected `\"` to open a key, found `{0}`")]
    ExpectedOpeningQuote(char),

    #[error("key is missing its closing `\"`")]
    UnterminatedKey,

    #[error("unexpected character between key and value: `{0}`")]
    UnexpectedCharacterBetweenKeyAndValue(char),

    #[error("unexpected character after closing `\"`: `{0}`")]
    UnexpectedCharacterAfterValue(char),

    #[error("block comment is never closed")]
    UnterminatedComment,

    #[error("file contains no entries")]
    NoEntries,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed entry at {line}:{column}: {kind}")]
    MalformedEntry {
        line: usize,
        column: usize,
        kind: MalformedKind,
    },

    #[error("unterminated value starting at {line}:{column}")]
    UnterminatedValue { line: usize, column: usize },

    #[error("language not found for {}", path.display())]
    LanguageNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk failed: {0}")]
    Walk(String),

    #[error("task failed: {0}")]
    Task(String),
}

impl Error {
    /// Returns `true` for errors raised by the `.strings` grammar.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedEntry { .. } | Error::UnterminatedValue { .. }
        )
    }
}

impl From<ignore::Error> for Error {
    fn from(value: ignore::Error) -> Self {
        Error::Walk(value.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Error::Task(value.to_string())
    }
}
