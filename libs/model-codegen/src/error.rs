//! Error types for parsing and code generation

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while inserting into a class or enum.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate name '{name}' in '{owner}'")]
    DuplicateName { owner: String, name: String },

    #[error("enum value '{name}' has non-integer value '{value}'")]
    InvalidEnumValue {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("syntax error at line {line}: {message} (`{content}`)")]
    Syntax {
        line: usize,
        content: String,
        message: &'static str,
    },

    #[error("line {line}: {source} (`{content}`)")]
    Member {
        line: usize,
        content: String,
        #[source]
        source: ModelError,
    },

    #[error("received unsupported language '{0}'")]
    UnsupportedLanguage(String),

    #[error("tried to parse a file with wrong type: {0}. only .gen files are supported")]
    WrongExtension(PathBuf),

    #[error("cannot generate {language} code for '{owner}': {message}")]
    Generation {
        language: &'static str,
        owner: String,
        message: String,
    },

    #[error("writing generated file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// 1-based source line of a parse failure, if the error carries one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } | Error::Member { line, .. } => Some(*line),
            _ => None,
        }
    }
}
