//! Error types for the interpreter and repair search.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Malformed instruction `{text}`: {reason}")]
    MalformedInstruction { text: String, reason: String },

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No single-instruction fix found after {attempts} attempts")]
    NoFixFound { attempts: usize },
}

impl Error {
    pub fn malformed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedInstruction {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Attach a 1-based line number to this error
    pub fn at_line(self, line: usize) -> Self {
        Error::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
