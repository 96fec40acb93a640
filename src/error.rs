use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidInput,
    EmptySequence,
    EmptyInput,
    Io,
    Parse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimerError {
    pub code: ErrorCode,
    pub message: String,
}

impl PrimerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn empty_sequence() -> Self {
        Self::new(
            ErrorCode::EmptySequence,
            "GC content is undefined for an empty sequence",
        )
    }

    pub fn empty_input() -> Self {
        Self::new(ErrorCode::EmptyInput, "No primer candidates to rank")
    }
}

impl fmt::Display for PrimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for PrimerError {}

impl From<std::io::Error> for PrimerError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorCode::Io, err.to_string())
    }
}

impl From<csv::Error> for PrimerError {
    fn from(err: csv::Error) -> Self {
        Self::new(ErrorCode::Parse, format!("Malformed table: {err}"))
    }
}

impl From<serde_json::Error> for PrimerError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::Parse, format!("Malformed JSON: {err}"))
    }
}
