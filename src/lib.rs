//
// Copyright (c) 2024 Nathan Fiedler
//
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod actions;
pub mod config;
pub mod data;
pub mod domain;
pub mod presentation;

///
/// This type represents various errors that can occur within this crate.
///
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required post or user identifier was empty.
    #[error("Missing postId or userId")]
    MissingIdentifier,
    /// The backend service could not be reached or the exchange broke off.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend service answered with an error of its own.
    #[error("{message}")]
    Service { status: u16, message: String },
    /// A lookup that demands exactly one row matched some other number.
    /// The message is the one reported by the backend, when it gave one.
    #[error("{message}")]
    NotSingleRow { rows: usize, message: String },
    /// Error occurred during an SQL related operation.
    #[error("SQL error: {0}")]
    SQLError(#[from] rusqlite::Error),
    /// Error occurred while (de)serializing JSON.
    #[error("JSON error: {0}")]
    JSONError(#[from] serde_json::Error),
    /// Required settings were missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// An unexpected error occurred that would otherwise have been a panic.
    #[error("something bad happened: {0}")]
    InternalError(String),
}

impl Error {
    /// Single-row mismatch with the default message.
    pub fn not_single_row(rows: usize) -> Self {
        Error::NotSingleRow {
            rows,
            message: format!(
                "expected a single row but the result contains {} rows",
                rows
            ),
        }
    }

    ///
    /// Classify this error for callers that need more than the message.
    ///
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingIdentifier => ErrorKind::Validation,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Service { .. } | Error::NotSingleRow { .. } | Error::JSONError(_) => {
                ErrorKind::Service
            }
            Error::SQLError(_) => ErrorKind::Storage,
            Error::Configuration(_) | Error::InternalError(_) => ErrorKind::Internal,
        }
    }
}

///
/// Coarse classification of an `Error`, carried in failure envelopes.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input was rejected before any external call was made.
    Validation,
    /// The backend could not be reached.
    Transport,
    /// The backend rejected the request or returned something unusable.
    Service,
    /// The local database failed.
    Storage,
    /// Anything else.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Service => write!(f, "service"),
            ErrorKind::Storage => write!(f, "storage"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::MissingIdentifier.kind(), ErrorKind::Validation);
        assert_eq!(Error::not_single_row(0).kind(), ErrorKind::Service);
        let err = Error::Service {
            status: 401,
            message: "Invalid API key".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.to_string(), "Invalid API key");
        assert_eq!(
            Error::Configuration("oh no".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_missing_identifier_message() {
        assert_eq!(
            Error::MissingIdentifier.to_string(),
            "Missing postId or userId"
        );
    }

    #[test]
    fn test_error_kind_serde() -> Result<(), Error> {
        let text = serde_json::to_string(&ErrorKind::Transport)?;
        assert_eq!(text, "\"transport\"");
        let kind: ErrorKind = serde_json::from_str("\"validation\"")?;
        assert_eq!(kind, ErrorKind::Validation);
        assert_eq!(ErrorKind::Storage.to_string(), "storage");
        Ok(())
    }
}
