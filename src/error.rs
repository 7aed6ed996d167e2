//! Error types for the ranking engine
//!
//! Every failure originates from malformed or mutually inconsistent input, so
//! none of these are retried: the run aborts and no partial ranks are exposed.

use std::io;
use thiserror::Error;

/// Errors that can occur while indexing or iterating
#[derive(Error, Debug)]
pub enum DankerError {
    /// A sort key decreased relative to the prior group in a sorted edge file
    #[error("Input file \"{file}\" is not correctly sorted. \"{key}\" after \"{previous}\"")]
    OrderingViolation {
        file: String,
        key: String,
        previous: String,
    },

    /// An edge names a source that was never indexed as a source
    #[error("Input file \"{file}\" references predecessor \"{id}\" which has no outgoing edges in the index")]
    MissingPredecessor { file: String, id: String },

    /// A target-sorted row names a target absent from the node table
    #[error("Input file \"{file}\" references target \"{id}\" which is not in the index")]
    UnknownTarget { file: String, id: String },

    /// Rejected before any computation starts
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A line that is not `source<TAB>target`
    #[error("Malformed line {line} in \"{file}\": {reason}")]
    MalformedLine {
        file: String,
        line: u64,
        reason: String,
    },

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_yaml::Error> for DankerError {
    fn from(err: serde_yaml::Error) -> Self {
        DankerError::Config(err.to_string())
    }
}

pub type DankerResult<T> = Result<T, DankerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_violation_message() {
        let err = DankerError::OrderingViolation {
            file: "links.right".to_string(),
            key: "3".to_string(),
            previous: "7".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Input file \"links.right\" is not correctly sorted. \"3\" after \"7\""
        );
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = DankerError::InvalidArgument("iterations must be positive".to_string());
        assert!(err.to_string().contains("iterations must be positive"));
    }
}
