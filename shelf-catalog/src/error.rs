use thiserror::Error;

/// Malformed user input. Always recoverable: report it and carry on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required resource field was blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Filter criterion other than genre, tag or status
    #[error("Unknown filter criterion: {0} (expected genre, tag or status)")]
    UnknownCriterion(String),

    /// No sequence number is left for this id prefix
    #[error("No ids left for prefix '{0}'")]
    SequenceExhausted(String),

    /// Field name that is not part of the toggleable set
    #[error("Unknown field: {0}")]
    UnknownField(String),
}
