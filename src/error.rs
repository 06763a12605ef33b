use thiserror::Error;

/// Failures talking to the browser's key-value storage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("local storage is not available in this browser")]
    Unavailable,

    #[error("could not read key `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("could not write key `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("stored value under `{key}` is not valid: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("could not encode value for `{key}`: {reason}")]
    Serialize { key: String, reason: String },
}

/// Reasons a submitted transaction form is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DraftError {
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),

    #[error("Amount must be a number.")]
    InvalidAmount,

    #[error("Amount cannot be negative.")]
    NegativeAmount,

    #[error("Date must be in YYYY-MM-DD format.")]
    InvalidDate,
}
