//! Error types for the ESG core

use thiserror::Error;

/// ESG core error
#[derive(Debug, Error)]
pub enum Error {
    /// Score outside the 0-100 domain
    #[error("Score out of range: {0} (expected 0-100)")]
    ScoreOutOfRange(i64),

    /// Compliance flags payload of the wrong shape
    #[error("Malformed compliance flags: {0}")]
    MalformedFlags(String),

    /// Unknown criterion identifier
    #[error("Unknown criterion: {0}")]
    UnknownCriterion(String),

    /// Unknown risk level name
    #[error("Unknown risk level: {0}")]
    UnknownRiskLevel(String),

    /// File that is neither PDF nor DOCX
    #[error("{0} is not a valid file. Only PDF and DOCX files are allowed.")]
    UnsupportedDocument(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
