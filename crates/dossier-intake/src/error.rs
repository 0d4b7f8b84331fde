//! Error types for intake

use dossier_gatekeeper::GatekeeperError;
use dossier_matcher::MatcherError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while taking in a document
///
/// Every variant except `Config` is an extraction failure: the invocation is
/// aborted before any record is produced.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// The extraction collaborator reported a failure
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// A collaborator did not answer in time
    #[error("Collaborator timed out after {0:?}")]
    Timeout(Duration),

    /// The model answered, but not in the expected shape
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Document has no content
    #[error("Document is empty")]
    EmptyDocument,

    /// Document exceeds maximum size
    #[error("Document too large: {0} bytes (max: {1})")]
    DocumentTooLarge(usize, usize),

    /// Declared MIME type is not accepted
    #[error("Unsupported MIME type: {0}")]
    UnsupportedMimeType(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for IntakeError {
    fn from(e: serde_json::Error) -> Self {
        IntakeError::JsonParse(e.to_string())
    }
}

impl From<GatekeeperError> for IntakeError {
    fn from(e: GatekeeperError) -> Self {
        IntakeError::Config(e.to_string())
    }
}

impl From<MatcherError> for IntakeError {
    fn from(e: MatcherError) -> Self {
        IntakeError::Config(e.to_string())
    }
}
