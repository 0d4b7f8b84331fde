//! Matcher error types

use thiserror::Error;

/// Errors that can occur while configuring the matcher
#[derive(Error, Debug)]
pub enum MatcherError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
