//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while setting up validation or scoring
///
/// Validating a record never fails; these only cover bad configuration.
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The national id pattern is not a valid regular expression
    #[error("Invalid national id pattern: {0}")]
    Pattern(#[from] regex::Error),
}
