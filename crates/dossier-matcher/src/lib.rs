//! Dossier Matcher
//!
//! Decides whether freshly extracted identity fields describe a client who is
//! already in the registry.
//!
//! Each existing record earns independent bonuses for an exact document
//! number, a similar name, and an equal birth date. The best-scoring record
//! is reported, and it counts as a duplicate once its score reaches the
//! policy cutoff. With the default policy a matching document number alone
//! is enough, while a similar name needs a second corroborating signal.
//!
//! # Examples
//!
//! ```
//! use dossier_matcher::DuplicateMatcher;
//! use dossier_domain::{ClientId, ExistingRecord, ExtractedFields};
//!
//! let existing = vec![
//!     ExistingRecord::new(ClientId::from_value(1), "Someone Else")
//!         .with_document_number("12345678A"),
//! ];
//! let fields = ExtractedFields {
//!     full_name: "Ana García".to_string(),
//!     document_number: "12345678A".to_string(),
//!     ..Default::default()
//! };
//!
//! let result = DuplicateMatcher::default().find_duplicate(&fields, &existing);
//! assert!(result.is_duplicate);
//! assert_eq!(result.match_score, 100);
//! ```

#![warn(missing_docs)]

mod error;
mod matcher;
mod policy;
pub mod similarity;

pub use error::MatcherError;
pub use matcher::{CandidateScore, DuplicateMatcher, MatchField, MatchResult};
pub use policy::MatchPolicy;
