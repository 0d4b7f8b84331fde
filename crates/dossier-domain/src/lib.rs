//! Dossier Domain Layer
//!
//! This crate contains the data model shared by every stage of the
//! identity-record reconciliation pipeline. It performs no I/O and defines
//! the trait interfaces through which the pipeline reaches external
//! collaborators (document extraction, category suggestion, LLM inference).
//!
//! ## Key Concepts
//!
//! - **ExtractedFields**: raw, untrusted field guesses read off a photographed
//!   identity document. Every field may be empty.
//! - **ConfidenceScore**: completeness heuristic in `[0, 95]`
//! - **ExistingRecord**: minimal projection of a client already in the registry
//! - **CanonicalRecord**: the normalized shape handed to persistence
//!
//! ## Architecture
//!
//! - Pure data and parsing logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client_id;
pub mod confidence;
pub mod date;
pub mod fields;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use client_id::ClientId;
pub use confidence::ConfidenceScore;
pub use date::{format_iso, parse_document_date, DateParseError};
pub use fields::{DocumentType, ExtractedFields};
pub use record::{
    CanonicalRecord, ClientStatus, ExistingRecord, KeyDates, Priority, RecordSource,
};
pub use traits::{CategorySuggester, CategorySuggestion, DocumentExtractor, DocumentInput, LlmProvider};
