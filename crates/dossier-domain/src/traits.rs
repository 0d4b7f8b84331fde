//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the reconciliation logic and
//! the slow, fallible services around it. Implementations live in other
//! crates (dossier-llm, dossier-intake) or in tests.

use crate::{ExtractedFields, Priority};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A document handed to the extraction collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInput {
    /// Raw document bytes (usually a photo)
    pub bytes: Vec<u8>,

    /// Declared MIME type, e.g. `image/jpeg`
    pub mime_type: String,
}

impl DocumentInput {
    /// Create a new document input
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Size of the document in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the document has no content
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Category proposed for a new client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestion {
    /// Proposed category
    pub suggested_category: String,

    /// Short explanation shown to the operator
    pub reason: String,

    /// Proposed handling priority
    pub priority: Priority,
}

/// Turns document bytes into structured-but-unreliable field guesses
///
/// Implemented by the application layer (dossier-intake) on top of an LLM,
/// or by test doubles.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Error type for extraction operations
    type Error: fmt::Display + Send;

    /// Extract fields from a document
    async fn extract(&self, document: &DocumentInput) -> Result<ExtractedFields, Self::Error>;
}

/// Proposes a case category for freshly extracted fields
#[async_trait]
pub trait CategorySuggester: Send + Sync {
    /// Error type for suggestion operations
    type Error: fmt::Display + Send;

    /// Suggest a category
    async fn suggest(&self, fields: &ExtractedFields) -> Result<CategorySuggestion, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (dossier-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: fmt::Display + Send;

    /// Generate a text completion
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate a completion for a prompt about an attached image
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &DocumentInput,
    ) -> Result<String, Self::Error>;
}
