//! Dossier Intake
//!
//! Turns a photographed identity document into a canonical client record,
//! checked against the registry for probable duplicates.
//!
//! # Architecture
//!
//! ```text
//! Document → Extractor (LLM) → FieldValidator → ConfidenceScorer
//!          → DuplicateMatcher → CategorySuggester (LLM) → RecordMapper
//! ```
//!
//! Only extraction can fail an invocation. Validation produces warnings, a
//! failed category suggestion falls back to a default category, and a date
//! that does not parse is emitted empty.
//!
//! # Example Usage
//!
//! ```no_run
//! use dossier_intake::{
//!     IntakeConfig, LlmCategorySuggester, LlmDocumentExtractor, ReconciliationPipeline,
//! };
//! use dossier_domain::DocumentInput;
//! use dossier_llm::OllamaProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IntakeConfig::default();
//! let llm = Arc::new(OllamaProvider::default_endpoint("llava").with_json_output(true));
//!
//! let pipeline = ReconciliationPipeline::new(
//!     LlmDocumentExtractor::from_config(Arc::clone(&llm), &config),
//!     LlmCategorySuggester::from_config(llm, &config),
//!     config,
//! )?;
//!
//! let document = DocumentInput::new(std::fs::read("id-card.jpg")?, "image/jpeg");
//! let result = pipeline.reconcile(&document, &[]).await?;
//!
//! println!("Confidence: {}", result.confidence);
//! for warning in result.warnings() {
//!     println!("Warning: {}", warning);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod collaborators;
mod config;
mod error;
mod mapper;
mod parser;
mod pipeline;
mod prompt;
mod types;


pub use collaborators::{LlmCategorySuggester, LlmDocumentExtractor};
pub use config::{IntakeConfig, DEFAULT_CATEGORY};
pub use error::IntakeError;
pub use mapper::{compose_notes, normalize_birth_date, RecordMapper};
pub use parser::{parse_category_suggestion, parse_extracted_fields};
pub use pipeline::ReconciliationPipeline;
pub use types::{CategoryOutcome, PipelineStage, ReconciliationResult};
