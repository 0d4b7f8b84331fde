//! Dossier LLM Provider Layer
//!
//! Pluggable generative-model providers behind the `LlmProvider` trait from
//! `dossier-domain`. The intake crate builds prompts and parses answers; this
//! crate only moves text and images to a model and back.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration (vision models supported)
//!
//! # Examples
//!
//! ```
//! use dossier_llm::MockProvider;
//! use dossier_domain::traits::LlmProvider;
//!
//! # async fn example() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use dossier_domain::traits::LlmProvider as LlmProviderTrait;
use dossier_domain::DocumentInput;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls. Image
/// prompts are answered the same way as text prompts; the provider records
/// how many images it was shown.
///
/// # Examples
///
/// ```
/// use dossier_llm::MockProvider;
/// use dossier_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// assert_eq!(rt.block_on(provider.generate("prompt1")).unwrap(), "response1");
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
    images_seen: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            images_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every call
    pub fn failing(message: impl Into<String>) -> Self {
        let provider = Self::new("");
        provider.set_default_error(message);
        provider
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Err("Mock error".to_string()));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// MIME types of every image the provider was shown, in call order
    pub fn images_seen(&self) -> Vec<String> {
        lock(&self.images_seen).clone()
    }

    fn set_default_error(&self, message: impl Into<String>) {
        lock(&self.responses).insert(DEFAULT_ERROR_KEY.to_string(), Err(message.into()));
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        *lock(&self.call_count) += 1;

        let responses = lock(&self.responses);
        let configured = responses
            .get(prompt)
            .or_else(|| responses.get(DEFAULT_ERROR_KEY));

        match configured {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(LlmError::Other(message.clone())),
            None => Ok(self.default_response.clone()),
        }
    }
}

/// Sentinel key for "every prompt fails"
const DEFAULT_ERROR_KEY: &str = "\u{0}__mock_default_error__";

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt)
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &DocumentInput,
    ) -> Result<String, Self::Error> {
        lock(&self.images_seen).push(image.mime_type.clone());
        self.respond(prompt)
    }
}

/// Mock state stays usable even if a test thread panicked while holding it
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
