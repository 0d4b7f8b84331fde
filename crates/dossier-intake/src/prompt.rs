//! LLM prompts for document extraction and category suggestion

use dossier_domain::ExtractedFields;

/// Build the prompt sent along with a document image
pub fn extraction_prompt(mime_type: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(EXTRACTION_INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("The attached image is a {} file.\n\n", mime_type.trim()));
    prompt.push_str(EXTRACTION_FORMAT);

    prompt
}

/// Builds prompts asking the model to categorize a new client
pub struct CategoryPromptBuilder<'a> {
    fields: &'a ExtractedFields,
    categories: Vec<String>,
}

impl<'a> CategoryPromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(fields: &'a ExtractedFields) -> Self {
        Self {
            fields,
            categories: Vec::new(),
        }
    }

    /// Restrict the answer to a list of known categories
    pub fn with_categories(mut self, categories: &[String]) -> Self {
        self.categories = categories.to_vec();
        self
    }

    /// Build the complete suggestion prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(CATEGORY_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if !self.categories.is_empty() {
            prompt.push_str("Known categories:\n");
            for category in &self.categories {
                prompt.push_str(&format!("- {}\n", category));
            }
            prompt.push('\n');
        }

        // Only what the document says; nothing from the registry
        prompt.push_str("Client data read from the document:\n");
        prompt.push_str("---\n");
        let lines = [
            ("Nationality", &self.fields.nationality),
            ("Address", &self.fields.address),
            ("Gender", &self.fields.gender),
            ("Issue date", &self.fields.issue_date),
            ("Expiry date", &self.fields.expiry_date),
        ];
        prompt.push_str(&format!("Document type: {}\n", self.fields.document_type));
        for (label, value) in lines {
            if !value.trim().is_empty() {
                prompt.push_str(&format!("{}: {}\n", label, value.trim()));
            }
        }
        prompt.push_str("---\n\n");

        prompt.push_str(CATEGORY_FORMAT);
        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Read the identity document in the attached image and extract its fields.

Rules:
- Copy values exactly as printed; do not translate or correct them
- Leave a field as an empty string when it is missing or unreadable
- Write every date as DD/MM/YYYY
- documentType is one of: national-id, foreign-resident-id, passport, driving-license, other
- confidence is your own estimate, from 0 to 100, that the fields are read correctly"#;

const EXTRACTION_FORMAT: &str = r#"Output format (one JSON object only, no additional text):
{
  "fullName": "",
  "documentNumber": "",
  "documentType": "",
  "birthDate": "DD/MM/YYYY",
  "address": "",
  "nationality": "",
  "gender": "",
  "issueDate": "DD/MM/YYYY",
  "expiryDate": "DD/MM/YYYY",
  "confidence": 0
}"#;

const CATEGORY_INSTRUCTIONS: &str = r#"A new client has just been registered from an identity document.
Suggest the case category an operator should file them under, with a one-sentence reason and a handling priority.
Prefer one of the known categories when one fits."#;

const CATEGORY_FORMAT: &str = r#"Output format (one JSON object only, no additional text):
{
  "suggestedCategory": "",
  "reason": "",
  "priority": "low | medium | high"
}"#;
