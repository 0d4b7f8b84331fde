//! Reading documents, field sets and registry snapshots from disk.

use crate::error::{CliError, Result};
use dossier_domain::{ExistingRecord, ExtractedFields};
use std::fs;
use std::path::Path;

/// Load a registry snapshot; no path means an empty registry.
pub fn load_registry(path: Option<&Path>) -> Result<Vec<ExistingRecord>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!("Invalid registry '{}': {}", path.display(), e))
    })
}

/// Load a JSON field set, as produced by an extractor.
pub fn load_fields(path: &Path) -> Result<ExtractedFields> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!("Invalid fields file '{}': {}", path.display(), e))
    })
}

/// Guess a document's MIME type from its extension.
pub fn guess_mime_type(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let mime_type = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        _ => {
            return Err(CliError::InvalidInput(format!(
                "Cannot tell the type of '{}'. Use --mime",
                path.display()
            )))
        }
    };
    Ok(mime_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::DocumentType;
    use std::path::PathBuf;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("id.JPG")).unwrap(), "image/jpeg");
        assert_eq!(guess_mime_type(Path::new("scan.png")).unwrap(), "image/png");
        assert!(guess_mime_type(Path::new("notes.txt")).is_err());
        assert!(guess_mime_type(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_no_registry_is_empty() {
        assert!(load_registry(None).unwrap().is_empty());
    }

    #[test]
    fn test_load_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(
            &path,
            r#"[
                { "id": "0190a1b2-0000-7000-8000-000000000001", "fullName": "Ana García", "birthDate": "1990-07-15" },
                { "id": "0190a1b2-0000-7000-8000-000000000002", "fullName": "John Smith", "documentNumber": "X1234567L" }
            ]"#,
        )
        .unwrap();

        let registry = load_registry(Some(&path)).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry[0].birth_date.is_some());
        assert_eq!(registry[1].document_number.as_deref(), Some("X1234567L"));
    }

    #[test]
    fn test_bad_registry_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(&path, r#"{ "not": "an array" }"#).unwrap();

        assert!(matches!(
            load_registry(Some(&path)),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = PathBuf::from("/definitely/not/here.json");
        assert!(matches!(load_fields(&path), Err(CliError::Io(_))));
    }

    #[test]
    fn test_load_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.json");
        fs::write(
            &path,
            r#"{ "fullName": "Ana García", "documentType": "DNI", "confidence": 77.6 }"#,
        )
        .unwrap();

        let fields = load_fields(&path).unwrap();
        assert_eq!(fields.full_name, "Ana García");
        assert_eq!(fields.document_type, DocumentType::NationalId);
        assert_eq!(fields.birth_date, "");
    }
}
