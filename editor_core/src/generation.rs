//! Interface to the generative backend.
//!
//! The backend itself lives outside this crate. This module defines what the
//! core needs from it and how its JSON answers become [`ProjectFile`]s.

use crate::error::{GenerationError, ProjectError};
use crate::project::ProjectFile;
use crate::syntax::Language;
use serde::Deserialize;

/// A service that turns a prompt into project files.
pub trait ProjectGenerator {
    /// Generates a project. `has_custom_image` asks the backend to emit the
    /// custom image marker where the user's image belongs.
    fn generate(&self, prompt: &str, has_custom_image: bool) -> Result<Vec<ProjectFile>, GenerationError>;

    /// Rewrites a short prompt into a detailed one.
    fn enhance_prompt(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Enhances `prompt`, falling back to the original on any failure.
pub fn enhance_or_original(generator: &dyn ProjectGenerator, prompt: &str) -> String {
    match generator.enhance_prompt(prompt) {
        Ok(improved) if !improved.trim().is_empty() => improved.trim().to_string(),
        Ok(_) => prompt.to_string(),
        Err(e) => {
            log::warn!("Prompt enhancement failed: {}", e);
            prompt.to_string()
        }
    }
}

/// Returns the trimmed prompt, or `None` if there is nothing to generate from.
pub fn normalize_prompt(prompt: &str) -> Option<&str> {
    let prompt = prompt.trim();
    (!prompt.is_empty()).then_some(prompt)
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    files: Vec<GeneratedFile>,
}

#[derive(Debug, Deserialize)]
struct GeneratedFile {
    filename: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    content: String,
}

/// Parses the backend's `{"files": [...]}` answer.
///
/// Markdown code fences around the JSON are tolerated. Files come back with
/// empty histories; a missing language tag is inferred from the filename.
pub fn parse_generation_response(text: &str) -> Result<Vec<ProjectFile>, GenerationError> {
    let json = strip_code_fence(text.trim());
    if json.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let response: GenerationResponse = serde_json::from_str(json)?;
    let mut files: Vec<ProjectFile> = Vec::with_capacity(response.files.len());
    for generated in response.files {
        if files.iter().any(|f| f.filename() == generated.filename) {
            return Err(ProjectError::DuplicateFilename(generated.filename).into());
        }
        let language = if generated.language.trim().is_empty() {
            Language::from_filename(&generated.filename)
        } else {
            Language::from_tag(&generated.language)
        };
        files.push(ProjectFile::new(generated.filename, language, generated.content));
    }

    log::debug!("Parsed {} generated files", files.len());
    Ok(files)
}

fn strip_code_fence(text: &str) -> &str {
    let body = if let Some(rest) = text.strip_prefix("```json") {
        rest
    } else if let Some(rest) = text.strip_prefix("```") {
        rest
    } else {
        return text;
    };
    let body = body.trim_start();
    body.strip_suffix("```").unwrap_or(body).trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r##"{"files": [
        {"filename": "index.html", "language": "html", "content": "<h1>Hi</h1>"},
        {"filename": "server.py", "language": "", "content": "print(1)"},
        {"filename": "notes.md", "language": "markdown", "content": "# x"}
    ]}"##;

    #[test]
    fn test_parse_plain() {
        let files = parse_generation_response(RESPONSE).unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].language(), Language::Html);
        assert_eq!(files[0].content(), "<h1>Hi</h1>");
        assert_eq!(files[1].language(), Language::Python);
        assert_eq!(files[2].language(), Language::Other);
        assert!(files.iter().all(|f| f.history().is_empty()));
    }

    #[test]
    fn test_parse_fenced() {
        let fenced = format!("```json\n{}\n```", RESPONSE);
        assert_eq!(parse_generation_response(&fenced).unwrap().len(), 3);

        let fenced = format!("  ```\n{}```  ", RESPONSE);
        assert_eq!(parse_generation_response(&fenced).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_missing_files_key() {
        assert!(parse_generation_response("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_generation_response("   "),
            Err(GenerationError::EmptyResponse)
        ));
        assert!(matches!(
            parse_generation_response("```json\n```"),
            Err(GenerationError::EmptyResponse)
        ));
        assert!(matches!(
            parse_generation_response("{\"files\": ["),
            Err(GenerationError::InvalidJson(_))
        ));

        let dup = r#"{"files": [{"filename": "a.js"}, {"filename": "a.js"}]}"#;
        assert!(matches!(
            parse_generation_response(dup),
            Err(GenerationError::Project(ProjectError::DuplicateFilename(name))) if name == "a.js"
        ));
    }

    struct Flaky;

    impl ProjectGenerator for Flaky {
        fn generate(&self, _prompt: &str, _has_custom_image: bool) -> Result<Vec<ProjectFile>, GenerationError> {
            Err(GenerationError::Backend("offline".to_string()))
        }

        fn enhance_prompt(&self, prompt: &str) -> Result<String, GenerationError> {
            if prompt == "blank" {
                Ok("   ".to_string())
            } else {
                Err(GenerationError::Backend("offline".to_string()))
            }
        }
    }

    #[test]
    fn test_enhance_falls_back() {
        assert_eq!(enhance_or_original(&Flaky, "a shop"), "a shop");
        assert_eq!(enhance_or_original(&Flaky, "blank"), "blank");
    }

    #[test]
    fn test_normalize_prompt() {
        assert_eq!(normalize_prompt("  a blog "), Some("a blog"));
        assert_eq!(normalize_prompt(" \n "), None);
    }
}
