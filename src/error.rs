//! Structured error types for the resume renderer.
//!
//! Three variants cover the real error sources: profile JSON parsing, the
//! size guard applied at the call boundary, and PDF generation failures.

use thiserror::Error;

/// The unified error type returned by all public cvpdf API functions.
#[derive(Debug, Error)]
pub enum CvError {
    /// JSON input failed to parse as a valid profile record.
    #[error("Failed to parse profile: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// A profile sequence or text field exceeds the configured limit.
    #[error("Profile field `{field}` is too large: {len} > {max}")]
    InputTooLarge {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// The document could not be serialized. No partial output is produced.
    #[error("Generation failed: {0}")]
    Generation(String),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for CvError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the profile schema. firstName, lastName and email are required.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        CvError::Parse { source: e, hint }
    }
}

impl From<std::io::Error> for CvError {
    fn from(e: std::io::Error) -> Self {
        CvError::Generation(e.to_string())
    }
}
