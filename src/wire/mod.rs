use serde::{Deserialize, Serialize};

use crate::errors::ReadmeError;

/// ========================================
/// generateContent request/response shapes
/// ========================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// A single user turn carrying `prompt`.
    pub fn user(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`, if present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}

/// Pulls the generated text out of a raw 2xx response body.
pub fn extract_text(body: &str) -> Result<String, ReadmeError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|_| ReadmeError::InvalidResponseShape)?;
    parsed
        .first_text()
        .map(str::to_string)
        .ok_or(ReadmeError::InvalidResponseShape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::user("hi")).unwrap();
        assert_eq!(
            body,
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }] })
        );
    }

    #[test]
    fn test_extract_text() {
        let body = r##"{"candidates":[{"content":{"role":"model","parts":[{"text":"# Hello"}]}}]}"##;
        assert_eq!(extract_text(body), Ok("# Hello".to_string()));
    }

    #[test]
    fn test_extract_text_missing_candidates() {
        assert_eq!(extract_text(r#"{"candidates":[]}"#), Err(ReadmeError::InvalidResponseShape));
        assert_eq!(extract_text("{}"), Err(ReadmeError::InvalidResponseShape));
    }

    #[test]
    fn test_extract_text_missing_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[]}}]}"#;
        assert_eq!(extract_text(body), Err(ReadmeError::InvalidResponseShape));
        let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        assert_eq!(extract_text(body), Err(ReadmeError::InvalidResponseShape));
    }

    #[test]
    fn test_extract_text_not_json() {
        assert_eq!(extract_text("not json"), Err(ReadmeError::InvalidResponseShape));
    }
}
