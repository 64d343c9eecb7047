use thiserror::Error;

/// Failures surfaced to the user at the call boundary.
///
/// `Display` is the message shown inline; none of these end the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadmeError {
    #[error("Project plan cannot be empty.")]
    EmptyInput,
    #[error("API key is not configured. Please set {0} in your environment.")]
    MissingCredential(String),
    #[error("{message}")]
    HttpStatus { code: u16, message: String },
    #[error("Invalid response structure from AI. Please try again.")]
    InvalidResponseShape,
    #[error("No README has been generated yet.")]
    NoDocument,
    #[error("no section with id {0} in the current document")]
    UnknownSection(String),
    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl ReadmeError {
    /// Maps a non-2xx endpoint response to a user-facing error.
    ///
    /// The categorized messages are only used when the body is a JSON object
    /// carrying an `error` member; anything else keeps the raw status.
    pub fn from_status(code: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let error = parsed.as_ref().and_then(|v| v.get("error"));
        let message = match error {
            None => format!("API request failed with status: {code}"),
            Some(err) => match code {
                503 => "Gemini servers are currently overloaded. Please try again in a few moments.".to_string(),
                429 => "Rate limit reached. Please wait a moment before trying again.".to_string(),
                400 => "Invalid request. Please check your project plan and try again.".to_string(),
                401 | 403 => "API key issue. Please check your API key configuration.".to_string(),
                _ => err
                    .get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .unwrap_or("Unknown error occurred")
                    .to_string(),
            },
        };
        ReadmeError::HttpStatus { code, message }
    }
}
