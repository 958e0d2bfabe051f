use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Prefix the service puts on `explanation` when its model output could not
/// be parsed into structured JSON.
pub const PARSE_FAILURE_SENTINEL: &str = "Error: AI did not return valid JSON";

pub const VALIDATION_MESSAGE: &str =
    "Please provide both the code snippet and a description of the desired change.";

pub const UNEXPECTED_FORMAT_MESSAGE: &str =
    "Received an unexpected response format from the server.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub selected_code: String,
    pub user_prompt: String,
}

impl SuggestionRequest {
    /// Builds a request, rejecting inputs that are empty after trimming.
    /// The original (untrimmed) text is what gets sent.
    pub fn new(selected_code: impl Into<String>, user_prompt: impl Into<String>) -> Result<Self> {
        let request = Self {
            selected_code: selected_code.into(),
            user_prompt: user_prompt.into(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.selected_code.trim().is_empty() || self.user_prompt.trim().is_empty() {
            return Err(Error::validation(VALIDATION_MESSAGE));
        }
        Ok(())
    }
}

/// Body of a `/suggest` response as sent on the wire. Fields that are
/// missing, null, non-string or empty all decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub suggested_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WelcomeResponse {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub message: Option<String>,
}

/// A validated suggestion: both parts are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub explanation: String,
    pub suggested_code: String,
}

impl TryFrom<SuggestionResponse> for Suggestion {
    type Error = Error;

    fn try_from(response: SuggestionResponse) -> Result<Self> {
        match response {
            SuggestionResponse {
                explanation: Some(explanation),
                suggested_code: Some(suggested_code),
            } => Ok(Self {
                explanation,
                suggested_code,
            }),
            SuggestionResponse {
                explanation: Some(explanation),
                ..
            } if explanation.starts_with(PARSE_FAILURE_SENTINEL) => {
                Err(Error::malformed(explanation))
            }
            _ => Err(Error::malformed(UNEXPECTED_FORMAT_MESSAGE)),
        }
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}
