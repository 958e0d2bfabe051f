use crate::{Error, suggest::Suggestion};

/// Result of one `request_suggestion` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Success(Suggestion),
    ValidationError(String),
    RequestError { status: u16, message: String },
    MalformedResponse(String),
    NetworkError(String),
    /// A request was already in flight; nothing happened.
    Busy,
}

impl SuggestionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Message for the error panel, if this outcome renders one.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::RequestError { message, .. }
            | Self::MalformedResponse(message)
            | Self::NetworkError(message) => Some(message),
            _ => None,
        }
    }
}

impl From<Error> for SuggestionOutcome {
    fn from(error: Error) -> Self {
        let message = error.user_message();
        match error {
            Error::Validation(_) => Self::ValidationError(message),
            Error::Request { status, .. } => Self::RequestError { status, message },
            Error::MalformedResponse(_) | Error::Serialization(_) => {
                Self::MalformedResponse(message)
            }
            // transport and anything else the client surfaces
            _ => Self::NetworkError(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UNKNOWN_ERROR_MESSAGE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_error_keeps_status_and_detail() {
        let outcome = SuggestionOutcome::from(Error::request(500, "boom"));
        assert_eq!(
            outcome,
            SuggestionOutcome::RequestError {
                status: 500,
                message: "boom".to_string()
            }
        );
        assert_eq!(outcome.error_message(), Some("boom"));
    }

    #[test]
    fn test_empty_malformed_message_uses_fallback() {
        let outcome = SuggestionOutcome::from(Error::malformed(""));
        assert_eq!(outcome.error_message(), Some(UNKNOWN_ERROR_MESSAGE));
    }

    #[test]
    fn test_validation_and_busy_render_no_error() {
        let outcome = SuggestionOutcome::from(Error::validation("fill both"));
        assert_eq!(outcome, SuggestionOutcome::ValidationError("fill both".to_string()));
        assert_eq!(outcome.error_message(), None);
        assert_eq!(SuggestionOutcome::Busy.error_message(), None);
    }
}
