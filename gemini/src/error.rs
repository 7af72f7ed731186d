use std::fmt;

use serde::Deserialize;

/// Errors raised by the Gemini backend.
#[derive(Debug)]
pub enum GeminiError {
    /// HTTP transport errors.
    Http(reqwest::Error),
    /// Non-success status, with the friendliest message the error body
    /// allowed us to build.
    Status {
        /// HTTP status code.
        status: u16,
        /// User-facing message.
        message: String,
    },
    /// JSON serialization/deserialization problems.
    Json(serde_json::Error),
    /// The response carried no content part with inline image data.
    NoImage,
    /// API level errors or unsupported operations.
    Api(String),
}

/// Gemini API error response structure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: Option<String>,
    pub status: Option<String>,
}

impl ApiErrorResponse {
    pub(crate) fn friendly_message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        error.message.clone().or_else(|| error.status.clone())
    }
}

impl GeminiError {
    /// Build a status error, preferring the API error body's own message
    /// over the generic status-code mapping.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let from_body = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(|api| api.friendly_message());
        let message = from_body.unwrap_or_else(|| status_message(status));
        Self::Status { status, message }
    }
}

fn status_message(status: u16) -> String {
    match status {
        400 => "Invalid request".to_string(),
        401 => "Authentication failed - check your API key".to_string(),
        403 => "Access denied - check your API key permissions".to_string(),
        404 => "Model not found".to_string(),
        429 => "Rate limit exceeded - please wait before retrying".to_string(),
        500 => "Server error - please try again".to_string(),
        502 | 503 | 504 => "Service temporarily unavailable - please try again".to_string(),
        _ => format!("HTTP error {status}"),
    }
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => {
                if err.is_timeout() {
                    write!(f, "Request timed out - please try again")
                } else if err.is_connect() {
                    write!(f, "Network connection failed - check your internet connection")
                } else {
                    write!(f, "{err}")
                }
            }
            Self::Status { message, .. } => write!(f, "{message}"),
            Self::Json(err) => write!(f, "Invalid response format: {err}"),
            Self::NoImage => write!(f, "No image produced"),
            Self::Api(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for GeminiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_prefers_api_body_message() {
        let body = r#"{"error":{"message":"Quota exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let error = GeminiError::from_status(429, body);
        assert_eq!(error.to_string(), "Quota exhausted");
    }

    #[test]
    fn status_error_falls_back_to_generic_mapping() {
        let error = GeminiError::from_status(503, "not json");
        assert_eq!(
            error.to_string(),
            "Service temporarily unavailable - please try again"
        );
    }
}
