use reqwest::StatusCode;
use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Errors that may be returned when calling a Canvas endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client encountered an error.
    #[error("Unable to send the request")]
    HttpClient(#[from] reqwest::Error),
    /// Unable to parse the JSON in the response.
    #[error("Unable to parse the response")]
    Decode(#[from] serde_json::Error),
    /// The server rejected our access token.
    #[error("Unauthorized: {0}")]
    Unauthorized(ErrorEnvelope),
    /// A catch-all for any other unsuccessful status code.
    #[error("The server responded with {}", status)]
    Status { status: StatusCode, body: String },
}

impl ApiError {
    /// The HTTP status code the server responded with, if we got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::HttpClient(e) => e.status(),
            ApiError::Decode(_) => None,
            ApiError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            ApiError::Status { status, .. } => Some(*status),
        }
    }
}

/// The body Canvas sends back when it refuses a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub errors: Vec<ErrorMessage>,
}

impl ErrorEnvelope {
    /// Each of the error messages Canvas sent back.
    pub fn messages(&self) -> impl Iterator<Item = &'_ str> + '_ {
        self.errors.iter().map(|e| e.message.as_str())
    }
}

impl Display for ErrorEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "{}", self.status);
        }

        for (i, message) in self.messages().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", message)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(default)]
    pub message: String,
}
