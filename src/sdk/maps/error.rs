use serde::Deserialize;
use thiserror::Error;

// Top-level envelope every Maps web service response carries
#[derive(Deserialize, Debug)]
pub struct StatusEnvelope {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Error, Debug)]
pub enum MapsError {
    // Structured failure reported by the service itself (REQUEST_DENIED, OVER_QUERY_LIMIT, ...)
    #[error("API Error ({status}): {message}")]
    Api { status: String, message: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl MapsError {
    /// Turns a non-success envelope into an error, or `None` for `OK` / `ZERO_RESULTS`.
    pub fn from_envelope(envelope: StatusEnvelope) -> Option<Self> {
        match envelope.status.as_str() {
            "OK" | "ZERO_RESULTS" => None,
            _ => Some(MapsError::Api {
                message: envelope
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string()),
                status: envelope.status,
            }),
        }
    }
}
