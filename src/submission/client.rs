//! HTTP client for the document generation endpoint.
//!
//! One `POST` per submission with the payload as JSON. A 2xx body is the
//! generated file; any other status carries `{"error": "..."}`. No retries and
//! no timeout beyond what the transport applies.

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use thiserror::Error;

use super::sink::DeliveryError;
use crate::form::SubmissionPayload;

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate PDF";

/// A file returned by the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Message reported by the endpoint, verbatim.
    #[error("{0}")]
    Server(String),
    /// Non-2xx response without a readable `error` message.
    #[error("Failed to generate PDF")]
    Generic { status: u16 },
    /// No response, or a response body that could not be read.
    #[error("Failed to generate PDF")]
    Transport(#[source] reqwest::Error),
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0}")]
    Delivery(#[from] DeliveryError),
}

impl SubmissionError {
    /// The text shown to the user.
    pub fn user_message(&self) -> String {
        format!("Error generating PDF: {}", self)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Interpret a non-2xx body.
pub fn parse_error_body(status: u16, body: &[u8]) -> SubmissionError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.is_empty() => SubmissionError::Server(message),
        _ => SubmissionError::Generic { status },
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionClient {
    endpoint: String,
    http_client: reqwest::Client,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send(&self, payload: &SubmissionPayload) -> Result<GeneratedFile, SubmissionError> {
        let body = payload.to_json()?;
        log::info!(
            "submitting {} fields to {}",
            payload.len(),
            self.endpoint
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                log::error!("generation request failed: {}", e);
                SubmissionError::Transport(e)
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            log::error!("failed to read generation response: {}", e);
            SubmissionError::Transport(e)
        })?;

        if status.is_success() {
            let filename = payload.download_filename();
            log::info!("received {} ({} bytes)", filename, bytes.len());
            Ok(GeneratedFile {
                filename,
                bytes: bytes.to_vec(),
            })
        } else {
            let error = parse_error_body(status.as_u16(), &bytes);
            log::warn!("generation endpoint returned {}: {}", status, error);
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_is_surfaced_verbatim() {
        let error = parse_error_body(400, br#"{"error":"bad request"}"#);
        assert_eq!(error.to_string(), "bad request");
        assert_eq!(error.user_message(), "Error generating PDF: bad request");
    }

    #[test]
    fn test_unparsable_error_body_falls_back() {
        let error = parse_error_body(500, b"<html>Internal Server Error</html>");
        assert!(matches!(error, SubmissionError::Generic { status: 500 }));
        assert_eq!(error.to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_missing_error_key_falls_back() {
        let error = parse_error_body(404, br#"{"message":"nope"}"#);
        assert_eq!(error.to_string(), GENERIC_FAILURE_MESSAGE);
        let error = parse_error_body(404, br#"{"error":""}"#);
        assert_eq!(error.to_string(), GENERIC_FAILURE_MESSAGE);
    }
}
