use crate::messages::{ResponseFormat, SaveReply, SaveRequest};

use kv_log_macro as log;
use std::fmt;

/// Maximum accepted response body: 1 MiB.
/// A save endpoint only ever answers with a short acknowledgement.
pub const MAX_RESPONSE_SIZE: usize = 1024 * 1024;

/// Why a save request failed.
///
/// Callers treat every variant the same way; the detail only feeds logs and
/// the optional error alert.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveError {
    /// The request never produced a response (connection refused, timeout, ...)
    Transport(String),
    /// The server answered with a non-success status
    Status { code: u16, body: String },
    /// The body did not match the expected response format
    MalformedResponse(String),
    /// Response body exceeds maximum allowed size
    ResponseTooLarge { size: usize, max: usize },
}

impl SaveError {
    /// The raw error payload, as surfaced to the user by an alert
    pub fn raw_payload(&self) -> String {
        match self {
            SaveError::Status { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Transport(msg) => write!(f, "Transport error: {}", msg),
            SaveError::Status { code, body } => {
                write!(f, "Server responded with status {}: {}", code, body)
            }
            SaveError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            SaveError::ResponseTooLarge { size, max } => {
                write!(
                    f,
                    "Response size {} bytes exceeds maximum {} bytes",
                    size, max
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::MalformedResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SaveError>;

/// Validates that a response length is within acceptable bounds
pub fn validate_response_size(length: usize) -> Result<()> {
    if length > MAX_RESPONSE_SIZE {
        log::error!(
            "Response size {} exceeds maximum {}",
            length,
            MAX_RESPONSE_SIZE
        );
        return Err(SaveError::ResponseTooLarge {
            size: length,
            max: MAX_RESPONSE_SIZE,
        });
    }
    Ok(())
}

pub fn encode_request(request: &SaveRequest) -> Result<Vec<u8>> {
    log::debug!("Encoding save request", { request: request });
    serde_json::to_vec(request).map_err(|e| SaveError::Transport(e.to_string()))
}

pub fn decode_reply(bytes: &[u8], format: ResponseFormat) -> Result<SaveReply> {
    validate_response_size(bytes.len())?;

    log::trace!("Decoding reply", { length: bytes.len() as u64 });

    match format {
        ResponseFormat::Json => Ok(SaveReply::Json(serde_json::from_slice(bytes)?)),
        ResponseFormat::Text => Ok(SaveReply::Text(
            String::from_utf8_lossy(bytes).into_owned(),
        )),
    }
}
