//! Decode a JSON document and validate it against a typed schema

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Why a document was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JsonError {
    /// Text is not parseable JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    /// JSON is well-formed but does not match the expected shape
    #[error("failed to validate: {0}")]
    FailedToValidate(String),
}

/// Parse `text` as JSON, then validate it as `T`
///
/// The two steps are kept apart so that malformed text and well-formed but
/// foreign documents can be told apart.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, JsonError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| JsonError::InvalidJson(e.to_string()))?;

    serde_json::from_value(value).map_err(|e| JsonError::FailedToValidate(e.to_string()))
}
