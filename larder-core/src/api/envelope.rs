use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::RawResponse;

/// Wrapper every backend response uses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    pub result: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Envelope of a confirmation response, where `result` may be left out.
#[derive(Debug, Deserialize)]
struct TextEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<Value>,
}

/// Turn a non-success response into `ClientError::Api`.
///
/// The message is the body's `message` when the body is JSON carrying one,
/// otherwise a generic text naming the status code.
pub(crate) fn error_from_response(response: &RawResponse) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", response.status));

    ClientError::Api {
        code: response.status,
        message,
    }
}

/// Unwrap `result` from a success response, or convert a failure.
pub(crate) fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ClientError> {
    if !response.is_success() {
        return Err(error_from_response(response));
    }

    let envelope: Envelope<T> = serde_json::from_slice(&response.body)
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    if let Some(message) = &envelope.message {
        tracing::debug!(code = ?envelope.code, message = %message, "backend message");
    }
    Ok(envelope.result)
}

/// Unwrap a confirmation (deletes). Numbers are rendered as text.
///
/// An empty body or a missing/null `result` still means success; the text is
/// then the envelope's `message`, or empty.
pub(crate) fn decode_text(response: &RawResponse) -> Result<String, ClientError> {
    if !response.is_success() {
        return Err(error_from_response(response));
    }
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(String::new());
    }

    let envelope: TextEnvelope = serde_json::from_slice(&response.body)
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    match envelope.result {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Null) | None => Ok(envelope.message.unwrap_or_default()),
        Some(other) => Ok(other.to_string()),
    }
}
