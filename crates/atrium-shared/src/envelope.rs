//! The uniform response envelope spoken by the upstream backend.
//!
//! On the wire every response is `{ data: ..., errors: [...] }` with exactly
//! one side populated. Callers never see that optional-field shape: decoding
//! goes straight to a tagged [`ApiResult`], so both branches must be handled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type every client operation resolves to.
pub type ApiResult<T> = Result<T, ApiError>;

/// A single validation failure tied to an (optional) field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// An error not attributable to any field (transport failures, etc.).
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Structured API failure: one or more field/message pairs, optionally
/// tagged with the upstream HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", self.joined_message())]
pub struct ApiError {
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            errors,
            status: None,
        }
    }

    /// Wrap a transport-level failure so callers only ever see the
    /// structured shape, never a raw client error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::message_only(message)])
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// All messages joined for display as a single notification line.
    pub fn joined_message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Raw wire shape of an upstream response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    pub fn err(errors: Vec<FieldError>) -> Self {
        Self {
            data: None,
            errors: Some(errors),
        }
    }

    /// Collapse the optional-field wire shape into a tagged result.
    ///
    /// A populated error list wins over a payload; an envelope with neither
    /// side populated is treated as a failure rather than silently yielding
    /// nothing.
    pub fn into_result(self) -> ApiResult<T> {
        match self.errors {
            Some(errors) if !errors.is_empty() => Err(ApiError::new(errors)),
            _ => match self.data {
                Some(data) => Ok(data),
                None => Err(ApiError::transport("empty response envelope")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_data_resolves_ok() {
        let envelope = Envelope::ok(42u32);
        assert_eq!(envelope.into_result().unwrap(), 42);
    }

    #[test]
    fn envelope_with_errors_resolves_err() {
        let envelope: Envelope<u32> = Envelope::err(vec![FieldError::new("name", "required")]);
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.joined_message(), "required");
    }

    #[test]
    fn errors_win_over_payload() {
        let envelope = Envelope {
            data: Some(1u32),
            errors: Some(vec![FieldError::message_only("conflict")]),
        };
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn empty_envelope_is_an_error() {
        let envelope: Envelope<u32> = Envelope {
            data: None,
            errors: None,
        };
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn joined_message_concatenates_fields() {
        let err = ApiError::new(vec![
            FieldError::new("name", "required"),
            FieldError::new("email", "invalid"),
        ]);
        assert_eq!(err.joined_message(), "required, invalid");
    }

    #[test]
    fn decodes_error_wire_shape() {
        let raw = r#"{"errors":[{"field":"name","message":"required"}]}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.errors[0].field.as_deref(), Some("name"));
    }
}
