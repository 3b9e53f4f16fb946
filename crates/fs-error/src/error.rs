// SPDX-License-Identifier: MIT OR Apache-2.0
//! The classified error value and its wire-facing companions.

use crate::kind::{ErrorType, ServiceStatusCode};
use crate::message::{extract_classification, format_message, format_prefix};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClassifiedError
// ---------------------------------------------------------------------------

/// A failure normalised to `(type, reason, message)`.
///
/// The message always starts with the tag produced by
/// [`format_prefix`](crate::format_prefix), so any consumer can recover the
/// classification with [`extract_classification`].
///
/// ```
/// use fs_error::{ClassifiedError, ErrorType, ServiceStatusCode};
///
/// let err = ClassifiedError::with_reason(
///     ErrorType::Common,
///     ServiceStatusCode::NotFound,
///     "order 42",
/// );
/// assert_eq!(err.to_string(), "[FS_CM_3001 Resource not found: order 42");
/// assert_eq!(err.body(), "order 42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema, thiserror::Error)]
#[error("{message}")]
pub struct ClassifiedError {
    #[serde(rename = "type")]
    error_type: ErrorType,
    reason: ServiceStatusCode,
    message: String,
}

impl ClassifiedError {
    /// Tag a plain message with the default `(System, SystemException)` pair.
    pub fn new(message: impl AsRef<str>) -> Self {
        Self::with_reason(
            ErrorType::System,
            ServiceStatusCode::SystemException,
            message,
        )
    }

    /// Tag a plain message with an explicit classification.
    pub fn with_reason(
        error_type: ErrorType,
        reason: ServiceStatusCode,
        message: impl AsRef<str>,
    ) -> Self {
        Self {
            error_type,
            reason,
            message: format_message(error_type, reason, message.as_ref()),
        }
    }

    /// Re-derive a classification from an already tagged message.
    ///
    /// The message is kept verbatim; untagged input keeps its text but is
    /// re-tagged with the default pair.
    pub fn from_tagged(message: impl Into<String>) -> Self {
        let message = message.into();
        let (error_type, reason) = extract_classification(&message);
        if message.starts_with(&format_prefix(error_type, reason)) {
            Self {
                error_type,
                reason,
                message,
            }
        } else {
            Self::with_reason(error_type, reason, message)
        }
    }

    /// Failure category.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Specific reason.
    pub fn reason(&self) -> ServiceStatusCode {
        self.reason
    }

    /// Full tagged message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message with the leading tag removed.
    pub fn body(&self) -> &str {
        let prefix = format_prefix(self.error_type, self.reason);
        self.message.strip_prefix(&prefix).unwrap_or(&self.message)
    }

    /// Payload to hand to the next service hop.
    pub fn to_descriptor(&self) -> RemoteErrorDescriptor {
        RemoteErrorDescriptor {
            message: self.message.clone(),
        }
    }

    /// Client-facing response payload.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::from(self)
    }
}

// ---------------------------------------------------------------------------
// RemoteErrorDescriptor
// ---------------------------------------------------------------------------

/// Error payload received from a downstream service.
///
/// Only `message` is read; other fields of the payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RemoteErrorDescriptor {
    /// Previously formatted, tagged message.
    pub message: String,
}

impl RemoteErrorDescriptor {
    /// Wrap a received message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Parse a JSON response body.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ---------------------------------------------------------------------------
// ErrorResponse
// ---------------------------------------------------------------------------

/// Serialisable error payload for the response-building layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    /// Failure category.
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// Numeric type id.
    pub type_id: u8,
    /// Reason code.
    pub code: u32,
    /// Reason text.
    pub reason: String,
    /// Full tagged message.
    pub message: String,
}

impl From<&ClassifiedError> for ErrorResponse {
    fn from(err: &ClassifiedError) -> Self {
        Self {
            error_type: err.error_type,
            type_id: err.error_type.type_id(),
            code: err.reason.code(),
            reason: err.reason.text().to_string(),
            message: err.message.clone(),
        }
    }
}

impl From<ErrorResponse> for RemoteErrorDescriptor {
    fn from(resp: ErrorResponse) -> Self {
        Self {
            message: resp.message,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
