// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tagged message format and the message-pattern extractor.
//!
//! Every classified message starts with
//! `[<type prefix><reason code> <reason text>: ` followed by a free-form
//! body. Services re-derive a classification from a message they received
//! by running [`extract_classification`] over it; [`extract_body`] recovers
//! the body so that re-tagging never nests prefixes.

use crate::failure::FieldViolation;
use crate::kind::{ErrorType, ServiceStatusCode};
use regex::Regex;
use std::sync::LazyLock;

/// Body used when nothing more specific can be derived.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred.";

/// Body used for a null dereference outside the application namespace.
pub const NULL_DEREFERENCE_FALLBACK: &str =
    "NullPointerException occurred. Please check for uninitialized objects.";

/// Leading text of a validation-failure body.
pub const VALIDATION_FAILED: &str = "Validation failed: ";

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(FS_[A-Z_]+)([0-9]+)").expect("tag pattern compiles"));

static BODY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\[.+?: (.*)").expect("body pattern compiles"));

/// The `[<prefix><code> <text>: ` tag for a classification.
pub fn format_prefix(error_type: ErrorType, reason: ServiceStatusCode) -> String {
    format!(
        "[{}{} {}: ",
        error_type.prefix(),
        reason.code(),
        reason.text()
    )
}

/// Tag `body` with a classification.
pub fn format_message(error_type: ErrorType, reason: ServiceStatusCode, body: &str) -> String {
    let mut message = format_prefix(error_type, reason);
    message.push_str(body);
    message
}

/// Re-derive `(type, reason)` from a tagged message.
///
/// The prefix and the digits are looked up independently: an unknown prefix
/// yields [`ErrorType::System`], an unknown or oversized code yields
/// [`ServiceStatusCode::SystemException`]. A message without any tag yields
/// that default pair.
pub fn extract_classification(message: &str) -> (ErrorType, ServiceStatusCode) {
    let Some(caps) = TAG_PATTERN.captures(message) else {
        return (ErrorType::System, ServiceStatusCode::SystemException);
    };

    let error_type = caps
        .get(1)
        .and_then(|m| ErrorType::from_prefix(m.as_str()))
        .unwrap_or(ErrorType::System);
    let reason = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .and_then(ServiceStatusCode::from_code)
        .unwrap_or(ServiceStatusCode::SystemException);

    (error_type, reason)
}

/// Body of a tagged message, i.e. everything after the first `": "` of a
/// message that starts with `[`.
pub fn extract_body(message: &str) -> Option<&str> {
    BODY_PATTERN
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `Validation failed: a: x, b: y`, in reported order.
pub fn validation_message(violations: &[FieldViolation]) -> String {
    let joined = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{VALIDATION_FAILED}{joined}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
