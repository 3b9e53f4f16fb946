// SPDX-License-Identifier: MIT OR Apache-2.0
//! Failure classification rules and message assembly.

use crate::error::{ClassifiedError, RemoteErrorDescriptor};
use crate::failure::{Failure, FailureKind};
use crate::kind::{ErrorType, ServiceStatusCode};
use crate::message::{
    NULL_DEREFERENCE_FALLBACK, UNKNOWN_ERROR_MESSAGE, extract_body, extract_classification,
    format_prefix, validation_message,
};
use tracing::{debug, warn};

/// Namespace used to recognise the application's own stack frames when none
/// is configured.
pub const DEFAULT_APP_NAMESPACE: &str = "com.fs";

/// SQL keywords checked against a persistence failure's message, in priority
/// order. The first keyword found wins.
const SQL_KEYWORDS: [(&str, ServiceStatusCode); 4] = [
    ("insert", ServiceStatusCode::Insert),
    ("select", ServiceStatusCode::Read),
    ("update", ServiceStatusCode::Update),
    ("delete", ServiceStatusCode::Delete),
];

/// Markers of a value that could not be converted or deserialised.
const CONVERSION_MARKERS: [&str; 3] = [
    "Failed to convert ",
    "Cannot deserialize ",
    "Unrecognized field ",
];

/// Marker of a required value left empty.
const REQUIRED_MARKER: &str = "Required ";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Anything the classifier accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierInput {
    /// A plain message.
    Message(String),
    /// A caught failure, possibly with nested causes.
    Failure(Failure),
    /// A descriptor received from another service.
    Remote(RemoteErrorDescriptor),
}

impl From<&str> for ClassifierInput {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for ClassifierInput {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<Failure> for ClassifierInput {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

impl From<RemoteErrorDescriptor> for ClassifierInput {
    fn from(descriptor: RemoteErrorDescriptor) -> Self {
        Self::Remote(descriptor)
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Apply the classification rules to a failure.
///
/// Rules in priority order:
/// 1. nested SQL cause: `(Sql, Query)`, refined by the first of `insert`,
///    `select`, `update`, `delete` found in the message;
/// 2. missing parameter: `(System, NoParam)`;
/// 3. unreadable body / type mismatch: conversion markers give
///    `(System, ParamValidity)`, `"Required "` gives `(System, Null)`;
/// 4. validation failures: `(System, ParamValidity)`;
/// 5. re-raised classified error: re-extracted from its message;
/// 6. anything else: `(System, SystemException)`.
pub fn classification_of(failure: &Failure) -> (ErrorType, ServiceStatusCode) {
    const DEFAULT: (ErrorType, ServiceStatusCode) =
        (ErrorType::System, ServiceStatusCode::SystemException);

    if failure
        .cause
        .as_deref()
        .is_some_and(|c| matches!(c.kind, FailureKind::Sql))
    {
        return (ErrorType::Sql, sql_reason(failure.message()));
    }

    match &failure.kind {
        FailureKind::MissingParameter => (ErrorType::System, ServiceStatusCode::NoParam),
        FailureKind::UnreadableBody | FailureKind::TypeMismatch => {
            match conversion_reason(failure.message.as_deref()) {
                Some(reason) => (ErrorType::System, reason),
                None => DEFAULT,
            }
        }
        FailureKind::ArgumentNotValid(_) | FailureKind::ConstraintViolation(_) => {
            (ErrorType::System, ServiceStatusCode::ParamValidity)
        }
        FailureKind::Classified(previous) => extract_classification(previous.message()),
        FailureKind::Sql | FailureKind::NullDereference | FailureKind::Other => DEFAULT,
    }
}

fn sql_reason(message: Option<&str>) -> ServiceStatusCode {
    message
        .and_then(|m| {
            SQL_KEYWORDS
                .iter()
                .find(|(keyword, _)| m.contains(*keyword))
                .map(|(_, reason)| *reason)
        })
        .unwrap_or(ServiceStatusCode::Query)
}

fn conversion_reason(message: Option<&str>) -> Option<ServiceStatusCode> {
    let message = message?;
    if CONVERSION_MARKERS.iter().any(|m| message.contains(*m)) {
        Some(ServiceStatusCode::ParamValidity)
    } else if message.contains(REQUIRED_MARKER) {
        Some(ServiceStatusCode::Null)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Turns failures, plain messages, and remote descriptors into
/// [`ClassifiedError`]s.
///
/// Stateless apart from the application namespace, which identifies the
/// service's own stack frames in null-dereference messages.
///
/// ```
/// use fs_error::{Classifier, ErrorType, Failure, FailureKind, ServiceStatusCode};
///
/// let failure = Failure::new(FailureKind::Other, "org.springframework.dao.DataAccessException")
///     .with_message("update orders set ...")
///     .with_cause(Failure::new(FailureKind::Sql, "java.sql.SQLException").with_message("lock"));
/// let err = Classifier::default().classify(failure);
/// assert_eq!(err.error_type(), ErrorType::Sql);
/// assert_eq!(err.reason(), ServiceStatusCode::Update);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    app_namespace: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAMESPACE)
    }
}

impl Classifier {
    /// Create a classifier for the given application namespace.
    pub fn new(app_namespace: impl Into<String>) -> Self {
        Self {
            app_namespace: app_namespace.into(),
        }
    }

    /// Namespace prefix of the application's own frames.
    pub fn app_namespace(&self) -> &str {
        &self.app_namespace
    }

    /// Classify any supported input.
    pub fn classify(&self, input: impl Into<ClassifierInput>) -> ClassifiedError {
        match input.into() {
            ClassifierInput::Message(message) => self.classify_message(&message),
            ClassifierInput::Failure(failure) => self.classify_failure(&failure),
            ClassifierInput::Remote(descriptor) => self.classify_remote(&descriptor),
        }
    }

    /// Tag a plain message with the default classification.
    pub fn classify_message(&self, message: &str) -> ClassifiedError {
        ClassifiedError::new(message)
    }

    /// Re-classify a descriptor received from another service.
    ///
    /// The classification comes from the remote tag; only the remote body is
    /// kept so that tags do not nest across hops. A message without a tag is
    /// kept whole as the body under the default pair, so untagged upstream
    /// text is never lost.
    pub fn classify_remote(&self, descriptor: &RemoteErrorDescriptor) -> ClassifiedError {
        let (error_type, reason) = extract_classification(&descriptor.message);
        let body = extract_body(&descriptor.message).unwrap_or(&descriptor.message);
        debug!(
            error_type = %error_type,
            code = reason.code(),
            "re-classified remote error"
        );
        ClassifiedError::with_reason(error_type, reason, body)
    }

    /// Classify a caught failure by the rules of [`classification_of`].
    pub fn classify_failure(&self, failure: &Failure) -> ClassifiedError {
        let (error_type, reason) = classification_of(failure);
        debug!(
            kind = failure.kind.name(),
            error_type = %error_type,
            code = reason.code(),
            "classified failure"
        );
        self.assemble(error_type, reason, failure)
    }

    /// Build the message from a failure but keep an explicit classification.
    pub fn classify_as(
        &self,
        error_type: ErrorType,
        reason: ServiceStatusCode,
        failure: &Failure,
    ) -> ClassifiedError {
        self.assemble(error_type, reason, failure)
    }

    fn assemble(
        &self,
        error_type: ErrorType,
        reason: ServiceStatusCode,
        failure: &Failure,
    ) -> ClassifiedError {
        let body = self.body_of(failure).unwrap_or_else(|| {
            warn!(
                prefix = %format_prefix(error_type, reason),
                chain = %type_chain(failure),
                "no message derivable from failure"
            );
            UNKNOWN_ERROR_MESSAGE.to_string()
        });
        ClassifiedError::with_reason(error_type, reason, body)
    }

    fn body_of(&self, failure: &Failure) -> Option<String> {
        match &failure.kind {
            FailureKind::ArgumentNotValid(violations)
            | FailureKind::ConstraintViolation(violations) => Some(validation_message(violations)),
            FailureKind::NullDereference => Some(self.null_dereference_body(failure)),
            FailureKind::Classified(previous) => Some(previous.body().to_string()),
            _ => match failure.cause.as_deref() {
                Some(cause) => self.caused_body(failure, cause),
                None => failure.message().map(str::to_string),
            },
        }
    }

    fn null_dereference_body(&self, failure: &Failure) -> String {
        match failure.frames.first() {
            Some(top) if top.belongs_to(&self.app_namespace) => {
                format!("{} occurred at {top}", failure.type_name)
            }
            _ => NULL_DEREFERENCE_FALLBACK.to_string(),
        }
    }

    fn caused_body(&self, failure: &Failure, cause: &Failure) -> Option<String> {
        if matches!(cause.kind, FailureKind::NullDereference) && cause.message().is_none() {
            return cause
                .first_frame_in(&self.app_namespace)
                .map(|frame| format!("{} occured in {frame}", cause.type_name));
        }
        let message = cause.message()?;
        Some(format!("{message} (Caused by: {})", type_chain(failure)))
    }
}

fn type_chain(failure: &Failure) -> String {
    failure
        .chain()
        .map(|f| f.type_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
