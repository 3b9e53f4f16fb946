// SPDX-License-Identifier: MIT OR Apache-2.0
//! Caught failures as seen by the classifier.
//!
//! The request-dispatch and persistence layers report failures of a handful
//! of well-known categories; everything else is [`FailureKind::Other`].
//! A [`Failure`] may wrap a nested cause, forming a chain that the
//! classifier walks when formatting messages.

use crate::ClassifiedError;
use std::fmt;

/// Type name reported for re-raised [`ClassifiedError`]s.
pub const CLASSIFIED_TYPE_NAME: &str = "fs_error::ClassifiedError";

/// Category of a caught failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// SQL-layer failure raised by the database driver.
    Sql,
    /// A required request parameter was missing.
    MissingParameter,
    /// The request body could not be read or deserialised.
    UnreadableBody,
    /// A method argument could not be converted to its declared type.
    TypeMismatch,
    /// Bean validation of a request body failed.
    ArgumentNotValid(Vec<FieldViolation>),
    /// Constraint validation of request parameters failed.
    ConstraintViolation(Vec<FieldViolation>),
    /// Dereference of an absent value.
    NullDereference,
    /// A failure that was already classified and is being re-raised.
    Classified(ClassifiedError),
    /// Anything else.
    Other,
}

impl FailureKind {
    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::MissingParameter => "missing_parameter",
            Self::UnreadableBody => "unreadable_body",
            Self::TypeMismatch => "type_mismatch",
            Self::ArgumentNotValid(_) => "argument_not_valid",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::NullDereference => "null_dereference",
            Self::Classified(_) => "classified",
            Self::Other => "other",
        }
    }
}

/// One `field: message` pair reported by a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field or property path.
    pub field: String,
    /// Validator's default message.
    pub message: String,
}

impl FieldViolation {
    /// Create a violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A single call-stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Fully-qualified module (or class) path.
    pub module: String,
    /// Function (or method) name.
    pub function: String,
    /// Source file, when known.
    pub file: Option<String>,
    /// Line number, when known.
    pub line: Option<u32>,
}

impl StackFrame {
    /// Create a frame with no source location.
    pub fn new(module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
            file: None,
            line: None,
        }
    }

    /// Attach a source location.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Whether the frame originates from `namespace`.
    pub fn belongs_to(&self, namespace: &str) -> bool {
        !namespace.is_empty() && self.module.starts_with(namespace)
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.module, self.function)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}")?,
            (Some(file), None) => f.write_str(file)?,
            _ => f.write_str("Unknown Source")?,
        }
        f.write_str(")")
    }
}

/// A caught failure with an optional nested cause.
///
/// ```
/// use fs_error::{Failure, FailureKind};
///
/// let err = Failure::new(FailureKind::Other, "org.example.DataAccessException")
///     .with_message("insert into users failed")
///     .with_cause(Failure::new(FailureKind::Sql, "java.sql.SQLException"));
/// assert_eq!(err.chain().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Category used by the classification rules.
    pub kind: FailureKind,
    /// Fully-qualified type name, listed in `Caused by:` chains.
    pub type_name: String,
    /// Failure message, if any.
    pub message: Option<String>,
    /// Call stack at the point of failure, innermost frame first.
    pub frames: Vec<StackFrame>,
    /// Nested cause.
    pub cause: Option<Box<Failure>>,
}

impl Failure {
    /// Create a failure with no message, frames, or cause.
    pub fn new(kind: FailureKind, type_name: impl Into<String>) -> Self {
        Self {
            kind,
            type_name: type_name.into(),
            message: None,
            frames: Vec::new(),
            cause: None,
        }
    }

    /// Attach a message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the call stack.
    pub fn with_frames(mut self, frames: impl IntoIterator<Item = StackFrame>) -> Self {
        self.frames = frames.into_iter().collect();
        self
    }

    /// Attach a nested cause.
    pub fn with_cause(mut self, cause: Failure) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The message, unless absent or blank.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// This failure followed by every nested cause, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &Failure> {
        std::iter::successors(Some(self), |f| f.cause.as_deref())
    }

    /// First frame that originates from `namespace`.
    pub fn first_frame_in(&self, namespace: &str) -> Option<&StackFrame> {
        self.frames.iter().find(|f| f.belongs_to(namespace))
    }
}

impl From<ClassifiedError> for Failure {
    fn from(err: ClassifiedError) -> Self {
        let message = err.message().to_string();
        Self::new(FailureKind::Classified(err), CLASSIFIED_TYPE_NAME).with_message(message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(m) => write!(f, "{}: {m}", self.type_name),
            None => f.write_str(&self.type_name),
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
