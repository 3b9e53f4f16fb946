// SPDX-License-Identifier: MIT OR Apache-2.0
//! Failure classification with stable error codes.
//!
//! Every failure a service catches is normalised into a [`ClassifiedError`]:
//! an [`ErrorType`] (broad origin), a [`ServiceStatusCode`] (numbered
//! reason), and a message tagged as
//! `[<type prefix><code> <reason text>: <body>`. The tag is the only wire
//! format between services: [`extract_classification`] recovers
//! `(type, reason)` from any tagged message, so a downstream error can be
//! re-classified locally through [`Classifier::classify_remote`].
//!
//! ```
//! use fs_error::{Classifier, ErrorType, RemoteErrorDescriptor, ServiceStatusCode};
//!
//! let remote = RemoteErrorDescriptor::new("[FS_SY_1001 Some reason: actual detail");
//! let err = Classifier::default().classify(remote);
//! assert_eq!(err.error_type(), ErrorType::System);
//! assert_eq!(err.reason(), ServiceStatusCode::NoParam);
//! assert_eq!(err.body(), "actual detail");
//! ```
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod classify;
mod error;
mod failure;
mod kind;
mod message;

pub use classify::{Classifier, ClassifierInput, DEFAULT_APP_NAMESPACE, classification_of};
pub use error::{ClassifiedError, ErrorResponse, RemoteErrorDescriptor};
pub use failure::{CLASSIFIED_TYPE_NAME, Failure, FailureKind, FieldViolation, StackFrame};
pub use kind::{ErrorType, ServiceStatusCode};
pub use message::{
    NULL_DEREFERENCE_FALLBACK, UNKNOWN_ERROR_MESSAGE, VALIDATION_FAILED, extract_body,
    extract_classification, format_message, format_prefix, validation_message,
};
