// SPDX-License-Identifier: MIT OR Apache-2.0
//! Date-time value object and timestamp column conversion.
//!
//! [`FsDateTime`] is the application's date-time type: an instant with
//! millisecond precision, expressed in a fixed UTC offset.
//! [`FsDateTimeHandler`] converts it to and from database timestamp
//! columns through the [`ColumnSource`] / [`ParameterSink`] seams, which the
//! mapping layer implements on top of its driver.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod handler;
mod value;

pub use handler::{Column, ColumnSource, DriverError, FsDateTimeHandler, ParameterSink};
pub use value::FsDateTime;

/// Errors raised while converting date-time values.
#[derive(Debug, thiserror::Error)]
pub enum DateTimeError {
    /// Text did not match any accepted date-time layout.
    #[error("unparsable date-time: '{text}'")]
    Unparsable {
        /// Offending input.
        text: String,
    },

    /// The instant cannot be represented.
    #[error("timestamp out of range: {millis} ms")]
    OutOfRange {
        /// Milliseconds since the Unix epoch.
        millis: i64,
    },

    /// The UTC offset is outside ±24h.
    #[error("invalid UTC offset: {minutes} minutes")]
    InvalidOffset {
        /// Offset in minutes east of UTC.
        minutes: i32,
    },

    /// The underlying driver failed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}
