// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conversion between [`FsDateTime`] and database timestamp columns.

use crate::{DateTimeError, FsDateTime};
use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};
use std::fmt;
use tracing::debug;

/// Error reported by the database driver behind a [`ColumnSource`] or
/// [`ParameterSink`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("driver error: {0}")]
pub struct DriverError(pub String);

/// A result-set column, by label or by 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column<'a> {
    /// Column label.
    Name(&'a str),
    /// 1-based column index.
    Index(usize),
}

impl fmt::Display for Column<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Read side of a driver: a row of a result set or a callable statement's
/// output parameters.
pub trait ColumnSource {
    /// Read a column as a timestamp. `Ok(None)` is SQL NULL.
    fn timestamp(&self, column: Column<'_>) -> Result<Option<NaiveDateTime>, DriverError>;

    /// Read a column as text. `Ok(None)` is SQL NULL.
    fn text(&self, column: Column<'_>) -> Result<Option<String>, DriverError>;
}

/// Write side of a driver: a prepared statement's parameters.
pub trait ParameterSink {
    /// Bind a timestamp (or SQL NULL) to the 1-based parameter `index`.
    fn set_timestamp(
        &mut self,
        index: usize,
        value: Option<NaiveDateTime>,
    ) -> Result<(), DriverError>;
}

/// Maps [`FsDateTime`] values onto timestamp columns.
///
/// Timestamps are stored as wall-clock readings in the database offset
/// (UTC unless configured otherwise). Values read back are expressed in that
/// same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsDateTimeHandler {
    db_offset: FixedOffset,
}

impl Default for FsDateTimeHandler {
    fn default() -> Self {
        Self {
            db_offset: Utc.fix(),
        }
    }
}

impl FsDateTimeHandler {
    /// Handler for a database storing timestamps in `db_offset`.
    pub fn new(db_offset: FixedOffset) -> Self {
        Self { db_offset }
    }

    /// Handler for a database offset given in minutes east of UTC.
    pub fn with_offset_minutes(minutes: i32) -> Result<Self, DateTimeError> {
        FsDateTime::utc_offset(minutes).map(Self::new)
    }

    /// The offset timestamps are stored in.
    pub fn db_offset(&self) -> FixedOffset {
        self.db_offset
    }

    /// Bind `value` to parameter `index`; `None` binds SQL NULL.
    pub fn set_parameter<P: ParameterSink + ?Sized>(
        &self,
        sink: &mut P,
        index: usize,
        value: Option<&FsDateTime>,
    ) -> Result<(), DateTimeError> {
        let naive = value.map(|v| v.naive_in(self.db_offset));
        sink.set_timestamp(index, naive)?;
        Ok(())
    }

    /// Read `column` as an [`FsDateTime`]; SQL NULL reads as `None`.
    ///
    /// When the driver cannot read the column as a timestamp, the column is
    /// read again as text and parsed.
    pub fn get_result<S: ColumnSource + ?Sized>(
        &self,
        source: &S,
        column: Column<'_>,
    ) -> Result<Option<FsDateTime>, DateTimeError> {
        match source.timestamp(column) {
            Ok(value) => value
                .map(|naive| FsDateTime::from_naive(self.db_offset, naive))
                .transpose(),
            Err(err) => {
                debug!(%column, error = %err, "timestamp read failed, reading as text");
                source
                    .text(column)?
                    .map(|text| FsDateTime::parse(self.db_offset, &text))
                    .transpose()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
