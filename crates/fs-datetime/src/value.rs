// SPDX-License-Identifier: MIT OR Apache-2.0
//! The [`FsDateTime`] value object.

use crate::DateTimeError;
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Offset-less layouts accepted by [`FsDateTime::parse`], tried in order.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Date-only layout; the time of day is midnight.
const DATE_LAYOUT: &str = "%Y-%m-%d";

/// An instant with millisecond precision in a fixed UTC offset.
///
/// Equality and ordering compare instants; two values naming the same
/// instant in different offsets are equal.
///
/// ```
/// use fs_datetime::FsDateTime;
///
/// let utc = FsDateTime::utc_offset(0).unwrap();
/// let dt = FsDateTime::parse(utc, "2024-03-01 12:30:00").unwrap();
/// assert_eq!(dt.unix_millis(), 1_709_296_200_000);
/// assert_eq!(dt.to_string(), "2024-03-01T12:30:00.000Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FsDateTime(DateTime<FixedOffset>);

impl FsDateTime {
    /// Build a fixed offset from minutes east of UTC.
    pub fn utc_offset(minutes: i32) -> Result<FixedOffset, DateTimeError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(DateTimeError::InvalidOffset { minutes })
    }

    /// The instant `millis` milliseconds after the Unix epoch, in `offset`.
    pub fn from_unix_millis(offset: FixedOffset, millis: i64) -> Result<Self, DateTimeError> {
        let utc = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or(DateTimeError::OutOfRange { millis })?;
        Ok(Self(utc.with_timezone(&offset)))
    }

    /// A wall-clock reading in `offset`.
    pub fn from_naive(offset: FixedOffset, naive: NaiveDateTime) -> Result<Self, DateTimeError> {
        let local = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| DateTimeError::OutOfRange {
                millis: naive.and_utc().timestamp_millis(),
            })?;
        Self::from_unix_millis(offset, local.timestamp_millis())
    }

    /// The current instant, truncated to milliseconds.
    pub fn now(offset: FixedOffset) -> Self {
        Self::from(Utc::now()).in_offset(offset)
    }

    /// Parse a date-time.
    ///
    /// RFC 3339 input keeps its own offset. `YYYY-MM-DD HH:MM:SS[.fff]`,
    /// `YYYY-MM-DDTHH:MM:SS[.fff]` and `YYYY-MM-DD` are read as wall-clock
    /// time in `offset`. Sub-millisecond digits are dropped.
    pub fn parse(offset: FixedOffset, text: &str) -> Result<Self, DateTimeError> {
        let trimmed = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::from_unix_millis(*dt.offset(), dt.timestamp_millis());
        }
        for layout in NAIVE_LAYOUTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
                return Self::from_naive(offset, naive);
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_LAYOUT) {
            return Self::from_naive(offset, date.and_time(NaiveTime::MIN));
        }

        Err(DateTimeError::Unparsable {
            text: text.to_string(),
        })
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The offset this value is expressed in.
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    /// The same instant expressed in another offset.
    pub fn in_offset(&self, offset: FixedOffset) -> Self {
        Self(self.0.with_timezone(&offset))
    }

    /// Wall-clock reading of this instant in `offset`.
    pub fn naive_in(&self, offset: FixedOffset) -> NaiveDateTime {
        self.0.with_timezone(&offset).naive_local()
    }

    /// The underlying `chrono` value.
    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl From<DateTime<Utc>> for FsDateTime {
    fn from(dt: DateTime<Utc>) -> Self {
        let truncated = DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(dt);
        Self(truncated.fixed_offset())
    }
}

impl fmt::Display for FsDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl FromStr for FsDateTime {
    type Err = DateTimeError;

    /// Parse with naive forms read as UTC.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Self::utc_offset(0)?, s)
    }
}

impl Serialize for FsDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FsDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
