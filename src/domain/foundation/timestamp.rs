//! Timestamp value object for immutable points in time.
//!
//! The support API reports times as unix seconds, unix milliseconds, numeric
//! strings or ISO-8601 strings depending on the field. Everything is parsed
//! into this one representation at ingestion so that date comparisons never
//! mix formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Numbers above this are read as unix milliseconds rather than seconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Creates a timestamp from unix seconds, or milliseconds for large values.
    pub fn from_unix(value: i64) -> Option<Self> {
        let parsed = if value.unsigned_abs() >= MILLIS_THRESHOLD.unsigned_abs() {
            Utc.timestamp_millis_opt(value).single()
        } else {
            Utc.timestamp_opt(value, 0).single()
        };
        parsed.map(Self)
    }

    /// Returns the timestamp as unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the calendar date as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Parses a textual timestamp.
    ///
    /// Accepts numeric strings (unix seconds or millis), RFC 3339,
    /// `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` (UTC midnight).
    pub fn parse_str(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(n) = raw.parse::<i64>() {
            return Self::from_unix(n);
        }
        if let Ok(n) = raw.parse::<f64>() {
            if n.is_finite() {
                return Self::from_unix(n.trunc() as i64);
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Self(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    /// Parses a timestamp from an arbitrary JSON value.
    ///
    /// Returns `None` for null, booleans, objects and anything unparsable.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .and_then(Self::from_unix),
            Value::String(s) => Self::parse_str(s),
            _ => None,
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s).ok_or_else(|| {
            ValidationError::invalid_format("timestamp", format!("unrecognised date '{}'", s))
        })
    }
}
