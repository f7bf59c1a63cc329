//! Export format, date range and field filters.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::error::{ExportError, Result};
use crate::models::ExportRecord;

/// Output encoding of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    /// Tab-separated text that spreadsheet tools open directly.
    Tsv,
    Json,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }

    /// MIME type of the encoded content.
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Tsv => "text/tab-separated-values",
            Self::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "xlsx" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// An inclusive range of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Build a range, rejecting one whose end precedes its start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(ExportError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Whole days from the start of `from` to the end of `to`.
    pub fn from_days(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        let start = from.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
        let end = to.and_hms_milli_opt(23, 59, 59, 999).map(|d| d.and_utc());
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(ExportError::InvalidDateRange {
                start: from.to_string(),
                end: to.to_string(),
            }),
        }
    }

    /// Whether `at` falls within the range, bounds included.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Which records to export and how.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub date_range: Option<DateRange>,
    pub filters: BTreeMap<String, Value>,
    pub format: ExportFormat,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Require `key` to equal `value`. `"all"` and falsy values match
    /// everything.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Whether `record` passes every active filter.
    pub fn matches_filters<R: ExportRecord>(&self, record: &R) -> bool {
        self.filters.iter().all(|(key, wanted)| {
            if is_wildcard(wanted) {
                return true;
            }
            record
                .filter_field(key)
                .is_some_and(|actual| filter_equals(&actual, wanted))
        })
    }

    /// Whether `record` was created within the date range, if one is set.
    pub fn matches_date_range<R: ExportRecord>(&self, record: &R) -> bool {
        self.date_range
            .map_or(true, |range| range.contains(record.created_at()))
    }
}

fn is_wildcard(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty() || s == "all",
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn filter_equals(actual: &Value, wanted: &Value) -> bool {
    match (actual, wanted) {
        (Value::String(a), Value::String(w)) => a == w,
        (_, Value::String(w)) => actual.to_string() == *w,
        _ => actual == wanted,
    }
}
