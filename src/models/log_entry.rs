//! Log entry model and related types.
//!
//! This module defines [`LogEntry`], one contiguous period of a single duty
//! status, and [`LogEntryDraft`], the partially-filled candidate entry that is
//! validated before it joins a driver's log.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DutyStatus;

/// A structured place where a duty-status change was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Street address, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Two-letter state code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country name or code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// One contiguous period of a single duty status for a driver.
///
/// `duration_minutes` is supplied by the caller and is never derived from the
/// start and end times; an entry without it contributes nothing to any total.
///
/// # Examples
///
/// ```
/// use hos_engine::models::{DutyStatus, Location, LogEntry};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let entry = LogEntry {
///     id: "log_001".to_string(),
///     driver_id: "drv_001".to_string(),
///     vehicle_id: "veh_001".to_string(),
///     duty_status: DutyStatus::Driving,
///     start_time: Utc.with_ymd_and_hms(2026, 1, 15, 6, 0, 0).unwrap(),
///     end_time: None,
///     duration_minutes: Some(90),
///     odometer: Decimal::new(125_400, 0),
///     location: Location {
///         latitude: 41.88,
///         longitude: -87.63,
///         address: None,
///         city: Some("Chicago".to_string()),
///         state: Some("IL".to_string()),
///         country: None,
///         zip_code: None,
///     },
///     notes: None,
/// };
/// assert_eq!(entry.duration_hours(), Decimal::new(15, 1)); // 1.5 hours
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The driver the entry belongs to.
    pub driver_id: String,
    /// The vehicle the driver was assigned to.
    pub vehicle_id: String,
    /// The duty status held during the period.
    pub duty_status: DutyStatus,
    /// When the period began.
    pub start_time: DateTime<Utc>,
    /// When the period ended; `None` for the current, open entry.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Length of the period in minutes, as recorded by the caller.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Odometer reading at the start of the period.
    pub odometer: Decimal,
    /// Where the status change was recorded.
    pub location: Location,
    /// Free-text remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LogEntry {
    /// Returns the recorded duration, treating an absent value as zero.
    pub fn minutes(&self) -> i64 {
        i64::from(self.duration_minutes.unwrap_or(0))
    }

    /// Returns the recorded duration in hours.
    pub fn duration_hours(&self) -> Decimal {
        Decimal::from(self.minutes()) / Decimal::from(60)
    }

    /// Parses a JSON array of log entries.
    ///
    /// The whole sequence is rejected if any entry is malformed, including an
    /// unparsable timestamp; entries are never silently dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use hos_engine::models::LogEntry;
    ///
    /// let logs = LogEntry::parse_sequence("[]").unwrap();
    /// assert!(logs.is_empty());
    ///
    /// assert!(LogEntry::parse_sequence("null").is_err());
    /// ```
    pub fn parse_sequence(json: &str) -> EngineResult<Vec<LogEntry>> {
        serde_json::from_str(json).map_err(|e| EngineError::MalformedInput {
            message: format!("log sequence could not be parsed: {}", e),
        })
    }
}

/// Parses an RFC 3339 timestamp, normalising it to UTC.
///
/// # Example
///
/// ```
/// use hos_engine::models::parse_timestamp;
///
/// let ts = parse_timestamp("start_time", "2026-01-15T08:00:00-05:00").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2026-01-15T13:00:00+00:00");
///
/// assert!(parse_timestamp("start_time", "15/01/2026 08:00").is_err());
/// ```
pub fn parse_timestamp(field: &str, raw: &str) -> EngineResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| EngineError::MalformedTimestamp {
            field: field.to_string(),
            value: raw.to_string(),
            message: e.to_string(),
        })
}

/// A candidate log entry awaiting validation.
///
/// Every field is optional because the entry comes straight from an entry
/// form. Timestamps stay as raw strings so that an unparsable value surfaces
/// as an [`EngineError::MalformedTimestamp`] rather than a validation message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntryDraft {
    /// Identifier, if one was pre-assigned.
    #[serde(default)]
    pub id: Option<String>,
    /// The driver the entry belongs to.
    #[serde(default)]
    pub driver_id: Option<String>,
    /// The vehicle the driver was assigned to.
    #[serde(default)]
    pub vehicle_id: Option<String>,
    /// The duty status being recorded.
    #[serde(default)]
    pub duty_status: Option<DutyStatus>,
    /// RFC 3339 start timestamp.
    #[serde(default)]
    pub start_time: Option<String>,
    /// RFC 3339 end timestamp.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Recorded duration in minutes.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Odometer reading; zero is a real reading.
    #[serde(default)]
    pub odometer: Option<Decimal>,
    /// Where the status change was recorded.
    #[serde(default)]
    pub location: Option<Location>,
    /// Free-text remarks.
    #[serde(default)]
    pub notes: Option<String>,
}

impl LogEntryDraft {
    /// Parses `start_time`, if present. A blank string counts as absent.
    pub fn parsed_start_time(&self) -> EngineResult<Option<DateTime<Utc>>> {
        parse_optional("start_time", self.start_time.as_deref())
    }

    /// Parses `end_time`, if present. A blank string counts as absent.
    pub fn parsed_end_time(&self) -> EngineResult<Option<DateTime<Utc>>> {
        parse_optional("end_time", self.end_time.as_deref())
    }
}

fn parse_optional(field: &str, raw: Option<&str>) -> EngineResult<Option<DateTime<Utc>>> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| parse_timestamp(field, value))
        .transpose()
}

impl From<&LogEntry> for LogEntryDraft {
    fn from(entry: &LogEntry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            driver_id: Some(entry.driver_id.clone()),
            vehicle_id: Some(entry.vehicle_id.clone()),
            duty_status: Some(entry.duty_status),
            start_time: Some(entry.start_time.to_rfc3339()),
            end_time: entry.end_time.map(|t| t.to_rfc3339()),
            duration_minutes: entry.duration_minutes,
            odometer: Some(entry.odometer),
            location: Some(entry.location.clone()),
            notes: entry.notes.clone(),
        }
    }
}
