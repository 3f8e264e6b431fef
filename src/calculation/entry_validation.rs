//! Structural validation of a candidate log entry.
//!
//! Checks accumulate rather than short-circuit, so an entry form can show
//! every problem at once. A check that needs a field only runs when that
//! field is present. Unparsable timestamps are not validation messages: they
//! abort the call with [`EngineError::MalformedTimestamp`](crate::error::EngineError).

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::EngineResult;
use crate::models::{DutyStatus, LogEntry, LogEntryDraft, ValidationOutcome};

use super::break_due::chronological;

/// Message for a missing driver.
pub const DRIVER_REQUIRED: &str = "Driver ID is required";
/// Message for a missing vehicle.
pub const VEHICLE_REQUIRED: &str = "Vehicle ID is required";
/// Message for a missing duty status.
pub const DUTY_STATUS_REQUIRED: &str = "Duty status is required";
/// Message for a missing start time.
pub const START_TIME_REQUIRED: &str = "Start time is required";
/// Message for a missing location.
pub const LOCATION_REQUIRED: &str = "Location is required";
/// Message for a missing odometer reading.
pub const ODOMETER_REQUIRED: &str = "Odometer reading is required";
/// Message for a start time inside an existing entry.
pub const OVERLAP: &str = "Log entry overlaps with existing entry";
/// Message for a driving entry whose odometer went backwards.
pub const ODOMETER_DECREASED: &str = "Odometer reading cannot decrease";

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Returns true when `start` falls in `[entry.start_time, entry.end_time)`.
///
/// An open entry is treated as running until `now`.
fn starts_inside(start: DateTime<Utc>, entry: &LogEntry, now: DateTime<Utc>) -> bool {
    let end = entry.end_time.unwrap_or(now);
    start >= entry.start_time && start < end
}

/// The existing entry the candidate follows.
///
/// That is the latest entry starting at or before the candidate, or simply the
/// latest entry when the candidate has no start time.
fn prior_entry(existing: &[LogEntry], start: Option<DateTime<Utc>>) -> Option<&LogEntry> {
    let sorted = chronological(existing);
    match start {
        Some(start) => sorted
            .into_iter()
            .rev()
            .find(|log| log.start_time <= start),
        None => sorted.last().copied(),
    }
}

/// Validates a candidate entry against the driver's accepted entries.
///
/// `now` closes any open existing entry for the overlap check.
///
/// # Examples
///
/// ```
/// use hos_engine::calculation::validate_log_entry;
/// use hos_engine::models::LogEntryDraft;
/// use chrono::Utc;
///
/// let outcome = validate_log_entry(&LogEntryDraft::default(), &[], Utc::now()).unwrap();
/// assert!(!outcome.valid);
/// assert_eq!(outcome.errors.len(), 6);
///
/// let malformed = LogEntryDraft {
///     start_time: Some("soon".to_string()),
///     ..LogEntryDraft::default()
/// };
/// assert!(validate_log_entry(&malformed, &[], Utc::now()).is_err());
/// ```
pub fn validate_log_entry(
    candidate: &LogEntryDraft,
    existing: &[LogEntry],
    now: DateTime<Utc>,
) -> EngineResult<ValidationOutcome> {
    let start_time = candidate.parsed_start_time()?;
    candidate.parsed_end_time()?;

    let mut errors = Vec::new();

    if is_blank(&candidate.driver_id) {
        errors.push(DRIVER_REQUIRED.to_string());
    }
    if is_blank(&candidate.vehicle_id) {
        errors.push(VEHICLE_REQUIRED.to_string());
    }
    if candidate.duty_status.is_none() {
        errors.push(DUTY_STATUS_REQUIRED.to_string());
    }
    if start_time.is_none() {
        errors.push(START_TIME_REQUIRED.to_string());
    }
    if candidate.location.is_none() {
        errors.push(LOCATION_REQUIRED.to_string());
    }
    if candidate.odometer.is_none() {
        errors.push(ODOMETER_REQUIRED.to_string());
    }

    if let Some(start) = start_time
        && existing.iter().any(|log| starts_inside(start, log, now))
    {
        errors.push(OVERLAP.to_string());
    }

    if candidate.duty_status == Some(DutyStatus::Driving)
        && let Some(odometer) = candidate.odometer
        && let Some(prior) = prior_entry(existing, start_time)
        && odometer < prior.odometer
    {
        errors.push(ODOMETER_DECREASED.to_string());
    }

    if !errors.is_empty() {
        warn!(
            driver_id = candidate.driver_id.as_deref().unwrap_or("<missing>"),
            error_count = errors.len(),
            "Log entry failed validation"
        );
    }

    Ok(ValidationOutcome::from_errors(errors))
}
