//! 30-minute break countdown.
//!
//! A driver may not drive more than 8 hours without an off-duty or
//! sleeper-berth period of at least 30 minutes (49 CFR 395.3(a)(3)(ii)).
//! This module works out how many driving minutes remain before that break
//! becomes mandatory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DutyStatus, LogEntry};

use super::HosLimits;

/// The break countdown together with the facts it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakDue {
    /// Minutes left before a break is required; zero once overdue.
    pub minutes_remaining: i64,
    /// Start of the most recent qualifying break, if any.
    pub last_break_start: Option<DateTime<Utc>>,
    /// Minutes counted against the allowance.
    ///
    /// Driving minutes logged after the break, or wall-clock minutes since the
    /// first driving entry when no break has been taken.
    pub counted_minutes: i64,
}

/// Returns the log entries ordered by `start_time`, keeping input order for ties.
pub(crate) fn chronological(logs: &[LogEntry]) -> Vec<&LogEntry> {
    let mut sorted: Vec<&LogEntry> = logs.iter().collect();
    sorted.sort_by_key(|log| log.start_time);
    sorted
}

/// Computes the break countdown with its supporting detail.
///
/// The most recent off-duty or sleeper-berth entry of at least the qualifying
/// length anchors the count. Without one, the clock runs from the start of the
/// earliest driving entry in wall-clock minutes.
pub fn break_due(logs: &[LogEntry], now: DateTime<Utc>, limits: &HosLimits) -> BreakDue {
    let allowance = i64::from(limits.break_after_driving_minutes);
    let qualifying = i64::from(limits.qualifying_break_minutes);
    let sorted = chronological(logs);

    let last_break = sorted
        .iter()
        .rev()
        .find(|log| log.duty_status.is_rest() && log.minutes() >= qualifying);

    let Some(last_break) = last_break else {
        let first_driving = sorted
            .iter()
            .find(|log| log.duty_status == DutyStatus::Driving);

        return match first_driving {
            Some(first) => {
                let elapsed = (now - first.start_time).num_minutes();
                BreakDue {
                    minutes_remaining: (allowance - elapsed).max(0),
                    last_break_start: None,
                    counted_minutes: elapsed,
                }
            }
            None => BreakDue {
                minutes_remaining: allowance,
                last_break_start: None,
                counted_minutes: 0,
            },
        };
    };

    let break_start = last_break.start_time;
    let driving_since_break: i64 = sorted
        .iter()
        .filter(|log| log.start_time > break_start)
        .filter(|log| log.duty_status == DutyStatus::Driving)
        .map(|log| log.minutes())
        .sum();

    BreakDue {
        minutes_remaining: (allowance - driving_since_break).max(0),
        last_break_start: Some(break_start),
        counted_minutes: driving_since_break,
    }
}

/// Minutes of driving left before a 30-minute break is mandatory.
///
/// # Examples
///
/// ```
/// use hos_engine::calculation::{break_due_minutes, HosLimits};
/// use chrono::Utc;
///
/// // No driving logged: the full 8 hours are available.
/// assert_eq!(break_due_minutes(&[], Utc::now(), &HosLimits::FMCSA), 480);
/// ```
pub fn break_due_minutes(logs: &[LogEntry], now: DateTime<Utc>, limits: &HosLimits) -> i64 {
    break_due(logs, now, limits).minutes_remaining
}
