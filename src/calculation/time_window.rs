//! Trailing time-window aggregation.
//!
//! This module sums minutes spent in qualifying duty statuses within a window
//! that ends at a reference instant and reaches back a fixed number of
//! wall-clock minutes, regardless of calendar days.
//!
//! An entry belongs to a window solely by its `start_time`: it is inside when
//! it started strictly less than the window length before the reference time.
//! Its whole recorded duration then counts, with no proration for time that
//! falls outside the window.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CycleType, DutyStatus, LogEntry};

use super::HosLimits;

/// Minutes used and remaining against a limit within one window.
///
/// # Example
///
/// ```
/// use hos_engine::calculation::{drive_time_window, HosLimits};
/// use chrono::Utc;
///
/// let total = drive_time_window(&[], Utc::now(), &HosLimits::FMCSA);
/// assert_eq!(total.used_minutes, 0);
/// assert_eq!(total.remaining_minutes, 11 * 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTotal {
    /// Earliest instant of the window (exclusive).
    pub window_start: DateTime<Utc>,
    /// Number of entries whose minutes were counted.
    pub entries_counted: usize,
    /// Qualifying minutes found in the window.
    pub used_minutes: i64,
    /// The limit, in minutes.
    pub limit_minutes: i64,
    /// `max(0, limit_minutes - used_minutes)`.
    pub remaining_minutes: i64,
}

impl WindowTotal {
    /// Remaining time in hours.
    pub fn remaining_hours(&self) -> Decimal {
        minutes_to_hours(self.remaining_minutes)
    }

    /// Used time in hours.
    pub fn used_hours(&self) -> Decimal {
        minutes_to_hours(self.used_minutes)
    }

    /// Returns true when the limit has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_minutes <= 0
    }
}

/// Converts whole minutes to hours.
pub(crate) fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

/// Returns true when `start` falls inside the trailing `window` ending at `now`.
///
/// The boundary itself is outside: an entry that started exactly `window`
/// before `now` does not count. Entries starting after `now` are inside.
pub fn is_within_window(start: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    now.signed_duration_since(start) < window
}

/// Sums the minutes of entries in the trailing window whose status qualifies.
pub fn aggregate_window<F>(
    logs: &[LogEntry],
    now: DateTime<Utc>,
    window: Duration,
    limit_minutes: i64,
    qualifies: F,
) -> WindowTotal
where
    F: Fn(DutyStatus) -> bool,
{
    let (entries_counted, used_minutes) = logs
        .iter()
        .filter(|log| is_within_window(log.start_time, now, window))
        .filter(|log| qualifies(log.duty_status))
        .fold((0usize, 0i64), |(count, minutes), log| {
            (count + 1, minutes + log.minutes())
        });

    let remaining_minutes = (limit_minutes - used_minutes).max(0);

    debug!(
        window_minutes = window.num_minutes(),
        entries_counted,
        used_minutes,
        remaining_minutes,
        "Aggregated time window"
    );

    WindowTotal {
        window_start: now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC),
        entries_counted,
        used_minutes,
        limit_minutes,
        remaining_minutes,
    }
}

/// Driving minutes in the trailing shift window against the driving limit.
pub fn drive_time_window(logs: &[LogEntry], now: DateTime<Utc>, limits: &HosLimits) -> WindowTotal {
    aggregate_window(
        logs,
        now,
        Duration::hours(i64::from(limits.shift_window_hours)),
        i64::from(limits.drive_time_hours) * 60,
        |status| status == DutyStatus::Driving,
    )
}

/// On-duty minutes in the trailing shift window against the shift limit.
pub fn shift_time_window(logs: &[LogEntry], now: DateTime<Utc>, limits: &HosLimits) -> WindowTotal {
    aggregate_window(
        logs,
        now,
        Duration::hours(i64::from(limits.shift_window_hours)),
        i64::from(limits.shift_time_hours) * 60,
        DutyStatus::counts_toward_shift,
    )
}

/// On-duty minutes in the trailing cycle window against the cycle limit.
pub fn cycle_time_window(
    logs: &[LogEntry],
    now: DateTime<Utc>,
    cycle: CycleType,
    limits: &HosLimits,
) -> WindowTotal {
    let bounds = limits.cycle(cycle);
    aggregate_window(
        logs,
        now,
        Duration::days(i64::from(bounds.days)),
        i64::from(bounds.hours) * 60,
        DutyStatus::counts_toward_shift,
    )
}

/// Hours of driving left before the 11-hour limit.
///
/// # Examples
///
/// ```
/// use hos_engine::calculation::{drive_time_remaining, HosLimits};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// // A driver with no logged activity has the full limit available.
/// let remaining = drive_time_remaining(&[], Utc::now(), &HosLimits::FMCSA);
/// assert_eq!(remaining, Decimal::new(11, 0));
/// ```
pub fn drive_time_remaining(logs: &[LogEntry], now: DateTime<Utc>, limits: &HosLimits) -> Decimal {
    drive_time_window(logs, now, limits).remaining_hours()
}

/// Hours of on-duty time left in the 14-hour window.
pub fn shift_time_remaining(logs: &[LogEntry], now: DateTime<Utc>, limits: &HosLimits) -> Decimal {
    shift_time_window(logs, now, limits).remaining_hours()
}

/// Hours of on-duty time left in the selected cycle.
///
/// # Examples
///
/// ```
/// use hos_engine::calculation::{cycle_time_remaining, HosLimits};
/// use hos_engine::models::CycleType;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let now = Utc::now();
/// assert_eq!(
///     cycle_time_remaining(&[], now, CycleType::Seventy, &HosLimits::FMCSA),
///     Decimal::new(70, 0)
/// );
/// assert_eq!(
///     cycle_time_remaining(&[], now, CycleType::Sixty, &HosLimits::FMCSA),
///     Decimal::new(60, 0)
/// );
/// ```
pub fn cycle_time_remaining(
    logs: &[LogEntry],
    now: DateTime<Utc>,
    cycle: CycleType,
    limits: &HosLimits,
) -> Decimal {
    cycle_time_window(logs, now, cycle, limits).remaining_hours()
}

/// Total hours per duty status across the whole supplied log.
///
/// Every status has a bucket, including those absent from the log.
pub fn hours_by_status(logs: &[LogEntry]) -> BTreeMap<DutyStatus, Decimal> {
    let mut minutes: BTreeMap<DutyStatus, i64> =
        DutyStatus::ALL.into_iter().map(|s| (s, 0)).collect();

    for log in logs {
        *minutes.entry(log.duty_status).or_insert(0) += log.minutes();
    }

    minutes
        .into_iter()
        .map(|(status, m)| (status, minutes_to_hours(m)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap()
    }

    fn entry(status: DutyStatus, start: DateTime<Utc>, minutes: Option<u32>) -> LogEntry {
        LogEntry {
            id: format!("log_{}", start.timestamp()),
            driver_id: "drv_001".to_string(),
            vehicle_id: "veh_001".to_string(),
            duty_status: status,
            start_time: start,
            end_time: None,
            duration_minutes: minutes,
            odometer: Decimal::ZERO,
            location: Location {
                latitude: 0.0,
                longitude: 0.0,
                address: None,
                city: None,
                state: None,
                country: None,
                zip_code: None,
            },
            notes: None,
        }
    }

    fn hours(n: i64) -> Decimal {
        Decimal::from(n)
    }

    // ==========================================================================
    // TW-001: empty log has full limits
    // ==========================================================================
    #[test]
    fn test_tw_001_empty_log_full_limits() {
        let limits = HosLimits::FMCSA;
        assert_eq!(drive_time_remaining(&[], now(), &limits), hours(11));
        assert_eq!(shift_time_remaining(&[], now(), &limits), hours(14));
        assert_eq!(
            cycle_time_remaining(&[], now(), CycleType::Seventy, &limits),
            hours(70)
        );
        assert_eq!(
            cycle_time_remaining(&[], now(), CycleType::Sixty, &limits),
            hours(60)
        );
    }

    // ==========================================================================
    // TW-002: 11 hours of driving started 2 hours ago exhausts the drive limit
    // ==========================================================================
    #[test]
    fn test_tw_002_eleven_hours_driving_exhausts_limit() {
        let logs = vec![entry(
            DutyStatus::Driving,
            now() - Duration::hours(2),
            Some(660),
        )];

        let total = drive_time_window(&logs, now(), &HosLimits::FMCSA);
        assert_eq!(total.used_minutes, 660);
        assert_eq!(total.remaining_minutes, 0);
        assert!(total.is_exhausted());
        assert_eq!(total.remaining_hours(), Decimal::ZERO);
    }

    // ==========================================================================
    // TW-003: window boundary is exclusive
    // ==========================================================================
    #[test]
    fn test_tw_003_entry_exactly_at_boundary_is_excluded() {
        let logs = vec![entry(
            DutyStatus::Driving,
            now() - Duration::hours(14),
            Some(120),
        )];
        assert_eq!(
            drive_time_remaining(&logs, now(), &HosLimits::FMCSA),
            hours(11)
        );
    }

    #[test]
    fn test_tw_004_entry_one_second_inside_boundary_is_included() {
        let logs = vec![entry(
            DutyStatus::Driving,
            now() - Duration::hours(14) + Duration::seconds(1),
            Some(120),
        )];
        assert_eq!(
            drive_time_remaining(&logs, now(), &HosLimits::FMCSA),
            hours(9)
        );
    }

    #[test]
    fn test_tw_005_missing_duration_contributes_nothing() {
        let logs = vec![
            entry(DutyStatus::Driving, now() - Duration::hours(3), None),
            entry(DutyStatus::Driving, now() - Duration::hours(1), Some(30)),
        ];
        let total = drive_time_window(&logs, now(), &HosLimits::FMCSA);
        assert_eq!(total.entries_counted, 2);
        assert_eq!(total.used_minutes, 30);
        assert_eq!(total.remaining_hours(), Decimal::new(105, 1)); // 10.5
    }

    #[test]
    fn test_tw_006_shift_counts_on_duty_not_driving() {
        let logs = vec![
            entry(DutyStatus::OnDutyNotDriving, now() - Duration::hours(6), Some(60)),
            entry(DutyStatus::Driving, now() - Duration::hours(5), Some(240)),
            entry(DutyStatus::OffDuty, now() - Duration::hours(1), Some(60)),
            entry(DutyStatus::YardMoves, now() - Duration::minutes(10), Some(10)),
        ];
        let limits = HosLimits::FMCSA;

        assert_eq!(drive_time_remaining(&logs, now(), &limits), hours(7));
        assert_eq!(shift_time_remaining(&logs, now(), &limits), hours(9));
    }

    #[test]
    fn test_tw_007_remaining_never_negative() {
        let logs = vec![
            entry(DutyStatus::Driving, now() - Duration::hours(10), Some(600)),
            entry(DutyStatus::OnDutyNotDriving, now() - Duration::hours(1), Some(600)),
        ];
        let limits = HosLimits::FMCSA;

        assert_eq!(drive_time_remaining(&logs, now(), &limits), hours(0));
        assert_eq!(shift_time_remaining(&logs, now(), &limits), hours(0));
        let total = shift_time_window(&logs, now(), &limits);
        assert_eq!(total.used_minutes, 1200);
        assert_eq!(total.remaining_minutes, 0);
    }

    // ==========================================================================
    // TW-008: no entries inside the 8-day window leaves the full cycle
    // ==========================================================================
    #[test]
    fn test_tw_008_old_entries_outside_cycle_window() {
        let logs = vec![
            entry(DutyStatus::Driving, now() - Duration::days(9), Some(600)),
            entry(DutyStatus::OnDutyNotDriving, now() - Duration::days(8), Some(600)),
        ];
        assert_eq!(
            cycle_time_remaining(&logs, now(), CycleType::Seventy, &HosLimits::FMCSA),
            hours(70)
        );
    }

    #[test]
    fn test_tw_009_sixty_hour_cycle_uses_seven_days() {
        let logs = vec![entry(
            DutyStatus::Driving,
            now() - Duration::days(7) - Duration::hours(12),
            Some(300),
        )];
        let limits = HosLimits::FMCSA;

        // 7.5 days ago: inside the 8-day window, outside the 7-day window.
        assert_eq!(
            cycle_time_remaining(&logs, now(), CycleType::Seventy, &limits),
            hours(65)
        );
        assert_eq!(
            cycle_time_remaining(&logs, now(), CycleType::Sixty, &limits),
            hours(60)
        );
    }

    #[test]
    fn test_tw_010_start_time_decides_membership() {
        // Started 15 hours ago and ran 10 hours: still excluded entirely.
        let logs = vec![entry(
            DutyStatus::Driving,
            now() - Duration::hours(15),
            Some(600),
        )];
        assert_eq!(
            drive_time_remaining(&logs, now(), &HosLimits::FMCSA),
            hours(11)
        );
    }

    #[test]
    fn test_tw_011_future_entries_are_counted() {
        let logs = vec![entry(
            DutyStatus::Driving,
            now() + Duration::minutes(30),
            Some(60),
        )];
        assert_eq!(
            drive_time_remaining(&logs, now(), &HosLimits::FMCSA),
            hours(10)
        );
    }

    #[test]
    fn test_tw_012_window_start_reported() {
        let total = shift_time_window(&[], now(), &HosLimits::FMCSA);
        assert_eq!(total.window_start, now() - Duration::hours(14));
        assert_eq!(total.limit_minutes, 14 * 60);
    }

    #[test]
    fn test_hours_by_status_initialises_every_bucket() {
        let totals = hours_by_status(&[]);
        assert_eq!(totals.len(), 6);
        assert!(totals.values().all(|h| *h == Decimal::ZERO));
    }

    #[test]
    fn test_hours_by_status_sums_whole_log() {
        let logs = vec![
            entry(DutyStatus::Driving, now() - Duration::days(20), Some(90)),
            entry(DutyStatus::Driving, now() - Duration::hours(2), Some(30)),
            entry(DutyStatus::SleeperBerth, now() - Duration::hours(12), Some(480)),
            entry(DutyStatus::PersonalConveyance, now() - Duration::hours(1), None),
        ];

        let totals = hours_by_status(&logs);
        assert_eq!(totals[&DutyStatus::Driving], hours(2));
        assert_eq!(totals[&DutyStatus::SleeperBerth], hours(8));
        assert_eq!(totals[&DutyStatus::PersonalConveyance], Decimal::ZERO);
        assert_eq!(totals[&DutyStatus::OffDuty], Decimal::ZERO);

        let sum: Decimal = totals.values().copied().sum();
        assert_eq!(sum, hours(10));
    }

    #[test]
    fn test_custom_limits() {
        let limits = HosLimits {
            drive_time_hours: 10,
            ..HosLimits::FMCSA
        };
        let logs = vec![entry(
            DutyStatus::Driving,
            now() - Duration::hours(1),
            Some(60),
        )];
        assert_eq!(drive_time_remaining(&logs, now(), &limits), hours(9));
    }

    #[test]
    fn test_unbounded_cycle_does_not_overflow() {
        let limits = HosLimits {
            cycle_70: crate::calculation::CycleLimit {
                hours: 70,
                days: 200_000_000,
            },
            ..HosLimits::FMCSA
        };
        let logs = vec![entry(
            DutyStatus::Driving,
            now() - Duration::hours(1),
            Some(60),
        )];

        let total = cycle_time_window(&logs, now(), CycleType::Seventy, &limits);
        assert_eq!(total.window_start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(total.used_minutes, 60);
        assert_eq!(total.remaining_hours(), hours(69));
    }
}
