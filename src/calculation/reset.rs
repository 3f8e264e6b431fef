//! 34-hour restart eligibility.
//!
//! The restart clock is anchored on the latest-starting off-duty or
//! sleeper-berth entry. Whether that rest actually ran for 34 consecutive
//! hours is not checked here; a short rest followed by more driving still
//! anchors the clock.

use chrono::{DateTime, Duration, Utc};

use crate::models::LogEntry;

use super::HosLimits;

/// Returns when the driver may restart the cycle.
///
/// `now` is returned when the restart instant is not after the reference
/// time, and `None` when the log contains no rest at all.
///
/// # Examples
///
/// ```
/// use hos_engine::calculation::{reset_eligibility, HosLimits};
/// use chrono::Utc;
///
/// assert_eq!(reset_eligibility(&[], Utc::now(), &HosLimits::FMCSA), None);
/// ```
pub fn reset_eligibility(
    logs: &[LogEntry],
    now: DateTime<Utc>,
    limits: &HosLimits,
) -> Option<DateTime<Utc>> {
    let last_rest_start = logs
        .iter()
        .filter(|log| log.duty_status.is_rest())
        .map(|log| log.start_time)
        .max()?;

    let eligible_at = last_rest_start
        .checked_add_signed(Duration::hours(i64::from(limits.reset_hours)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    Some(if eligible_at > now { eligible_at } else { now })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DutyStatus, Location};
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap()
    }

    fn entry(status: DutyStatus, start: DateTime<Utc>) -> LogEntry {
        LogEntry {
            id: format!("log_{}", start.timestamp()),
            driver_id: "drv_001".to_string(),
            vehicle_id: "veh_001".to_string(),
            duty_status: status,
            start_time: start,
            end_time: None,
            duration_minutes: Some(60),
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

    #[test]
    fn test_rs_001_no_rest_is_not_determinable() {
        let logs = vec![entry(DutyStatus::Driving, now() - Duration::hours(3))];
        assert_eq!(reset_eligibility(&logs, now(), &HosLimits::FMCSA), None);
    }

    // ==========================================================================
    // RS-002: off duty 40 hours ago is already eligible
    // ==========================================================================
    #[test]
    fn test_rs_002_old_rest_is_already_eligible() {
        let logs = vec![entry(DutyStatus::OffDuty, now() - Duration::hours(40))];
        let eligible = reset_eligibility(&logs, now(), &HosLimits::FMCSA).unwrap();
        assert!(eligible <= now());
        assert_eq!(eligible, now());
    }

    #[test]
    fn test_rs_003_recent_rest_is_eligible_34_hours_after_start() {
        let rest_start = now() - Duration::hours(10);
        let logs = vec![
            entry(DutyStatus::Driving, now() - Duration::hours(20)),
            entry(DutyStatus::SleeperBerth, rest_start),
        ];
        assert_eq!(
            reset_eligibility(&logs, now(), &HosLimits::FMCSA),
            Some(rest_start + Duration::hours(34))
        );
    }

    #[test]
    fn test_rs_004_latest_rest_wins_regardless_of_order() {
        let latest = now() - Duration::hours(5);
        let logs = vec![
            entry(DutyStatus::OffDuty, latest),
            entry(DutyStatus::OffDuty, now() - Duration::hours(50)),
            entry(DutyStatus::SleeperBerth, now() - Duration::hours(20)),
        ];
        assert_eq!(
            reset_eligibility(&logs, now(), &HosLimits::FMCSA),
            Some(latest + Duration::hours(34))
        );
    }

    #[test]
    fn test_rs_005_exactly_34_hours_returns_now() {
        let logs = vec![entry(DutyStatus::OffDuty, now() - Duration::hours(34))];
        assert_eq!(
            reset_eligibility(&logs, now(), &HosLimits::FMCSA),
            Some(now())
        );
    }

    #[test]
    fn test_rs_006_continuity_is_not_verified() {
        // A short rest followed by driving still anchors the restart clock.
        let rest_start = now() - Duration::hours(3);
        let logs = vec![
            entry(DutyStatus::OffDuty, rest_start),
            entry(DutyStatus::Driving, now() - Duration::hours(2)),
        ];
        assert_eq!(
            reset_eligibility(&logs, now(), &HosLimits::FMCSA),
            Some(rest_start + Duration::hours(34))
        );
    }
}
