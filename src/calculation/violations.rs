//! Violation detection.
//!
//! Four independent checks run on every call, always in the same order, and
//! each fired check yields exactly one [`Violation`] stamped with the
//! reference time. A compliant log yields an empty list.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::models::{CycleType, LogEntry, Severity, Violation, ViolationType};

use super::{HosLimits, break_due_minutes, cycle_time_window, drive_time_window, shift_time_window};

/// Regulation cited for the driving limit.
pub const DRIVE_TIME_REGULATION: &str = "49 CFR 395.3(a)(1)";

/// Regulation cited for the on-duty window.
pub const SHIFT_TIME_REGULATION: &str = "49 CFR 395.3(a)(2)";

/// Regulation cited for the cycle limit.
pub const CYCLE_TIME_REGULATION: &str = "49 CFR 395.3(b)";

/// Regulation cited for the 30-minute break.
pub const BREAK_REGULATION: &str = "49 CFR 395.3(a)(3)(ii)";

impl ViolationType {
    /// Fixed severity of the rule.
    pub fn severity(self) -> Severity {
        match self {
            ViolationType::DriveTimeExceeded | ViolationType::ShiftTimeExceeded => {
                Severity::Critical
            }
            ViolationType::CycleTimeExceeded | ViolationType::BreakRequired => Severity::Major,
        }
    }

    /// Regulation citation for the rule.
    pub fn regulation_reference(self) -> &'static str {
        match self {
            ViolationType::DriveTimeExceeded => DRIVE_TIME_REGULATION,
            ViolationType::ShiftTimeExceeded => SHIFT_TIME_REGULATION,
            ViolationType::CycleTimeExceeded => CYCLE_TIME_REGULATION,
            ViolationType::BreakRequired => BREAK_REGULATION,
        }
    }

    /// Human-readable description of the rule, worded from `limits`.
    ///
    /// # Example
    ///
    /// ```
    /// use hos_engine::calculation::HosLimits;
    /// use hos_engine::models::ViolationType;
    ///
    /// assert_eq!(
    ///     ViolationType::DriveTimeExceeded.description(&HosLimits::FMCSA),
    ///     "11-hour driving limit exceeded"
    /// );
    /// ```
    pub fn description(self, limits: &HosLimits) -> String {
        match self {
            ViolationType::DriveTimeExceeded => {
                format!("{}-hour driving limit exceeded", limits.drive_time_hours)
            }
            ViolationType::ShiftTimeExceeded => {
                format!("{}-hour on-duty limit exceeded", limits.shift_time_hours)
            }
            ViolationType::CycleTimeExceeded => format!(
                "{}-hour/{}-day cycle limit exceeded",
                limits.cycle_70.hours, limits.cycle_70.days
            ),
            ViolationType::BreakRequired => {
                let minutes = limits.break_after_driving_minutes;
                let allowance = if minutes % 60 == 0 {
                    format!("{} hours", minutes / 60)
                } else {
                    format!("{} minutes", minutes)
                };
                format!(
                    "{}-minute break required after {} of driving",
                    limits.qualifying_break_minutes, allowance
                )
            }
        }
    }

    fn id_suffix(self) -> &'static str {
        match self {
            ViolationType::DriveTimeExceeded => "drive",
            ViolationType::ShiftTimeExceeded => "shift",
            ViolationType::CycleTimeExceeded => "cycle",
            ViolationType::BreakRequired => "break",
        }
    }
}

impl Violation {
    /// Builds a violation of the given type detected at `now`.
    ///
    /// The identifier is freshly generated and carries no identity beyond
    /// this evaluation.
    pub fn detected(violation_type: ViolationType, now: DateTime<Utc>, limits: &HosLimits) -> Self {
        Self {
            id: format!(
                "violation_{}_{}",
                Uuid::new_v4().simple(),
                violation_type.id_suffix()
            ),
            violation_type,
            description: violation_type.description(limits),
            regulation_reference: violation_type.regulation_reference().to_string(),
            severity: violation_type.severity(),
            timestamp: now,
        }
    }
}

/// Returns the violations active at `now`.
///
/// The cycle check always uses the 70-hour/8-day cycle.
///
/// # Examples
///
/// ```
/// use hos_engine::calculation::{detect_violations, HosLimits};
/// use chrono::Utc;
///
/// let violations = detect_violations(&[], Utc::now(), &HosLimits::FMCSA);
/// assert!(violations.is_empty());
/// ```
pub fn detect_violations(
    logs: &[LogEntry],
    now: DateTime<Utc>,
    limits: &HosLimits,
) -> Vec<Violation> {
    let checks = [
        (
            ViolationType::DriveTimeExceeded,
            drive_time_window(logs, now, limits).is_exhausted(),
        ),
        (
            ViolationType::ShiftTimeExceeded,
            shift_time_window(logs, now, limits).is_exhausted(),
        ),
        (
            ViolationType::CycleTimeExceeded,
            cycle_time_window(logs, now, CycleType::Seventy, limits).is_exhausted(),
        ),
        (
            ViolationType::BreakRequired,
            break_due_minutes(logs, now, limits) <= 0,
        ),
    ];

    checks
        .into_iter()
        .filter(|(_, fired)| *fired)
        .map(|(violation_type, _)| {
            let violation = Violation::detected(violation_type, now, limits);
            warn!(
                violation_type = ?violation.violation_type,
                severity = ?violation.severity,
                regulation = %violation.regulation_reference,
                "HOS violation detected"
            );
            violation
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DutyStatus, Location};
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap()
    }

    fn entry(status: DutyStatus, start: DateTime<Utc>, minutes: u32) -> LogEntry {
        LogEntry {
            id: format!("log_{}", start.timestamp()),
            driver_id: "drv_001".to_string(),
            vehicle_id: "veh_001".to_string(),
            duty_status: status,
            start_time: start,
            end_time: None,
            duration_minutes: Some(minutes),
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

    fn types(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type).collect()
    }

    #[test]
    fn test_vd_001_empty_log_has_no_violations() {
        assert!(detect_violations(&[], now(), &HosLimits::FMCSA).is_empty());
    }

    // ==========================================================================
    // VD-002: 11 hours of driving started 2 hours ago
    // ==========================================================================
    #[test]
    fn test_vd_002_drive_time_exceeded_is_critical() {
        let logs = vec![entry(DutyStatus::Driving, now() - Duration::hours(2), 660)];

        let violations = detect_violations(&logs, now(), &HosLimits::FMCSA);
        let drive = violations
            .iter()
            .find(|v| v.violation_type == ViolationType::DriveTimeExceeded)
            .expect("drive violation");
        assert_eq!(drive.severity, Severity::Critical);
        assert_eq!(drive.regulation_reference, "49 CFR 395.3(a)(1)");
        assert_eq!(drive.timestamp, now());
        assert!(drive.id.ends_with("_drive"));
    }

    #[test]
    fn test_vd_003_shift_time_exceeded_without_drive_violation() {
        let logs = vec![
            entry(DutyStatus::OnDutyNotDriving, now() - Duration::hours(13), 600),
            entry(DutyStatus::Driving, now() - Duration::hours(3), 240),
        ];

        let violations = detect_violations(&logs, now(), &HosLimits::FMCSA);
        assert_eq!(types(&violations), vec![ViolationType::ShiftTimeExceeded]);
        assert_eq!(violations[0].description, "14-hour on-duty limit exceeded");
    }

    #[test]
    fn test_vd_004_cycle_exceeded_is_major() {
        let logs: Vec<LogEntry> = (1..=7)
            .map(|day| entry(DutyStatus::OnDutyNotDriving, now() - Duration::days(day), 600))
            .collect();

        let violations = detect_violations(&logs, now(), &HosLimits::FMCSA);
        assert_eq!(types(&violations), vec![ViolationType::CycleTimeExceeded]);
        assert_eq!(violations[0].severity, Severity::Major);
        assert_eq!(violations[0].regulation_reference, "49 CFR 395.3(b)");
    }

    #[test]
    fn test_vd_005_break_required() {
        let logs = vec![
            entry(DutyStatus::OffDuty, now() - Duration::hours(13), 60),
            entry(DutyStatus::Driving, now() - Duration::hours(12), 240),
            entry(DutyStatus::Driving, now() - Duration::hours(6), 240),
        ];

        let violations = detect_violations(&logs, now(), &HosLimits::FMCSA);
        assert_eq!(types(&violations), vec![ViolationType::BreakRequired]);
        assert_eq!(violations[0].severity, Severity::Major);
        assert_eq!(violations[0].regulation_reference, "49 CFR 395.3(a)(3)(ii)");
    }

    #[test]
    fn test_vd_006_order_is_fixed() {
        let logs = vec![
            entry(DutyStatus::OffDuty, now() - Duration::hours(2), 30),
            entry(DutyStatus::Driving, now() - Duration::hours(1), 4200),
        ];

        let violations = detect_violations(&logs, now(), &HosLimits::FMCSA);
        assert_eq!(
            types(&violations),
            vec![
                ViolationType::DriveTimeExceeded,
                ViolationType::ShiftTimeExceeded,
                ViolationType::CycleTimeExceeded,
                ViolationType::BreakRequired,
            ]
        );
    }

    #[test]
    fn test_vd_007_ids_are_not_stable_across_calls() {
        let logs = vec![entry(DutyStatus::Driving, now() - Duration::hours(2), 660)];
        let first = detect_violations(&logs, now(), &HosLimits::FMCSA);
        let second = detect_violations(&logs, now(), &HosLimits::FMCSA);
        assert_eq!(types(&first), types(&second));
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_vd_008_just_under_limits_is_compliant() {
        let logs = vec![
            entry(DutyStatus::OffDuty, now() - Duration::hours(12), 60),
            entry(DutyStatus::Driving, now() - Duration::hours(11), 479),
        ];
        assert!(detect_violations(&logs, now(), &HosLimits::FMCSA).is_empty());
    }

    #[test]
    fn test_vd_009_fmcsa_descriptions() {
        let limits = HosLimits::FMCSA;
        assert_eq!(
            ViolationType::CycleTimeExceeded.description(&limits),
            "70-hour/8-day cycle limit exceeded"
        );
        assert_eq!(
            ViolationType::BreakRequired.description(&limits),
            "30-minute break required after 8 hours of driving"
        );
    }

    // ==========================================================================
    // VD-010: descriptions follow a ruleset with different limits
    // ==========================================================================
    #[test]
    fn test_vd_010_descriptions_follow_configured_limits() {
        let limits = HosLimits {
            drive_time_hours: 10,
            shift_time_hours: 13,
            break_after_driving_minutes: 450,
            ..HosLimits::FMCSA
        };
        let logs = vec![
            entry(DutyStatus::OffDuty, now() - Duration::hours(13), 30),
            entry(DutyStatus::Driving, now() - Duration::hours(12), 600),
            entry(DutyStatus::OnDutyNotDriving, now() - Duration::hours(1), 180),
        ];

        let violations = detect_violations(&logs, now(), &limits);
        let descriptions: Vec<&str> = violations.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "10-hour driving limit exceeded",
                "13-hour on-duty limit exceeded",
                "30-minute break required after 450 minutes of driving",
            ]
        );
    }
}
