//! Point-in-time compliance evaluation.
//!
//! [`evaluate_compliance`] runs every rule of the engine over one driver's log
//! and assembles a [`ComplianceReport`] with remaining-time clocks, active
//! violations, restart eligibility and an audit trace of each rule applied.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ClockKind, ClockStatus, ComplianceReport, CycleType,
    HosClock, HoursSummary, LogEntry,
};

use super::time_window::{WindowTotal, minutes_to_hours};
use super::{
    BreakDue, HosLimits, break_due, cycle_time_window, detect_violations, drive_time_window,
    hours_by_status, reset_eligibility, shift_time_window,
};

/// Formats hours with one decimal place for display.
///
/// # Example
///
/// ```
/// use hos_engine::calculation::format_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_hours(Decimal::new(1033, 2)), "10.3");
/// assert_eq!(format_hours(Decimal::new(11, 0)), "11.0");
/// ```
pub fn format_hours(hours: Decimal) -> String {
    format!("{:.1}", hours.round_dp(1))
}

/// Classifies a clock against its warning threshold.
pub fn clock_status(remaining_hours: Decimal, warning_hours: u32) -> ClockStatus {
    if remaining_hours <= Decimal::ZERO {
        ClockStatus::Critical
    } else if remaining_hours <= Decimal::from(warning_hours) {
        ClockStatus::Warning
    } else {
        ClockStatus::Normal
    }
}

fn build_clock(kind: ClockKind, label: String, total: &WindowTotal, warning_hours: u32) -> HosClock {
    let limit_hours = minutes_to_hours(total.limit_minutes);
    let remaining_hours = total.remaining_hours();
    let percent_remaining = if total.limit_minutes > 0 {
        (Decimal::from(total.remaining_minutes) * Decimal::ONE_HUNDRED
            / Decimal::from(total.limit_minutes))
        .round_dp(1)
    } else {
        Decimal::ZERO
    };

    HosClock {
        kind,
        label,
        limit_hours,
        remaining_hours,
        percent_remaining,
        status: clock_status(remaining_hours, warning_hours),
    }
}

fn hours_str(hours: Decimal) -> String {
    hours.round_dp(2).normalize().to_string()
}

fn window_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    regulation_ref: &str,
    window_label: &str,
    total: &WindowTotal,
) -> AuditStep {
    let reasoning = if total.is_exhausted() {
        format!(
            "{} hours recorded in the last {} reaches the {} hour limit",
            hours_str(total.used_hours()),
            window_label,
            hours_str(minutes_to_hours(total.limit_minutes))
        )
    } else {
        format!(
            "{} hours recorded in the last {}, {} of {} hours remaining",
            hours_str(total.used_hours()),
            window_label,
            hours_str(total.remaining_hours()),
            hours_str(minutes_to_hours(total.limit_minutes))
        )
    };

    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        regulation_ref: regulation_ref.to_string(),
        input: serde_json::json!({
            "window_start": total.window_start.to_rfc3339(),
            "entries_counted": total.entries_counted,
            "limit_hours": hours_str(minutes_to_hours(total.limit_minutes)),
        }),
        output: serde_json::json!({
            "used_hours": hours_str(total.used_hours()),
            "remaining_hours": hours_str(total.remaining_hours()),
        }),
        reasoning,
    }
}

fn break_step(step_number: u32, result: &BreakDue, limits: &HosLimits) -> AuditStep {
    let reasoning = match result.last_break_start {
        Some(start) => format!(
            "{} driving minutes since the break starting {}, {} minutes until a break is required",
            result.counted_minutes,
            start.to_rfc3339(),
            result.minutes_remaining
        ),
        None if result.counted_minutes > 0 => format!(
            "No qualifying break found; {} minutes since driving began, {} minutes until a break is required",
            result.counted_minutes, result.minutes_remaining
        ),
        None => "No qualifying break and no driving recorded; full allowance available".to_string(),
    };

    AuditStep {
        step_number,
        rule_id: "break_due".to_string(),
        rule_name: "30-Minute Break Requirement".to_string(),
        regulation_ref: super::violations::BREAK_REGULATION.to_string(),
        input: serde_json::json!({
            "allowance_minutes": limits.break_after_driving_minutes,
            "qualifying_break_minutes": limits.qualifying_break_minutes,
            "last_break_start": result.last_break_start.map(|t| t.to_rfc3339()),
        }),
        output: serde_json::json!({
            "counted_minutes": result.counted_minutes,
            "minutes_remaining": result.minutes_remaining,
        }),
        reasoning,
    }
}

fn reset_step(
    step_number: u32,
    eligible_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    limits: &HosLimits,
) -> AuditStep {
    let reasoning = match eligible_at {
        None => "No off-duty or sleeper-berth entry recorded; restart not determinable".to_string(),
        Some(at) if at <= now => "Restart period already elapsed; eligible now".to_string(),
        Some(at) => format!("Restart eligible at {}", at.to_rfc3339()),
    };

    AuditStep {
        step_number,
        rule_id: "reset_eligibility".to_string(),
        rule_name: "34-Hour Restart".to_string(),
        regulation_ref: "49 CFR 395.3(c)".to_string(),
        input: serde_json::json!({ "reset_hours": limits.reset_hours }),
        output: serde_json::json!({ "eligible_at": eligible_at.map(|t| t.to_rfc3339()) }),
        reasoning,
    }
}

fn clock_warning(clock: &HosClock) -> Option<AuditWarning> {
    match clock.status {
        ClockStatus::Normal => None,
        ClockStatus::Warning => Some(AuditWarning {
            code: format!("{}_time_low", clock_code(clock.kind)),
            message: format!(
                "{}: {} of {} hours remaining",
                clock.label,
                format_hours(clock.remaining_hours),
                format_hours(clock.limit_hours)
            ),
            severity: "medium".to_string(),
        }),
        ClockStatus::Critical => Some(AuditWarning {
            code: format!("{}_time_exhausted", clock_code(clock.kind)),
            message: format!("{}: limit exceeded", clock.label),
            severity: "high".to_string(),
        }),
    }
}

fn clock_code(kind: ClockKind) -> &'static str {
    match kind {
        ClockKind::Drive => "drive",
        ClockKind::Shift => "shift",
        ClockKind::Cycle => "cycle",
    }
}

/// Evaluates a driver's log at `now` and assembles a full compliance report.
///
/// An empty log yields full limits, no violations and no restart time.
///
/// # Examples
///
/// ```
/// use hos_engine::calculation::{evaluate_compliance, HosLimits};
/// use hos_engine::models::CycleType;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let report = evaluate_compliance(&[], Utc::now(), CycleType::Seventy, &HosLimits::FMCSA);
/// assert!(report.is_compliant);
/// assert_eq!(report.hours_summary.drive_remaining, Decimal::new(11, 0));
/// assert_eq!(report.hours_summary.break_required_in, 480);
/// assert_eq!(report.reset_eligible_at, None);
/// ```
pub fn evaluate_compliance(
    logs: &[LogEntry],
    now: DateTime<Utc>,
    cycle: CycleType,
    limits: &HosLimits,
) -> ComplianceReport {
    let started = Instant::now();
    let report_id = Uuid::new_v4();
    debug!(report_id = %report_id, entries = logs.len(), %cycle, "Evaluating HOS compliance");

    let drive = drive_time_window(logs, now, limits);
    let shift = shift_time_window(logs, now, limits);
    let cycle_total = cycle_time_window(logs, now, cycle, limits);
    let break_result = break_due(logs, now, limits);
    let violations = detect_violations(logs, now, limits);
    let reset_eligible_at = reset_eligibility(logs, now, limits);

    let window_label = format!("{} hours", limits.shift_window_hours);
    let cycle_label = format!("{} days", limits.cycle(cycle).days);
    let steps = vec![
        window_step(
            1,
            "drive_time_window",
            "11-Hour Driving Limit",
            super::violations::DRIVE_TIME_REGULATION,
            &window_label,
            &drive,
        ),
        window_step(
            2,
            "shift_time_window",
            "14-Hour On-Duty Window",
            super::violations::SHIFT_TIME_REGULATION,
            &window_label,
            &shift,
        ),
        window_step(
            3,
            "cycle_time_window",
            "60/70-Hour Cycle Limit",
            super::violations::CYCLE_TIME_REGULATION,
            &cycle_label,
            &cycle_total,
        ),
        break_step(4, &break_result, limits),
        reset_step(5, reset_eligible_at, now, limits),
    ];

    let clocks = vec![
        build_clock(
            ClockKind::Drive,
            "Drive Time".to_string(),
            &drive,
            limits.clock_warning_hours,
        ),
        build_clock(
            ClockKind::Shift,
            "Shift Time".to_string(),
            &shift,
            limits.clock_warning_hours,
        ),
        build_clock(
            ClockKind::Cycle,
            format!("Cycle ({})", cycle),
            &cycle_total,
            limits.cycle_clock_warning_hours,
        ),
    ];

    let break_warning =
        break_result.minutes_remaining <= i64::from(limits.break_warning_minutes);

    let mut warnings: Vec<AuditWarning> = clocks.iter().filter_map(clock_warning).collect();
    if break_warning {
        warnings.push(AuditWarning {
            code: "break_due_soon".to_string(),
            message: format!(
                "30-minute break required in {} minutes",
                break_result.minutes_remaining
            ),
            severity: if break_result.minutes_remaining <= 0 {
                "high".to_string()
            } else {
                "medium".to_string()
            },
        });
    }

    let is_compliant = violations.is_empty();
    let duration_us = started.elapsed().as_micros() as u64;

    info!(
        report_id = %report_id,
        violations = violations.len(),
        is_compliant,
        duration_us,
        "HOS compliance evaluated"
    );

    ComplianceReport {
        report_id,
        evaluated_at: now,
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        driver_id: logs.first().map(|log| log.driver_id.clone()),
        cycle,
        hours_summary: HoursSummary {
            drive_remaining: drive.remaining_hours(),
            shift_remaining: shift.remaining_hours(),
            cycle_remaining: cycle_total.remaining_hours(),
            break_required_in: break_result.minutes_remaining,
        },
        clocks,
        break_warning,
        hours_by_status: hours_by_status(logs),
        violations,
        reset_eligible_at,
        is_compliant,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}
