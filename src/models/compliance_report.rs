//! Compliance report models for the HOS compliance engine.
//!
//! This module contains the [`ComplianceReport`] type and its associated
//! structures that capture every output of a point-in-time evaluation:
//! remaining hours, clocks, violations, reset eligibility, and an audit trace
//! recording how each rule was applied.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CycleType, DutyStatus, Violation};

/// Remaining time against each limit.
///
/// # Example
///
/// ```
/// use hos_engine::models::HoursSummary;
/// use rust_decimal::Decimal;
///
/// let summary = HoursSummary {
///     drive_remaining: Decimal::new(11, 0),
///     shift_remaining: Decimal::new(14, 0),
///     cycle_remaining: Decimal::new(70, 0),
///     break_required_in: 480,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSummary {
    /// Driving hours left in the shift window.
    pub drive_remaining: Decimal,
    /// On-duty hours left in the shift window.
    pub shift_remaining: Decimal,
    /// On-duty hours left in the cycle.
    pub cycle_remaining: Decimal,
    /// Minutes of driving left before a 30-minute break is mandatory.
    pub break_required_in: i64,
}

/// Display state of an HOS clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStatus {
    /// Plenty of time left.
    Normal,
    /// At or below the warning threshold.
    Warning,
    /// Limit exhausted.
    Critical,
}

/// Which limit a clock tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    /// The 11-hour driving limit.
    Drive,
    /// The 14-hour on-duty window.
    Shift,
    /// The 60/70-hour cycle.
    Cycle,
}

/// One remaining-time clock, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HosClock {
    /// The limit this clock tracks.
    pub kind: ClockKind,
    /// Display label, e.g. "Cycle (70h/8d)".
    pub label: String,
    /// The nominal limit in hours.
    pub limit_hours: Decimal,
    /// Hours remaining, in `[0, limit_hours]`.
    pub remaining_hours: Decimal,
    /// Remaining time as a percentage of the limit, rounded to one place.
    pub percent_remaining: Decimal,
    /// Display state derived from the warning threshold.
    pub status: ClockStatus,
}

/// A single step in the audit trace recording a rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The regulation citation for this rule.
    pub regulation_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during evaluation.
///
/// Warnings flag approaching limits; they are not violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of evaluation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during evaluation.
    pub warnings: Vec<AuditWarning>,
    /// The total evaluation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a compliance evaluation.
///
/// A report is a snapshot: it is built fresh on every call and nothing in it
/// is persisted or deduplicated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Unique identifier for this evaluation.
    pub report_id: Uuid,
    /// The reference time the log was evaluated at.
    pub evaluated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The driver the log belongs to, taken from the first entry.
    pub driver_id: Option<String>,
    /// The cycle the remaining cycle hours were computed for.
    pub cycle: CycleType,
    /// Remaining time against each limit.
    pub hours_summary: HoursSummary,
    /// Drive, shift and cycle clocks.
    pub clocks: Vec<HosClock>,
    /// True when a break is due within the warning threshold.
    pub break_warning: bool,
    /// Total hours per duty status across the supplied log.
    pub hours_by_status: BTreeMap<DutyStatus, Decimal>,
    /// Active violations, in fixed rule order.
    pub violations: Vec<Violation>,
    /// When a 34-hour restart completes, if it can be determined.
    pub reset_eligible_at: Option<DateTime<Utc>>,
    /// True when there are no violations.
    pub is_compliant: bool,
    /// Complete audit trace of rule evaluations.
    pub audit_trace: AuditTrace,
}

impl ComplianceReport {
    /// Returns the clock of the given kind.
    pub fn clock(&self, kind: ClockKind) -> Option<&HosClock> {
        self.clocks.iter().find(|c| c.kind == kind)
    }
}
