//! Violation model.
//!
//! Violations are derived, point-in-time records. They are recomputed on every
//! evaluation and their identifiers are display keys only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The Hours-of-Service rule that was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// More than 11 hours of driving in the shift window.
    DriveTimeExceeded,
    /// More than 14 hours on duty in the shift window.
    ShiftTimeExceeded,
    /// The 60/70-hour cycle limit was reached.
    CycleTimeExceeded,
    /// 8 hours of driving without a 30-minute break.
    BreakRequired,
}

/// How serious a violation is.
///
/// Ordered from least to most severe, so `max()` picks the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Paperwork-level issue.
    Minor,
    /// Must be corrected before the next duty period.
    Major,
    /// Driver must stop now.
    Critical,
}

/// A violation detected at a reference instant.
///
/// # Example
///
/// ```
/// use hos_engine::models::{Severity, Violation, ViolationType};
/// use chrono::Utc;
///
/// let violation = Violation {
///     id: "violation_1_drive".to_string(),
///     violation_type: ViolationType::DriveTimeExceeded,
///     description: "11-hour driving limit exceeded".to_string(),
///     regulation_reference: "49 CFR 395.3(a)(1)".to_string(),
///     severity: Severity::Critical,
///     timestamp: Utc::now(),
/// };
/// assert!(violation.is_critical());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier generated for this evaluation; not stable across calls.
    pub id: String,
    /// The rule that was broken.
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    /// Human-readable description.
    pub description: String,
    /// The regulation citation.
    pub regulation_reference: String,
    /// How serious the violation is.
    pub severity: Severity,
    /// The reference time at which the violation was detected.
    pub timestamp: DateTime<Utc>,
}

impl Violation {
    /// Returns true when the driver must stop immediately.
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}
