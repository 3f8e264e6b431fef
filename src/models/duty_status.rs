//! Duty status model.
//!
//! A duty status decides which time-window buckets a log entry's duration
//! contributes to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category of activity a driver is engaged in.
///
/// # Example
///
/// ```
/// use hos_engine::models::DutyStatus;
///
/// assert!(DutyStatus::Driving.counts_toward_shift());
/// assert!(DutyStatus::SleeperBerth.is_rest());
/// assert_eq!(DutyStatus::OnDutyNotDriving.to_string(), "on_duty_not_driving");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    /// Relieved of all duty.
    OffDuty,
    /// Resting in the sleeper berth.
    SleeperBerth,
    /// At the controls of the vehicle.
    Driving,
    /// Working but not driving (loading, inspections, fuelling).
    OnDutyNotDriving,
    /// Off-duty movement of the vehicle for personal use.
    PersonalConveyance,
    /// On-duty movement within a yard.
    YardMoves,
}

impl DutyStatus {
    /// Every duty status, in a fixed order.
    pub const ALL: [DutyStatus; 6] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDutyNotDriving,
        DutyStatus::PersonalConveyance,
        DutyStatus::YardMoves,
    ];

    /// Returns true for statuses counted against the shift and cycle limits.
    pub fn counts_toward_shift(self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDutyNotDriving)
    }

    /// Returns true for statuses that can satisfy a break or a reset.
    pub fn is_rest(self) -> bool {
        matches!(self, DutyStatus::OffDuty | DutyStatus::SleeperBerth)
    }

    /// The wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::SleeperBerth => "sleeper_berth",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDutyNotDriving => "on_duty_not_driving",
            DutyStatus::PersonalConveyance => "personal_conveyance",
            DutyStatus::YardMoves => "yard_moves",
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
