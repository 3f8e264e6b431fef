//! Regulatory limits for the Hours-of-Service rules.
//!
//! The FMCSA property-carrying values are exposed as named constants and
//! bundled into [`HosLimits::FMCSA`]. Every calculation takes a `&HosLimits`
//! so a ruleset loaded from configuration can be evaluated the same way.

use serde::{Deserialize, Serialize};

use crate::models::CycleType;

/// Maximum driving hours within the shift window.
///
/// 49 CFR 395.3(a)(3)(i).
pub const DRIVE_TIME_LIMIT_HOURS: u32 = 11;

/// Length of the trailing window the drive and shift limits are measured in.
pub const SHIFT_WINDOW_HOURS: u32 = 14;

/// Maximum on-duty hours within the shift window.
///
/// 49 CFR 395.3(a)(2).
pub const SHIFT_TIME_LIMIT_HOURS: u32 = 14;

/// On-duty hour limit of the 70-hour cycle.
pub const CYCLE_70_HOURS: u32 = 70;

/// Day span of the 70-hour cycle.
pub const CYCLE_70_DAYS: u32 = 8;

/// On-duty hour limit of the 60-hour cycle.
pub const CYCLE_60_HOURS: u32 = 60;

/// Day span of the 60-hour cycle.
pub const CYCLE_60_DAYS: u32 = 7;

/// Driving minutes allowed before a break is mandatory.
///
/// 49 CFR 395.3(a)(3)(ii).
pub const BREAK_REQUIRED_AFTER_DRIVING_MINUTES: u32 = 480;

/// Minimum length of an off-duty or sleeper-berth period that counts as a break.
pub const QUALIFYING_BREAK_MINUTES: u32 = 30;

/// Consecutive rest hours needed to restart the cycle.
///
/// 49 CFR 395.3(c).
pub const RESET_HOURS: u32 = 34;

/// Drive and shift clocks turn to warning at or below this many hours.
pub const CLOCK_WARNING_HOURS: u32 = 2;

/// The cycle clock turns to warning at or below this many hours.
pub const CYCLE_CLOCK_WARNING_HOURS: u32 = 10;

/// A break is flagged as due soon at or below this many minutes.
pub const BREAK_WARNING_MINUTES: u32 = 60;

/// Hour and day bounds of a rolling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleLimit {
    /// Maximum on-duty hours in the cycle.
    pub hours: u32,
    /// Length of the trailing window in days.
    pub days: u32,
}

/// The complete set of limits an evaluation runs against.
///
/// # Example
///
/// ```
/// use hos_engine::calculation::{HosLimits, DRIVE_TIME_LIMIT_HOURS};
/// use hos_engine::models::CycleType;
///
/// let limits = HosLimits::default();
/// assert_eq!(limits.drive_time_hours, DRIVE_TIME_LIMIT_HOURS);
/// assert_eq!(limits.cycle(CycleType::Sixty).days, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HosLimits {
    /// Maximum driving hours in the shift window.
    pub drive_time_hours: u32,
    /// Length of the shift window in hours.
    pub shift_window_hours: u32,
    /// Maximum on-duty hours in the shift window.
    pub shift_time_hours: u32,
    /// The 60-hour/7-day cycle.
    pub cycle_60: CycleLimit,
    /// The 70-hour/8-day cycle.
    pub cycle_70: CycleLimit,
    /// Driving minutes allowed before a break is mandatory.
    pub break_after_driving_minutes: u32,
    /// Minimum break length in minutes.
    pub qualifying_break_minutes: u32,
    /// Rest hours needed for a cycle restart.
    pub reset_hours: u32,
    /// Warning threshold for the drive and shift clocks, in hours.
    pub clock_warning_hours: u32,
    /// Warning threshold for the cycle clock, in hours.
    pub cycle_clock_warning_hours: u32,
    /// Warning threshold for an upcoming break, in minutes.
    pub break_warning_minutes: u32,
}

impl HosLimits {
    /// FMCSA property-carrying limits.
    pub const FMCSA: HosLimits = HosLimits {
        drive_time_hours: DRIVE_TIME_LIMIT_HOURS,
        shift_window_hours: SHIFT_WINDOW_HOURS,
        shift_time_hours: SHIFT_TIME_LIMIT_HOURS,
        cycle_60: CycleLimit {
            hours: CYCLE_60_HOURS,
            days: CYCLE_60_DAYS,
        },
        cycle_70: CycleLimit {
            hours: CYCLE_70_HOURS,
            days: CYCLE_70_DAYS,
        },
        break_after_driving_minutes: BREAK_REQUIRED_AFTER_DRIVING_MINUTES,
        qualifying_break_minutes: QUALIFYING_BREAK_MINUTES,
        reset_hours: RESET_HOURS,
        clock_warning_hours: CLOCK_WARNING_HOURS,
        cycle_clock_warning_hours: CYCLE_CLOCK_WARNING_HOURS,
        break_warning_minutes: BREAK_WARNING_MINUTES,
    };

    /// Returns the bounds of the given cycle.
    pub fn cycle(&self, cycle: CycleType) -> CycleLimit {
        match cycle {
            CycleType::Sixty => self.cycle_60,
            CycleType::Seventy => self.cycle_70,
        }
    }
}

impl Default for HosLimits {
    fn default() -> Self {
        Self::FMCSA
    }
}
