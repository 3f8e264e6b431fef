//! Calculation logic for the HOS compliance engine.
//!
//! This module contains the pure functions that evaluate a driver's log:
//! trailing-window aggregation for the drive, shift and cycle limits, the
//! 30-minute break countdown, violation detection, 34-hour restart
//! eligibility, log-entry validation, and the combined compliance report.
//! None of them keep state between calls.

mod break_due;
mod compliance;
mod entry_validation;
mod limits;
mod reset;
mod time_window;
mod violations;

pub use break_due::{BreakDue, break_due, break_due_minutes};
pub use compliance::{clock_status, evaluate_compliance, format_hours};
pub use entry_validation::{
    DRIVER_REQUIRED, DUTY_STATUS_REQUIRED, LOCATION_REQUIRED, ODOMETER_DECREASED,
    ODOMETER_REQUIRED, OVERLAP, START_TIME_REQUIRED, VEHICLE_REQUIRED, validate_log_entry,
};
pub use limits::{
    BREAK_REQUIRED_AFTER_DRIVING_MINUTES, BREAK_WARNING_MINUTES, CLOCK_WARNING_HOURS,
    CYCLE_60_DAYS, CYCLE_60_HOURS, CYCLE_70_DAYS, CYCLE_70_HOURS, CYCLE_CLOCK_WARNING_HOURS,
    CycleLimit, DRIVE_TIME_LIMIT_HOURS, HosLimits, QUALIFYING_BREAK_MINUTES, RESET_HOURS,
    SHIFT_TIME_LIMIT_HOURS, SHIFT_WINDOW_HOURS,
};
pub use reset::reset_eligibility;
pub use time_window::{
    WindowTotal, aggregate_window, cycle_time_remaining, cycle_time_window, drive_time_remaining,
    drive_time_window, hours_by_status, is_within_window, shift_time_remaining,
    shift_time_window,
};
pub use violations::{
    BREAK_REGULATION, CYCLE_TIME_REGULATION, DRIVE_TIME_REGULATION, SHIFT_TIME_REGULATION,
    detect_violations,
};
