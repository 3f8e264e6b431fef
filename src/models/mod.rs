//! Core data models for the HOS compliance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compliance_report;
mod cycle;
mod duty_status;
mod log_entry;
mod validation;
mod violation;

pub use compliance_report::{
    AuditStep, AuditTrace, AuditWarning, ClockKind, ClockStatus, ComplianceReport, HosClock,
    HoursSummary,
};
pub use cycle::CycleType;
pub use duty_status::DutyStatus;
pub use log_entry::{Location, LogEntry, LogEntryDraft, parse_timestamp};
pub use validation::ValidationOutcome;
pub use violation::{Severity, Violation, ViolationType};
