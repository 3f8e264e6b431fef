//! Hours-of-Service Compliance Engine
//!
//! This crate interprets a driver's duty-status log history against the FMCSA
//! Hours-of-Service rules (49 CFR Part 395) to derive remaining drive, shift
//! and cycle time, break-due countdowns, violations, reset eligibility, and to
//! validate new log entries before they are accepted.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
