//! Ruleset loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading HOS rulesets
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::calculation::HosLimits;
use crate::error::{EngineError, EngineResult};

use super::types::{RulesetConfig, RulesetMetadata};

/// Loads and provides access to an HOS ruleset.
///
/// # Directory Structure
///
/// The ruleset directory should have the following structure:
/// ```text
/// config/fmcsa_property/
/// ├── ruleset.yaml   # Ruleset metadata
/// └── limits.yaml    # Drive, shift, cycle, break and restart limits
/// ```
///
/// # Example
///
/// ```no_run
/// use hos_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/fmcsa_property").unwrap();
/// println!("Loaded ruleset: {}", loader.ruleset().name);
/// println!("Drive limit: {}h", loader.limits().drive_time_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RulesetConfig,
}

impl ConfigLoader {
    /// Loads a ruleset from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The limits are inconsistent
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hos_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/fmcsa_property")?;
    /// # Ok::<(), hos_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RulesetMetadata>(&path.join("ruleset.yaml"))?;
        let limits = Self::load_yaml::<HosLimits>(&path.join("limits.yaml"))?;
        validate_limits(&limits)?;

        info!(
            ruleset = %metadata.code,
            path = %path.display(),
            "Loaded HOS ruleset"
        );

        Ok(Self {
            config: RulesetConfig::new(metadata, limits),
        })
    }

    /// Returns the built-in FMCSA property-carrying ruleset without touching disk.
    pub fn fmcsa() -> Self {
        let metadata = RulesetMetadata {
            code: "fmcsa_property".to_string(),
            name: "FMCSA Hours of Service - Property-Carrying Drivers".to_string(),
            regulation: "49 CFR Part 395".to_string(),
            jurisdiction: "US".to_string(),
            source_url: "https://www.ecfr.gov/current/title-49/subtitle-B/chapter-III/subchapter-B/part-395"
                .to_string(),
        };

        Self {
            config: RulesetConfig::new(metadata, HosLimits::FMCSA),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying ruleset.
    pub fn config(&self) -> &RulesetConfig {
        &self.config
    }

    /// Returns the ruleset metadata.
    pub fn ruleset(&self) -> &RulesetMetadata {
        self.config.metadata()
    }

    /// Returns the limits to evaluate logs against.
    pub fn limits(&self) -> &HosLimits {
        self.config.limits()
    }
}

/// Longest shift window a ruleset may declare, in hours.
const MAX_SHIFT_WINDOW_HOURS: u32 = 24;
/// Longest cycle a ruleset may declare, in days.
const MAX_CYCLE_DAYS: u32 = 31;
/// Longest restart a ruleset may declare, in hours.
const MAX_RESET_HOURS: u32 = 7 * 24;

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidRuleset {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Checks that a set of limits is internally consistent.
pub fn validate_limits(limits: &HosLimits) -> EngineResult<()> {
    let positive = [
        ("drive_time_hours", limits.drive_time_hours),
        ("shift_window_hours", limits.shift_window_hours),
        ("shift_time_hours", limits.shift_time_hours),
        ("cycle_60.hours", limits.cycle_60.hours),
        ("cycle_60.days", limits.cycle_60.days),
        ("cycle_70.hours", limits.cycle_70.hours),
        ("cycle_70.days", limits.cycle_70.days),
        ("break_after_driving_minutes", limits.break_after_driving_minutes),
        ("qualifying_break_minutes", limits.qualifying_break_minutes),
        ("reset_hours", limits.reset_hours),
    ];

    if let Some((field, _)) = positive.iter().find(|(_, value)| *value == 0) {
        return Err(invalid(field, "must be greater than zero"));
    }

    if limits.shift_window_hours > MAX_SHIFT_WINDOW_HOURS {
        return Err(invalid(
            "shift_window_hours",
            &format!("cannot exceed {} hours", MAX_SHIFT_WINDOW_HOURS),
        ));
    }

    for (field, cycle) in [("cycle_60", limits.cycle_60), ("cycle_70", limits.cycle_70)] {
        if cycle.days > MAX_CYCLE_DAYS {
            return Err(invalid(
                &format!("{}.days", field),
                &format!("cannot exceed {} days", MAX_CYCLE_DAYS),
            ));
        }
        if cycle.hours > cycle.days * 24 {
            return Err(invalid(
                &format!("{}.hours", field),
                "cannot exceed the hours in the cycle",
            ));
        }
    }

    if limits.reset_hours > MAX_RESET_HOURS {
        return Err(invalid(
            "reset_hours",
            &format!("cannot exceed {} hours", MAX_RESET_HOURS),
        ));
    }

    if limits.drive_time_hours > limits.shift_time_hours {
        return Err(invalid(
            "drive_time_hours",
            "cannot exceed shift_time_hours",
        ));
    }

    if limits.shift_time_hours > limits.shift_window_hours {
        return Err(invalid(
            "shift_time_hours",
            "cannot exceed shift_window_hours",
        ));
    }

    if limits.break_after_driving_minutes > limits.shift_window_hours * 60 {
        return Err(invalid(
            "break_after_driving_minutes",
            "cannot exceed shift_window_hours",
        ));
    }

    if limits.qualifying_break_minutes >= limits.break_after_driving_minutes {
        return Err(invalid(
            "qualifying_break_minutes",
            "must be shorter than break_after_driving_minutes",
        ));
    }

    Ok(())
}
