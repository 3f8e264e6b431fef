//! Configuration types for HOS rulesets.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML ruleset files.

use serde::Deserialize;

use crate::calculation::HosLimits;

/// Metadata about the ruleset.
///
/// Identifies the regulation the limits were taken from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RulesetMetadata {
    /// Short code for the ruleset (e.g., "fmcsa_property").
    pub code: String,
    /// The human-readable name of the ruleset.
    pub name: String,
    /// The governing regulation (e.g., "49 CFR Part 395").
    pub regulation: String,
    /// Where the ruleset applies.
    pub jurisdiction: String,
    /// URL to the official regulation text.
    pub source_url: String,
}

/// The complete ruleset loaded from YAML files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesetConfig {
    metadata: RulesetMetadata,
    limits: HosLimits,
}

impl RulesetConfig {
    /// Creates a new RulesetConfig from its component parts.
    pub fn new(metadata: RulesetMetadata, limits: HosLimits) -> Self {
        Self { metadata, limits }
    }

    /// Returns the ruleset metadata.
    pub fn metadata(&self) -> &RulesetMetadata {
        &self.metadata
    }

    /// Returns the limits.
    pub fn limits(&self) -> &HosLimits {
        &self.limits
    }
}
