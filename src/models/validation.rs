//! Validation outcome for candidate log entries.

use serde::{Deserialize, Serialize};

/// The result of validating a candidate log entry.
///
/// `valid` is always `errors.is_empty()`; both are kept so the shape matches
/// what entry forms consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the entry may be accepted.
    pub valid: bool,
    /// Human-readable problems, in the order they were found.
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    /// Builds an outcome from collected error messages.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}
