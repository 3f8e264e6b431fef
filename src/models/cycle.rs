//! Cycle type model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The rolling multi-day cycle a carrier operates under.
///
/// The tag only selects a cycle; the hour and day limits themselves come from
/// [`HosLimits`](crate::calculation::HosLimits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CycleType {
    /// 60 hours in 7 consecutive days.
    #[serde(rename = "60_7")]
    Sixty,
    /// 70 hours in 8 consecutive days.
    #[default]
    #[serde(rename = "70_8")]
    Seventy,
}

impl fmt::Display for CycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleType::Sixty => f.write_str("60h/7d"),
            CycleType::Seventy => f.write_str("70h/8d"),
        }
    }
}
