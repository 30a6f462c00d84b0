//! The five purchase-likelihood categories.
//!
//! Categories are mutually exclusive: every user in a region belongs to
//! exactly one, based on their scored engagement history. The set is fixed
//! and ordered; it is never extended at runtime.

use crate::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl Category {
    /// All categories in canonical display order.
    pub const ALL: [Category; 5] = [
        Category::VeryHigh,
        Category::High,
        Category::Medium,
        Category::Low,
        Category::VeryLow,
    ];

    /// Stable camelCase key, as used in the JSON data files and on the CLI.
    pub fn key(self) -> &'static str {
        match self {
            Category::VeryHigh => "veryHigh",
            Category::High => "high",
            Category::Medium => "medium",
            Category::Low => "low",
            Category::VeryLow => "veryLow",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Category::VeryHigh => "Very High",
            Category::High => "High",
            Category::Medium => "Medium",
            Category::Low => "Low",
            Category::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ForecastError::UnknownCategory { name: s.to_string() })
    }
}
