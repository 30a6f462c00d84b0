//! Market data tables: regional category populations and the trend month
//! sequence.
//!
//! [`MarketConfig::builtin`] carries the survey-derived tables the product
//! team ships with. [`MarketConfig::load`] reads a JSON file with the same
//! camelCase shape, for what-if runs against revised numbers.

use crate::category::Category;
use crate::error::{ForecastError, ForecastResult};
use crate::types::UserCount;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One of the nine fixed sales regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    Overall,
    Japan,
    LatinAmerica,
    Korea,
    Hkmctw,
    Eua,
    SeAsia,
    NorthAmerica,
    Pacific,
}

impl Region {
    pub const ALL: [Region; 9] = [
        Region::Overall,
        Region::Japan,
        Region::LatinAmerica,
        Region::Korea,
        Region::Hkmctw,
        Region::Eua,
        Region::SeAsia,
        Region::NorthAmerica,
        Region::Pacific,
    ];

    /// Stable camelCase key, as used in the JSON data files and on the CLI.
    pub fn key(self) -> &'static str {
        match self {
            Region::Overall => "overall",
            Region::Japan => "japan",
            Region::LatinAmerica => "latinAmerica",
            Region::Korea => "korea",
            Region::Hkmctw => "hkmctw",
            Region::Eua => "eua",
            Region::SeAsia => "seAsia",
            Region::NorthAmerica => "northAmerica",
            Region::Pacific => "pacific",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Region::Overall => "Global",
            Region::Japan => "Japan",
            Region::LatinAmerica => "Latin America",
            Region::Korea => "Korea",
            Region::Hkmctw => "HK/MC/TW",
            Region::Eua => "EU&A",
            Region::SeAsia => "S.E. Asia",
            Region::NorthAmerica => "North America",
            Region::Pacific => "Pacific",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.key() == s)
            .ok_or_else(|| ForecastError::UnknownRegion { name: s.to_string() })
    }
}

/// Per-category user counts for one region.
///
/// The five counts partition the region's unique user base: a user belongs
/// to exactly one category, so `total()` is the region's unique user count
/// with no double-counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPopulation {
    pub very_high: UserCount,
    pub high: UserCount,
    pub medium: UserCount,
    pub low: UserCount,
    pub very_low: UserCount,
}

impl RegionPopulation {
    pub const fn new(
        very_high: UserCount,
        high: UserCount,
        medium: UserCount,
        low: UserCount,
        very_low: UserCount,
    ) -> Self {
        Self {
            very_high,
            high,
            medium,
            low,
            very_low,
        }
    }

    pub fn get(&self, category: Category) -> UserCount {
        match category {
            Category::VeryHigh => self.very_high,
            Category::High => self.high,
            Category::Medium => self.medium,
            Category::Low => self.low,
            Category::VeryLow => self.very_low,
        }
    }

    /// Total unique users in the region.
    pub fn total(&self) -> UserCount {
        Category::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// One labeled period in the trend sequence, with the historical active-user
/// count observed that month. The observed count is display context only; it
/// plays no part in the projection arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub label: String,
    pub users: UserCount,
}

impl MonthRecord {
    pub fn new(label: &str, users: UserCount) -> Self {
        Self {
            label: label.to_string(),
            users,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub populations: HashMap<Region, RegionPopulation>,
    pub months: Vec<MonthRecord>,
}

impl MarketConfig {
    /// The shipped market tables, from the distributor survey export.
    pub fn builtin() -> Self {
        let populations = [
            (Region::Overall, RegionPopulation::new(882, 2852, 19208, 13264, 5335)),
            (Region::Japan, RegionPopulation::new(245, 824, 5502, 1295, 179)),
            (Region::LatinAmerica, RegionPopulation::new(171, 267, 1246, 1563, 420)),
            (Region::Korea, RegionPopulation::new(60, 354, 3249, 1939, 228)),
            (Region::Hkmctw, RegionPopulation::new(54, 234, 1446, 1246, 409)),
            (Region::Eua, RegionPopulation::new(92, 328, 2574, 1576, 219)),
            (Region::SeAsia, RegionPopulation::new(64, 260, 1525, 2691, 3299)),
            (Region::NorthAmerica, RegionPopulation::new(157, 517, 3141, 2324, 418)),
            (Region::Pacific, RegionPopulation::new(39, 68, 525, 630, 163)),
        ]
        .into();

        let months = vec![
            MonthRecord::new("Jun 2024", 32258),
            MonthRecord::new("Jul 2024", 32757),
            MonthRecord::new("Aug 2024", 32452),
            MonthRecord::new("Sep 2024", 32829),
            MonthRecord::new("Oct 2024", 32152),
            MonthRecord::new("Nov 2024", 31636),
            MonthRecord::new("Dec 2024", 31838),
        ];

        Self {
            populations,
            months,
        }
    }

    /// Load from a JSON file. In tests and as the default, use
    /// `MarketConfig::builtin()`.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: MarketConfig = serde_json::from_str(&content)?;

        for region in Region::ALL {
            if !config.populations.contains_key(&region) {
                anyhow::bail!("{path}: missing population table for region '{}'", region.key());
            }
        }
        if config.months.is_empty() {
            anyhow::bail!("{path}: month sequence is empty");
        }

        Ok(config)
    }

    pub fn population(&self, region: Region) -> ForecastResult<RegionPopulation> {
        self.populations
            .get(&region)
            .copied()
            .ok_or_else(|| ForecastError::UnknownRegion {
                name: region.key().to_string(),
            })
    }
}
