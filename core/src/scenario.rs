//! Scenario inputs: the rate table, presets, and the sanitized parameter
//! bundle both computation paths take.
//!
//! All inputs arrive as raw form-field numbers. Sanitization never fails:
//! invalid numbers coerce to documented fallbacks instead of propagating
//! NaN into the arithmetic.

use crate::category::Category;
use crate::config::Region;
use crate::error::ForecastError;
use crate::types::{Money, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback device price when the input is non-numeric or non-positive.
pub const DEFAULT_PRICE: Money = 300.0;

/// Fallback quota when the input is non-numeric or non-positive.
pub const DEFAULT_DEVICES_PER_USER: f64 = 1.0;

/// Per-category purchase-likelihood percentages. Independent of region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub very_high: Percent,
    pub high: Percent,
    pub medium: Percent,
    pub low: Percent,
    pub very_low: Percent,
}

impl RateTable {
    pub const fn new(
        very_high: Percent,
        high: Percent,
        medium: Percent,
        low: Percent,
        very_low: Percent,
    ) -> Self {
        Self {
            very_high,
            high,
            medium,
            low,
            very_low,
        }
    }

    pub fn get(&self, category: Category) -> Percent {
        match category {
            Category::VeryHigh => self.very_high,
            Category::High => self.high,
            Category::Medium => self.medium,
            Category::Low => self.low,
            Category::VeryLow => self.very_low,
        }
    }

    pub fn set(&mut self, category: Category, rate: Percent) {
        match category {
            Category::VeryHigh => self.very_high = rate,
            Category::High => self.high = rate,
            Category::Medium => self.medium = rate,
            Category::Low => self.low = rate,
            Category::VeryLow => self.very_low = rate,
        }
    }

    /// Coerce every rate to a usable percentage: non-finite values become
    /// 0.0 and negative values clamp to 0.0. Rates above 100 are left alone;
    /// the monthly path is bounded by the remaining pool regardless.
    pub fn sanitized(mut self) -> Self {
        for category in Category::ALL {
            self.set(category, sanitize_rate(self.get(category)));
        }
        self
    }
}

impl Default for RateTable {
    /// The "likely" preset, matching the shipped survey estimates.
    fn default() -> Self {
        Preset::Likely.rates()
    }
}

/// A named rate bundle. Applying a preset replaces the entire table
/// atomically; there is no per-category merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    Optimistic,
    Likely,
    Conservative,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Optimistic, Preset::Likely, Preset::Conservative];

    pub fn key(self) -> &'static str {
        match self {
            Preset::Optimistic => "optimistic",
            Preset::Likely => "likely",
            Preset::Conservative => "conservative",
        }
    }

    pub fn rates(self) -> RateTable {
        match self {
            Preset::Optimistic => RateTable::new(85.0, 70.0, 50.0, 25.0, 10.0),
            Preset::Likely => RateTable::new(78.0, 56.0, 34.0, 17.0, 6.0),
            Preset::Conservative => RateTable::new(65.0, 45.0, 25.0, 10.0, 3.0),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Preset {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| ForecastError::UnknownPreset { name: s.to_string() })
    }
}

/// The immutable input bundle for one forecast run.
///
/// Constructed through [`Scenario::new`], which applies the fallback policy,
/// so downstream arithmetic never sees NaN or a non-positive price/quota.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub region: Region,
    pub rates: RateTable,
    pub price: Money,
    pub devices_per_user: f64,
}

impl Scenario {
    pub fn new(region: Region, rates: RateTable, price: Money, devices_per_user: f64) -> Self {
        Self {
            region,
            rates: rates.sanitized(),
            price: sanitize_positive(price, DEFAULT_PRICE, "price"),
            devices_per_user: sanitize_positive(
                devices_per_user,
                DEFAULT_DEVICES_PER_USER,
                "devices per user",
            ),
        }
    }
}

fn sanitize_positive(value: f64, fallback: f64, field: &str) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("invalid {field} {value}; falling back to {fallback}");
        fallback
    }
}

fn sanitize_rate(value: Percent) -> Percent {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
