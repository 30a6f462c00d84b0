//! Quota-constrained monthly projection.
//!
//! Unlike the snapshot calculator, this path is stateful within a run: each
//! user carries a purchase counter capped at the devices-per-user quota, so
//! month ordering and pool exhaustion matter. Once a user reaches quota they
//! are permanently excluded from the remaining pool for all later months.
//!
//! The quota ledger is allocated fresh per run and never escapes it; a run
//! is not restartable mid-sequence.

use crate::category::Category;
use crate::config::{MonthRecord, RegionPopulation};
use crate::scenario::RateTable;
use crate::types::{Money, Percent, UserCount};
use serde::{Deserialize, Serialize};

/// Per-user purchase counters for every category.
///
/// Selection is deterministic: within a category, users advance in ascending
/// index order, skipping anyone already at quota. Counters only ever move up
/// by one per selection.
struct QuotaLedger {
    // Parallel to Category::ALL.
    counters: Vec<Vec<u32>>,
    quota: f64,
}

impl QuotaLedger {
    fn new(population: RegionPopulation, quota: f64) -> Self {
        let counters = Category::ALL
            .iter()
            .map(|&c| vec![0u32; population.get(c) as usize])
            .collect();
        Self { counters, quota }
    }

    /// Users in the category still below quota.
    fn remaining(&self, category: Category) -> UserCount {
        self.counters[category as usize]
            .iter()
            .filter(|&&count| (count as f64) < self.quota)
            .count() as UserCount
    }

    /// Advance up to `want` below-quota users by one device each. Returns
    /// the number actually advanced, which is bounded by the remaining pool.
    fn advance(&mut self, category: Category, want: UserCount) -> UserCount {
        let mut advanced = 0;
        for count in self.counters[category as usize].iter_mut() {
            if advanced == want {
                break;
            }
            if (*count as f64) < self.quota {
                *count += 1;
                advanced += 1;
            }
        }
        advanced
    }
}

/// One trend-table row. Immutable once produced; the projection never
/// revisits a prior month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month: String,
    /// Historical active users observed that month (display context only).
    pub observed_users: UserCount,
    /// Users in any category not yet at quota at the start of the month.
    pub potential_purchasers: UserCount,
    /// Purchasers over potential purchasers, as a percentage. 0.0 once the
    /// market is fully exhausted.
    pub percentage_purchasers: Percent,
    pub number_purchasers: UserCount,
    /// One device per purchase event, so this equals `number_purchasers`.
    pub devices_purchased: UserCount,
    pub revenue: Money,
}

/// Walk the month sequence in order, applying each category's rate to its
/// currently remaining pool and advancing selected users' counters.
pub fn project(
    population: RegionPopulation,
    rates: &RateTable,
    price: Money,
    devices_per_user: f64,
    months: &[MonthRecord],
) -> Vec<MonthRow> {
    let mut ledger = QuotaLedger::new(population, devices_per_user);
    let mut rows = Vec::with_capacity(months.len());

    for record in months {
        let mut potential_purchasers: UserCount = 0;
        let mut number_purchasers: UserCount = 0;

        for category in Category::ALL {
            let remaining = ledger.remaining(category);
            potential_purchasers += remaining;

            // The rate reapplies fresh each month to the remaining pool,
            // not to the original population.
            let rate = rates.get(category);
            let would_purchase = (remaining as f64 * rate / 100.0).round() as UserCount;

            let purchased = ledger.advance(category, would_purchase);
            number_purchasers += purchased;

            if remaining > 0 && ledger.remaining(category) == 0 {
                log::info!("{}: {category} pool exhausted", record.label);
            }
        }

        let percentage_purchasers = if potential_purchasers > 0 {
            number_purchasers as f64 / potential_purchasers as f64 * 100.0
        } else {
            0.0
        };

        let devices_purchased = number_purchasers;
        let revenue = devices_purchased as f64 * price;

        log::debug!(
            "{}: potential={potential_purchasers} purchasers={number_purchasers} \
             revenue=${revenue:.0}",
            record.label
        );

        rows.push(MonthRow {
            month: record.label.clone(),
            observed_users: record.users,
            potential_purchasers,
            percentage_purchasers,
            number_purchasers,
            devices_purchased,
            revenue,
        });
    }

    rows
}

/// Simple sums over the month rows for the trends summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub total_purchasers: UserCount,
    pub total_devices: UserCount,
    pub total_revenue: Money,
    /// Total purchasers over total potential purchasers across the whole
    /// sequence, as a percentage. 0.0 when the denominator is zero.
    pub avg_conversion_rate: Percent,
}

impl TrendSummary {
    pub fn from_rows(rows: &[MonthRow]) -> Self {
        let total_purchasers: UserCount = rows.iter().map(|r| r.number_purchasers).sum();
        let total_devices: UserCount = rows.iter().map(|r| r.devices_purchased).sum();
        let total_revenue: Money = rows.iter().map(|r| r.revenue).sum();
        let total_potential: UserCount = rows.iter().map(|r| r.potential_purchasers).sum();

        let avg_conversion_rate = if total_potential > 0 {
            total_purchasers as f64 / total_potential as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_purchasers,
            total_devices,
            total_revenue,
            avg_conversion_rate,
        }
    }
}
