//! One-shot snapshot calculator.
//!
//! For each of the five mutually-exclusive categories, multiplies the
//! category population by its purchase rate to get a one-time sales and
//! revenue estimate. Pure and stateless: totals derive only from the
//! current inputs, with no memory of prior calls and no quota tracking.

use crate::category::Category;
use crate::config::RegionPopulation;
use crate::scenario::RateTable;
use crate::types::{Money, Percent, UserCount};
use serde::{Deserialize, Serialize};

/// One breakdown-table row per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: Category,
    pub users: UserCount,
    pub rate: Percent,
    pub purchasing_users: UserCount,
    /// Fractional when the devices-per-user quota is fractional.
    pub devices_sold: f64,
    pub revenue: Money,
}

/// Per-category rows plus the aggregate summary panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReport {
    pub rows: Vec<CategoryRow>,
    pub total_users: UserCount,
    pub total_purchasing_users: UserCount,
    pub total_devices_sold: f64,
    pub total_revenue: Money,
    /// Purchasing users over total users, as a percentage. 0.0 for an empty
    /// population.
    pub conversion_rate: Percent,
}

pub fn snapshot(
    population: RegionPopulation,
    rates: &RateTable,
    price: Money,
    devices_per_user: f64,
) -> SnapshotReport {
    let mut rows = Vec::with_capacity(Category::ALL.len());

    for category in Category::ALL {
        let users = population.get(category);
        let rate = rates.get(category);
        let purchasing_users = (users as f64 * rate / 100.0).round() as UserCount;
        let devices_sold = purchasing_users as f64 * devices_per_user;
        let revenue = devices_sold * price;

        rows.push(CategoryRow {
            category,
            users,
            rate,
            purchasing_users,
            devices_sold,
            revenue,
        });
    }

    // Categories are mutually exclusive, so plain sums do not double-count.
    let total_users = population.total();
    let total_purchasing_users: UserCount = rows.iter().map(|r| r.purchasing_users).sum();
    let total_devices_sold: f64 = rows.iter().map(|r| r.devices_sold).sum();
    let total_revenue = total_devices_sold * price;

    let conversion_rate = if total_users > 0 {
        total_purchasing_users as f64 / total_users as f64 * 100.0
    } else {
        0.0
    };

    log::debug!(
        "snapshot: {total_users} users -> {total_purchasing_users} purchasers \
         ({conversion_rate:.1}%), revenue ${total_revenue:.0}"
    );

    SnapshotReport {
        rows,
        total_users,
        total_purchasing_users,
        total_devices_sold,
        total_revenue,
        conversion_rate,
    }
}
