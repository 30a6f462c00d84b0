//! Quota-constrained monthly projection tests.

use forecast_core::{
    project, MarketConfig, MonthRecord, Preset, RateTable, Region, RegionPopulation, TrendSummary,
};

fn overall() -> RegionPopulation {
    let _ = env_logger::builder().is_test(true).try_init();
    MarketConfig::builtin().population(Region::Overall).unwrap()
}

fn months() -> Vec<MonthRecord> {
    MarketConfig::builtin().months
}

/// Worked example: overall region, likely rates, $300, quota 1.
/// First-month purchasers are the per-category rounded sums.
#[test]
fn first_month_matches_hand_computed_totals() {
    let rows = project(overall(), &Preset::Likely.rates(), 300.0, 1.0, &months());

    let first = &rows[0];
    assert_eq!(first.month, "Jun 2024");
    assert_eq!(first.potential_purchasers, 41541);
    // round(882*.78) + round(2852*.56) + round(19208*.34)
    //   + round(13264*.17) + round(5335*.06)
    assert_eq!(first.number_purchasers, 11391);
    assert_eq!(first.devices_purchased, 11391);
    assert_eq!(first.revenue, 3_417_300.0);
}

#[test]
fn zero_rates_sell_nothing_in_any_month() {
    let rates = RateTable::new(0.0, 0.0, 0.0, 0.0, 0.0);
    let rows = project(overall(), &rates, 300.0, 1.0, &months());

    for row in &rows {
        assert_eq!(row.number_purchasers, 0, "{}", row.month);
        assert_eq!(row.devices_purchased, 0, "{}", row.month);
        assert_eq!(row.revenue, 0.0, "{}", row.month);
        assert_eq!(row.potential_purchasers, 41541, "{}", row.month);
    }
}

/// All rates 100 with quota 1: the whole market buys in month one and every
/// later month has an empty pool with a defined 0.0 percentage.
#[test]
fn full_rates_exhaust_the_market_in_one_month() {
    let rates = RateTable::new(100.0, 100.0, 100.0, 100.0, 100.0);
    let rows = project(overall(), &rates, 300.0, 1.0, &months());

    assert_eq!(rows[0].number_purchasers, 41541);
    assert_eq!(rows[0].percentage_purchasers, 100.0);

    for row in &rows[1..] {
        assert_eq!(row.potential_purchasers, 0, "{}", row.month);
        assert_eq!(row.number_purchasers, 0, "{}", row.month);
        assert_eq!(row.percentage_purchasers, 0.0, "{}", row.month);
        assert!(row.percentage_purchasers.is_finite());
    }
}

/// Cumulative devices can never exceed total users times the quota.
#[test]
fn cumulative_devices_respect_the_quota_ceiling() {
    for quota in [1.0, 2.0, 3.0] {
        let rows = project(overall(), &Preset::Optimistic.rates(), 300.0, quota, &months());
        let cumulative: u64 = rows.iter().map(|r| r.devices_purchased).sum();
        let ceiling = (41541.0 * quota) as u64;
        assert!(
            cumulative <= ceiling,
            "quota {quota}: {cumulative} devices exceeds ceiling {ceiling}"
        );
    }
}

/// Once a pool empties it stays empty for every later month.
#[test]
fn exhaustion_is_permanent() {
    let population = RegionPopulation::new(10, 0, 0, 0, 0);
    let rates = RateTable::new(100.0, 0.0, 0.0, 0.0, 0.0);
    let rows = project(population, &rates, 300.0, 1.0, &months());

    assert_eq!(rows[0].potential_purchasers, 10);
    assert_eq!(rows[0].number_purchasers, 10);

    let mut seen_empty = false;
    for row in &rows {
        if seen_empty {
            assert_eq!(row.potential_purchasers, 0, "{} pool reopened", row.month);
        }
        if row.potential_purchasers == 0 {
            seen_empty = true;
        }
    }
    assert!(seen_empty, "pool never exhausted");
}

/// Raising the quota never reduces cumulative devices sold.
#[test]
fn higher_quota_never_sells_fewer_devices() {
    let rates = Preset::Likely.rates();

    let one: u64 = project(overall(), &rates, 300.0, 1.0, &months())
        .iter()
        .map(|r| r.devices_purchased)
        .sum();
    let two: u64 = project(overall(), &rates, 300.0, 2.0, &months())
        .iter()
        .map(|r| r.devices_purchased)
        .sum();

    assert!(
        two >= one,
        "quota 2 sold {two} devices, fewer than quota 1's {one}"
    );
}

/// A fractional quota admits the next whole device: quota 1.5 lets every
/// user buy a second device before their counter passes the quota.
#[test]
fn fractional_quota_admits_the_next_device() {
    let population = RegionPopulation::new(10, 0, 0, 0, 0);
    let rates = RateTable::new(100.0, 0.0, 0.0, 0.0, 0.0);
    let rows = project(population, &rates, 300.0, 1.5, &months());

    assert_eq!(rows[0].devices_purchased, 10);
    assert_eq!(rows[1].devices_purchased, 10);
    assert_eq!(rows[2].potential_purchasers, 0);

    let cumulative: u64 = rows.iter().map(|r| r.devices_purchased).sum();
    assert_eq!(cumulative, 20);
}

#[test]
fn monthly_purchasers_never_exceed_the_potential_pool() {
    let rows = project(overall(), &Preset::Optimistic.rates(), 300.0, 1.0, &months());

    for row in &rows {
        assert!(
            row.number_purchasers <= row.potential_purchasers,
            "{}: {} purchasers from a pool of {}",
            row.month,
            row.number_purchasers,
            row.potential_purchasers
        );
    }
}

#[test]
fn projection_is_deterministic() {
    let rates = Preset::Conservative.rates();
    let first = project(overall(), &rates, 300.0, 2.0, &months());
    let second = project(overall(), &rates, 300.0, 2.0, &months());

    assert_eq!(first, second);
}

#[test]
fn rows_carry_month_labels_and_observed_users_in_order() {
    let rows = project(overall(), &Preset::Likely.rates(), 300.0, 1.0, &months());

    let labels: Vec<&str> = rows.iter().map(|r| r.month.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Jun 2024", "Jul 2024", "Aug 2024", "Sep 2024", "Oct 2024", "Nov 2024", "Dec 2024"
        ]
    );
    assert_eq!(rows[0].observed_users, 32258);
    assert_eq!(rows[6].observed_users, 31838);
}

#[test]
fn trend_summary_sums_the_rows() {
    let rows = project(overall(), &Preset::Likely.rates(), 300.0, 1.0, &months());
    let summary = TrendSummary::from_rows(&rows);

    assert_eq!(
        summary.total_purchasers,
        rows.iter().map(|r| r.number_purchasers).sum::<u64>()
    );
    assert_eq!(
        summary.total_devices,
        rows.iter().map(|r| r.devices_purchased).sum::<u64>()
    );
    assert_eq!(
        summary.total_revenue,
        rows.iter().map(|r| r.revenue).sum::<f64>()
    );

    let total_potential: u64 = rows.iter().map(|r| r.potential_purchasers).sum();
    let expected = summary.total_purchasers as f64 / total_potential as f64 * 100.0;
    assert!((summary.avg_conversion_rate - expected).abs() < 1e-9);
}

#[test]
fn trend_summary_of_no_rows_is_all_zero() {
    let summary = TrendSummary::from_rows(&[]);

    assert_eq!(summary.total_purchasers, 0);
    assert_eq!(summary.total_devices, 0);
    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.avg_conversion_rate, 0.0);
}
