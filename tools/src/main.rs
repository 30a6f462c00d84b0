//! forecast-runner: headless runner for the device sales forecast.
//!
//! Plays the role of the presentation layer: builds a scenario from the
//! command line, runs the snapshot calculator and the quota-constrained
//! monthly projection, and renders the summary panel, breakdown table and
//! trend table as text (or one JSON document with --json).
//!
//! Usage:
//!   forecast-runner --region overall --price 300 --devices 1
//!   forecast-runner --preset conservative --region japan
//!   forecast-runner --rate veryHigh=80 --rate low=12 --json
//!   forecast-runner --market ./market.json

use anyhow::Result;
use forecast_core::{
    project, snapshot, Category, MarketConfig, MonthRow, Preset, RateTable, Region, Scenario,
    SnapshotReport, TrendSummary, DEFAULT_DEVICES_PER_USER, DEFAULT_PRICE,
};
use std::env;

#[derive(serde::Serialize)]
struct ForecastReport {
    region: Region,
    price: f64,
    devices_per_user: f64,
    rates: RateTable,
    snapshot: SnapshotReport,
    months: Vec<MonthRow>,
    summary: TrendSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");

    let region: Region = flag_value(&args, "--region")
        .unwrap_or("overall")
        .parse()?;
    let price = parse_arg(&args, "--price", DEFAULT_PRICE);
    let devices_per_user = parse_arg(&args, "--devices", DEFAULT_DEVICES_PER_USER);

    let mut rates = match flag_value(&args, "--preset") {
        Some(name) => name.parse::<Preset>()?.rates(),
        None => RateTable::default(),
    };
    for w in args.windows(2) {
        if w[0] == "--rate" {
            let (key, value) = w[1]
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("--rate expects category=value, got '{}'", w[1]))?;
            let category: Category = key.parse()?;
            // Form-field semantics: an unparseable rate coerces to 0.
            rates.set(category, value.parse().unwrap_or(0.0));
        }
    }

    let market = match flag_value(&args, "--market") {
        Some(path) => MarketConfig::load(path)?,
        None => MarketConfig::builtin(),
    };

    let scenario = Scenario::new(region, rates, price, devices_per_user);
    let population = market.population(scenario.region)?;
    log::info!(
        "running {} at ${:.2}, {} devices/user ({} users)",
        scenario.region.key(),
        scenario.price,
        scenario.devices_per_user,
        population.total()
    );

    let snap = snapshot(
        population,
        &scenario.rates,
        scenario.price,
        scenario.devices_per_user,
    );
    let months = project(
        population,
        &scenario.rates,
        scenario.price,
        scenario.devices_per_user,
        &market.months,
    );
    let summary = TrendSummary::from_rows(&months);

    if json_mode {
        let report = ForecastReport {
            region: scenario.region,
            price: scenario.price,
            devices_per_user: scenario.devices_per_user,
            rates: scenario.rates,
            snapshot: snap,
            months,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&scenario, &snap, &months, &summary);
    }

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn print_text_report(
    scenario: &Scenario,
    snap: &SnapshotReport,
    months: &[MonthRow],
    summary: &TrendSummary,
) {
    println!("Device Sales Forecast — {}", scenario.region);
    println!("  price:            ${:.2}", scenario.price);
    println!("  devices per user: {}", scenario.devices_per_user);
    println!();

    println!(
        "{:<11} {:>8} {:>8} {:>12} {:>10} {:>14}",
        "Category", "Users", "Rate %", "Purchasers", "Devices", "Revenue"
    );
    for row in &snap.rows {
        println!(
            "{:<11} {:>8} {:>8.1} {:>12} {:>10.0} {:>14.0}",
            row.category.label(),
            row.users,
            row.rate,
            row.purchasing_users,
            row.devices_sold,
            row.revenue
        );
    }
    println!(
        "{:<11} {:>8} {:>8} {:>12} {:>10.0} {:>14.0}",
        "TOTAL",
        snap.total_users,
        "-",
        snap.total_purchasing_users,
        snap.total_devices_sold,
        snap.total_revenue
    );
    println!("  conversion rate: {:.1}%", snap.conversion_rate);
    println!();

    println!(
        "{:<9} {:>10} {:>8} {:>11} {:>9} {:>14}",
        "Month", "Potential", "Pct %", "Purchasers", "Devices", "Revenue"
    );
    for row in months {
        let exhausted = if row.potential_purchasers == 0 {
            "  (market exhausted)"
        } else {
            ""
        };
        println!(
            "{:<9} {:>10} {:>8.1} {:>11} {:>9} {:>14.0}{exhausted}",
            row.month,
            row.potential_purchasers,
            row.percentage_purchasers,
            row.number_purchasers,
            row.devices_purchased,
            row.revenue
        );
    }
    println!(
        "{:<9} {:>10} {:>8} {:>11} {:>9} {:>14.0}",
        "TOTAL", "-", "-", summary.total_purchasers, summary.total_devices, summary.total_revenue
    );
    println!();
    println!("  total purchasing users:  {}", summary.total_purchasers);
    println!("  total devices sold:      {}", summary.total_devices);
    println!("  total projected revenue: ${:.0}", summary.total_revenue);
    println!("  avg conversion rate:     {:.1}%", summary.avg_conversion_rate);
}
