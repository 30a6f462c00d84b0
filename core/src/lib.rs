//! forecast-core: pure computation core for the device sales forecast.
//!
//! Two computation paths, both pure functions of
//! (region, rates, price, devices per user):
//!
//! - [`snapshot::snapshot`] — one-time per-category sales and revenue
//!   estimate, no state across calls.
//! - [`timeline::project`] — month-by-month projection where each user may
//!   purchase at most `devices_per_user` devices over the whole period.
//!
//! No persistence and no I/O in the arithmetic paths; independent calls
//! share no state, so concurrent invocations need no locking. Consumers
//! (the headless runner, a UI) build a [`scenario::Scenario`], resolve the
//! region's population from a [`config::MarketConfig`], and render the
//! resulting rows.

pub mod category;
pub mod config;
pub mod error;
pub mod scenario;
pub mod snapshot;
pub mod timeline;
pub mod types;

pub use category::Category;
pub use config::{MarketConfig, MonthRecord, Region, RegionPopulation};
pub use error::{ForecastError, ForecastResult};
pub use scenario::{Preset, RateTable, Scenario, DEFAULT_DEVICES_PER_USER, DEFAULT_PRICE};
pub use snapshot::{snapshot, CategoryRow, SnapshotReport};
pub use timeline::{project, MonthRow, TrendSummary};
