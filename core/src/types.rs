//! Shared primitive types used across the forecast crates.

/// A count of unique users.
pub type UserCount = u64;

/// A currency amount in USD.
pub type Money = f64;

/// A percentage value (0.0 = 0%, 100.0 = 100%).
pub type Percent = f64;
