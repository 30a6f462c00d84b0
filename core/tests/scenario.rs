//! Scenario input tests: fallback policy, presets, rate sanitization.

use forecast_core::{
    Category, Preset, RateTable, Region, Scenario, DEFAULT_DEVICES_PER_USER, DEFAULT_PRICE,
};

#[test]
fn invalid_price_falls_back_to_default() {
    for bad in [f64::NAN, f64::INFINITY, 0.0, -25.0] {
        let scenario = Scenario::new(Region::Overall, RateTable::default(), bad, 1.0);
        assert_eq!(scenario.price, DEFAULT_PRICE, "price {bad} should fall back");
    }
}

#[test]
fn invalid_quota_falls_back_to_default() {
    for bad in [f64::NAN, f64::NEG_INFINITY, 0.0, -1.0] {
        let scenario = Scenario::new(Region::Overall, RateTable::default(), 300.0, bad);
        assert_eq!(
            scenario.devices_per_user, DEFAULT_DEVICES_PER_USER,
            "quota {bad} should fall back"
        );
    }
}

#[test]
fn valid_inputs_pass_through_unchanged() {
    let scenario = Scenario::new(Region::Japan, RateTable::default(), 249.0, 1.5);
    assert_eq!(scenario.price, 249.0);
    assert_eq!(scenario.devices_per_user, 1.5);
}

#[test]
fn rate_sanitization_floors_at_zero_and_drops_nan() {
    let rates = RateTable::new(f64::NAN, -5.0, 120.0, 17.0, f64::INFINITY);
    let scenario = Scenario::new(Region::Overall, rates, 300.0, 1.0);

    assert_eq!(scenario.rates.very_high, 0.0);
    assert_eq!(scenario.rates.high, 0.0);
    assert_eq!(scenario.rates.medium, 120.0, "over-100 rates pass through");
    assert_eq!(scenario.rates.low, 17.0);
    assert_eq!(scenario.rates.very_low, 0.0);
}

#[test]
fn presets_replace_the_whole_table() {
    assert_eq!(
        Preset::Optimistic.rates(),
        RateTable::new(85.0, 70.0, 50.0, 25.0, 10.0)
    );
    assert_eq!(
        Preset::Likely.rates(),
        RateTable::new(78.0, 56.0, 34.0, 17.0, 6.0)
    );
    assert_eq!(
        Preset::Conservative.rates(),
        RateTable::new(65.0, 45.0, 25.0, 10.0, 3.0)
    );
}

#[test]
fn default_rate_table_is_the_likely_preset() {
    assert_eq!(RateTable::default(), Preset::Likely.rates());
}

#[test]
fn preset_keys_parse_and_unknown_keys_error() {
    assert_eq!("optimistic".parse::<Preset>().unwrap(), Preset::Optimistic);
    assert_eq!("likely".parse::<Preset>().unwrap(), Preset::Likely);
    assert!("pessimistic".parse::<Preset>().is_err());
}

#[test]
fn category_keys_parse_and_unknown_keys_error() {
    assert_eq!("veryHigh".parse::<Category>().unwrap(), Category::VeryHigh);
    assert_eq!("veryLow".parse::<Category>().unwrap(), Category::VeryLow);
    assert!("ultra".parse::<Category>().is_err());
}

#[test]
fn rate_table_get_set_round_trip() {
    let mut rates = RateTable::default();
    for (i, category) in Category::ALL.into_iter().enumerate() {
        rates.set(category, i as f64 * 10.0);
    }
    for (i, category) in Category::ALL.into_iter().enumerate() {
        assert_eq!(rates.get(category), i as f64 * 10.0);
    }
}
