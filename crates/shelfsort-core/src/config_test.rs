use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid values.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SHOPIFY_STORE", "test-store.myshopify.com");
    m.insert("SHOPIFY_ACCESS_TOKEN", "shpat_test");
    m.insert(
        "COLLECTION_IDS",
        "gid://shopify/Collection/1, gid://shopify/Collection/2",
    );
    m
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_development_must_be_explicit() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("staging"), Environment::Production);
    assert_eq!(parse_environment(""), Environment::Production);
}

#[test]
fn build_app_config_fails_without_store() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPIFY_STORE"),
        "expected MissingEnvVar(SHOPIFY_STORE), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_access_token() {
    let mut map = full_env();
    map.remove("SHOPIFY_ACCESS_TOKEN");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPIFY_ACCESS_TOKEN"),
        "expected MissingEnvVar(SHOPIFY_ACCESS_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_collection_ids_as_missing() {
    let mut map = full_env();
    map.insert("COLLECTION_IDS", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "COLLECTION_IDS"),
        "expected MissingEnvVar(COLLECTION_IDS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_collection_ids_with_only_commas() {
    let mut map = full_env();
    map.insert("COLLECTION_IDS", ", ,");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COLLECTION_IDS"),
        "expected InvalidEnvVar(COLLECTION_IDS), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.shopify_api_version, "2024-10");
    assert_eq!(
        cfg.collection_ids,
        ["gid://shopify/Collection/1", "gid://shopify/Collection/2"]
    );
    assert!(cfg.cron_secret.is_none());
    assert!(cfg.seasonal_collection_id.is_none());
    assert!(cfg.no_alternate_collection_ids.is_empty());
    assert_eq!(cfg.sales_lookback_days, 1);
    assert_eq!(cfg.min_sizes, 4);
    assert_eq!(cfg.visible_products, 24);
    assert_eq!(cfg.color_gap, 3);
    assert_eq!(cfg.special_item_offset, 2);
    assert_eq!(cfg.special_item_marker, "GIFT CARD");
    assert_eq!(cfg.drop_group_prefix, "Group_");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.max_retries, 3);
    assert_eq!(cfg.retry_backoff_base_ms, 1000);
    assert!(cfg.schedule.is_none());
}

#[test]
fn build_app_config_reads_explicit_development() {
    let mut map = full_env();
    map.insert("SHELFSORT_ENV", "development");
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(cfg.env, Environment::Development);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("SHELFSORT_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSORT_BIND_ADDR"),
        "expected InvalidEnvVar(SHELFSORT_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_window_size() {
    let mut map = full_env();
    map.insert("SHELFSORT_VISIBLE_PRODUCTS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSORT_VISIBLE_PRODUCTS"),
        "expected InvalidEnvVar(SHELFSORT_VISIBLE_PRODUCTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("SHELFSORT_ENV", "production");
    map.insert("CRON_SECRET", "s3cret");
    map.insert("SHELFSORT_COLOR_GAP", "1");
    map.insert("SHELFSORT_MIN_SIZES", "3");
    map.insert("SEASONAL_COLLECTION_ID", "gid://shopify/Collection/9");
    map.insert("SHELFSORT_SCHEDULE", "0 0 6 * * *");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.cron_secret.as_deref(), Some("s3cret"));
    assert_eq!(cfg.color_gap, 1);
    assert_eq!(cfg.min_sizes, 3);
    assert_eq!(
        cfg.seasonal_collection_id.as_deref(),
        Some("gid://shopify/Collection/9")
    );
    assert_eq!(cfg.schedule.as_deref(), Some("0 0 6 * * *"));
}

#[test]
fn run_plan_applies_per_collection_overrides() {
    let mut map = full_env();
    map.insert("NO_ALTERNATE_COLLECTION_IDS", "gid://shopify/Collection/2");
    map.insert("SPECIAL_ITEM_COLLECTION_IDS", "gid://shopify/Collection/1");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let plan = cfg.run_plan();

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].collection_id, "gid://shopify/Collection/1");
    assert!(plan[0].sequence.alternate_types);
    assert_eq!(plan[0].sequence.insert_special_at, Some(2));
    assert!(!plan[1].sequence.alternate_types);
    assert_eq!(plan[1].sequence.insert_special_at, None);
    assert_eq!(plan[1].sequence.visible_window_size, 24);
    assert_eq!(plan[1].sequence.color_gap_window, 3);
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = full_env();
    map.insert("CRON_SECRET", "s3cret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("shpat_test"));
    assert!(!debug.contains("s3cret"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn split_ids_trims_and_drops_blanks() {
    assert_eq!(split_ids(" a, ,b ,"), ["a", "b"]);
    assert!(split_ids("").is_empty());
}
