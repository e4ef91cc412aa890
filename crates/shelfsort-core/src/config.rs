use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let list = |var: &str| -> Vec<String> { split_ids(&or_default(var, "")) };

    let shopify_store = require("SHOPIFY_STORE")?;
    let shopify_access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let collection_ids = split_ids(&require("COLLECTION_IDS")?);
    if collection_ids.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "COLLECTION_IDS".to_string(),
            reason: "no collection ids listed".to_string(),
        });
    }

    let env = parse_environment(&or_default("SHELFSORT_ENV", "production"));
    let bind_addr = parse_addr("SHELFSORT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHELFSORT_LOG_LEVEL", "info");
    let shopify_api_version = or_default("SHOPIFY_API_VERSION", "2024-10");
    let cron_secret = optional("CRON_SECRET");

    let sales_lookback_days = parse_u32("SHELFSORT_SALES_LOOKBACK_DAYS", "1")?;
    let min_sizes = parse_usize("SHELFSORT_MIN_SIZES", "4")?;
    let visible_products = parse_usize("SHELFSORT_VISIBLE_PRODUCTS", "24")?;
    let color_gap = parse_usize("SHELFSORT_COLOR_GAP", "3")?;
    let special_item_offset = parse_usize("SHELFSORT_SPECIAL_ITEM_OFFSET", "2")?;
    let special_item_marker = or_default("SHELFSORT_SPECIAL_ITEM_MARKER", "GIFT CARD");
    let drop_group_prefix = or_default("SHELFSORT_DROP_GROUP_PREFIX", "Group_");

    let request_timeout_secs = parse_u64("SHELFSORT_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("SHELFSORT_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("SHELFSORT_RETRY_BACKOFF_BASE_MS", "1000")?;
    let inter_request_delay_ms = parse_u64("SHELFSORT_INTER_REQUEST_DELAY_MS", "0")?;
    let schedule = optional("SHELFSORT_SCHEDULE");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shopify_store,
        shopify_access_token,
        shopify_api_version,
        cron_secret,
        collection_ids,
        no_alternate_collection_ids: list("NO_ALTERNATE_COLLECTION_IDS"),
        special_item_collection_ids: list("SPECIAL_ITEM_COLLECTION_IDS"),
        seasonal_collection_id: optional("SEASONAL_COLLECTION_ID"),
        sales_lookback_days,
        min_sizes,
        visible_products,
        color_gap,
        special_item_offset,
        special_item_marker,
        drop_group_prefix,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        inter_request_delay_ms,
        schedule,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Development must be named explicitly; unrecognized values map to
/// `Environment::Production`, which requires `CRON_SECRET`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "development" => Environment::Development,
        "test" => Environment::Test,
        _ => Environment::Production,
    }
}

/// Splits a comma-separated id list, dropping blank entries.
fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
