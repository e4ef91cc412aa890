use std::net::SocketAddr;

use crate::classify::ClassifierRules;
use crate::runner::{CollectionPlan, RunSettings};
use crate::sequence::SequenceConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Store domain, e.g. `my-store.myshopify.com`.
    pub shopify_store: String,
    pub shopify_access_token: String,
    pub shopify_api_version: String,
    /// Shared secret for the run endpoint.
    pub cron_secret: Option<String>,
    /// Collections to reorder, in processing order.
    pub collection_ids: Vec<String>,
    /// Collections sequenced without main/other alternation.
    pub no_alternate_collection_ids: Vec<String>,
    /// Collections that get the special item spliced into their window.
    pub special_item_collection_ids: Vec<String>,
    pub seasonal_collection_id: Option<String>,
    pub sales_lookback_days: u32,
    pub min_sizes: usize,
    pub visible_products: usize,
    pub color_gap: usize,
    pub special_item_offset: usize,
    pub special_item_marker: String,
    pub drop_group_prefix: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub inter_request_delay_ms: u64,
    /// Cron expression for scheduled runs inside the server.
    pub schedule: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn classifier_rules(&self) -> ClassifierRules {
        ClassifierRules {
            min_sizes: self.min_sizes,
            drop_group_prefix: self.drop_group_prefix.clone(),
            special_item_marker: self.special_item_marker.clone(),
        }
    }

    /// Sequencing settings for each configured collection, in run order.
    #[must_use]
    pub fn run_plan(&self) -> Vec<CollectionPlan> {
        self.collection_ids
            .iter()
            .map(|id| CollectionPlan {
                collection_id: id.clone(),
                sequence: SequenceConfig {
                    visible_window_size: self.visible_products,
                    color_gap_window: self.color_gap,
                    alternate_types: !self.no_alternate_collection_ids.contains(id),
                    insert_special_at: self
                        .special_item_collection_ids
                        .contains(id)
                        .then_some(self.special_item_offset),
                },
            })
            .collect()
    }

    #[must_use]
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            sales_lookback_days: self.sales_lookback_days,
            seasonal_collection_id: self.seasonal_collection_id.clone(),
            classifier_rules: self.classifier_rules(),
            collections: self.run_plan(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shopify_store", &self.shopify_store)
            .field("shopify_access_token", &"[redacted]")
            .field("shopify_api_version", &self.shopify_api_version)
            .field(
                "cron_secret",
                &self.cron_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("collection_ids", &self.collection_ids)
            .field(
                "no_alternate_collection_ids",
                &self.no_alternate_collection_ids,
            )
            .field(
                "special_item_collection_ids",
                &self.special_item_collection_ids,
            )
            .field("seasonal_collection_id", &self.seasonal_collection_id)
            .field("sales_lookback_days", &self.sales_lookback_days)
            .field("min_sizes", &self.min_sizes)
            .field("visible_products", &self.visible_products)
            .field("color_gap", &self.color_gap)
            .field("special_item_offset", &self.special_item_offset)
            .field("special_item_marker", &self.special_item_marker)
            .field("drop_group_prefix", &self.drop_group_prefix)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("schedule", &self.schedule)
            .finish()
    }
}
