//! Seams to the catalog platform.
//!
//! The run loop only talks to these traits. `shelfsort-shopify` implements
//! them against the Shopify Admin API; tests use in-memory fakes.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::products::{Product, SalesIndex};

/// The only sort order under which a position list is meaningful.
pub const MANUAL_SORT_ORDER: &str = "MANUAL";

/// One collection as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSnapshot {
    pub title: String,
    /// Declared sort order, e.g. `"MANUAL"` or `"BEST_SELLING"`.
    pub sort_order: String,
    /// Products in current catalog order.
    pub products: Vec<Product>,
}

#[async_trait]
pub trait SalesFetcher: Send + Sync {
    /// Units sold per product over the last `lookback_days` days.
    async fn fetch_sales(&self, lookback_days: u32) -> Result<SalesIndex, SourceError>;
}

#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch_collection(&self, collection_id: &str)
        -> Result<CollectionSnapshot, SourceError>;
}

#[async_trait]
pub trait SeasonalSetFetcher: Send + Sync {
    /// Ids of every product in the reference collection.
    async fn fetch_product_ids(&self, collection_id: &str)
        -> Result<HashSet<String>, SourceError>;
}

#[async_trait]
pub trait ReorderSink: Send + Sync {
    /// Writes `ordered_ids` as the collection's manual order. Position `i` in
    /// the slice becomes catalog position `i`.
    async fn apply(&self, collection_id: &str, ordered_ids: &[String]) -> Result<(), SourceError>;
}

/// Everything a run needs from the platform.
pub trait MerchSources: SalesFetcher + CatalogFetcher + SeasonalSetFetcher + ReorderSink {}

impl<T> MerchSources for T where T: SalesFetcher + CatalogFetcher + SeasonalSetFetcher + ReorderSink {}
