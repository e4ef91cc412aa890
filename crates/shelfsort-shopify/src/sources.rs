//! `shelfsort-core` collaborator traits backed by [`AdminClient`].

use std::collections::HashSet;

use async_trait::async_trait;
use shelfsort_core::{
    CatalogFetcher, CollectionSnapshot, ReorderSink, SalesFetcher, SalesIndex, SeasonalSetFetcher,
    SourceError,
};

use crate::client::AdminClient;
use crate::error::ShopifyError;

fn fetch_error(err: &ShopifyError) -> SourceError {
    SourceError::DataFetch(err.to_string())
}

#[async_trait]
impl SalesFetcher for AdminClient {
    async fn fetch_sales(&self, lookback_days: u32) -> Result<SalesIndex, SourceError> {
        self.fetch_sales_index(lookback_days)
            .await
            .map_err(|e| fetch_error(&e))
    }
}

#[async_trait]
impl CatalogFetcher for AdminClient {
    async fn fetch_collection(
        &self,
        collection_id: &str,
    ) -> Result<CollectionSnapshot, SourceError> {
        self.fetch_collection_snapshot(collection_id)
            .await
            .map_err(|e| fetch_error(&e))
    }
}

#[async_trait]
impl SeasonalSetFetcher for AdminClient {
    async fn fetch_product_ids(
        &self,
        collection_id: &str,
    ) -> Result<HashSet<String>, SourceError> {
        self.fetch_collection_product_ids(collection_id)
            .await
            .map_err(|e| fetch_error(&e))
    }
}

#[async_trait]
impl ReorderSink for AdminClient {
    async fn apply(&self, collection_id: &str, ordered_ids: &[String]) -> Result<(), SourceError> {
        self.reorder_collection(collection_id, ordered_ids)
            .await
            .map_err(|e| match e {
                ShopifyError::UserErrors { .. } => SourceError::Mutation(e.to_string()),
                other => SourceError::Write(other.to_string()),
            })
    }
}
