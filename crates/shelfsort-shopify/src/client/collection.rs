//! Collection reads: full product details and bare product id sets.

use std::collections::HashSet;

use shelfsort_core::CollectionSnapshot;

use crate::error::ShopifyError;
use crate::normalize::normalize_product;
use crate::queries::{COLLECTION_PRODUCTS_QUERY, COLLECTION_PRODUCT_IDS_QUERY};
use crate::types::{CollectionData, CollectionIdsNode, CollectionNode};

use super::{AdminClient, MAX_PAGES};

impl AdminClient {
    /// Fetches a collection's title, sort order and every product in current
    /// catalog order.
    ///
    /// **All-or-nothing**: a failure on any page discards earlier pages.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::CollectionNotFound`] if the id resolves to nothing.
    /// - [`ShopifyError::PaginationLimit`] past [`MAX_PAGES`] pages.
    /// - Any error from the underlying request.
    pub async fn fetch_collection_snapshot(
        &self,
        collection_id: &str,
    ) -> Result<CollectionSnapshot, ShopifyError> {
        let mut snapshot = CollectionSnapshot {
            title: String::new(),
            sort_order: String::new(),
            products: Vec::new(),
        };
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ShopifyError::PaginationLimit {
                    operation: format!("collection({collection_id})"),
                    max_pages: MAX_PAGES,
                });
            }
            if page_count > 1 {
                self.pace().await;
            }

            let data: CollectionData<CollectionNode> = self
                .graphql(
                    "collection",
                    COLLECTION_PRODUCTS_QUERY,
                    serde_json::json!({ "id": collection_id, "cursor": cursor }),
                )
                .await?;
            let collection = data
                .collection
                .ok_or_else(|| ShopifyError::CollectionNotFound {
                    collection_id: collection_id.to_owned(),
                })?;

            snapshot.title = collection.title;
            snapshot.sort_order = collection.sort_order;
            snapshot
                .products
                .extend(collection.products.nodes.into_iter().map(normalize_product));

            let page_info = collection.products.page_info;
            if !page_info.has_next_page {
                break;
            }
            cursor = page_info.end_cursor;
            if cursor.is_none() {
                break;
            }
        }

        tracing::info!(
            collection_id,
            title = %snapshot.title,
            sort_order = %snapshot.sort_order,
            products = snapshot.products.len(),
            "collection loaded"
        );
        Ok(snapshot)
    }

    /// Ids of every product in a collection.
    ///
    /// A collection that does not exist yields an empty set and a warning.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::PaginationLimit`] past [`MAX_PAGES`] pages.
    /// - Any error from the underlying request.
    pub async fn fetch_collection_product_ids(
        &self,
        collection_id: &str,
    ) -> Result<HashSet<String>, ShopifyError> {
        let mut ids = HashSet::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ShopifyError::PaginationLimit {
                    operation: format!("collectionProductIds({collection_id})"),
                    max_pages: MAX_PAGES,
                });
            }
            if page_count > 1 {
                self.pace().await;
            }

            let data: CollectionData<CollectionIdsNode> = self
                .graphql(
                    "collectionProductIds",
                    COLLECTION_PRODUCT_IDS_QUERY,
                    serde_json::json!({ "id": collection_id, "cursor": cursor }),
                )
                .await?;
            let Some(collection) = data.collection else {
                tracing::warn!(
                    collection_id,
                    "reference collection not found, treating as empty"
                );
                break;
            };

            ids.extend(collection.products.nodes.into_iter().map(|n| n.id));

            let page_info = collection.products.page_info;
            if !page_info.has_next_page {
                break;
            }
            cursor = page_info.end_cursor;
            if cursor.is_none() {
                break;
            }
        }

        tracing::info!(collection_id, products = ids.len(), "reference set loaded");
        Ok(ids)
    }
}
