//! Recent sales aggregation from paid web orders.

use chrono::{Days, NaiveDate, Utc};
use shelfsort_core::SalesIndex;

use crate::error::ShopifyError;
use crate::queries::ORDERS_QUERY;
use crate::types::OrdersData;

use super::{AdminClient, MAX_PAGES};

/// Order search filter for paid online-store orders created on or after `since`.
#[must_use]
pub fn sales_search_filter(since: NaiveDate) -> String {
    format!(
        "created_at:>={} source_name:web financial_status:paid",
        since.format("%Y-%m-%d")
    )
}

impl AdminClient {
    /// Units sold per product over the last `lookback_days` days (UTC).
    ///
    /// Line items without a product (custom items, deleted products) are
    /// skipped. Quantities for the same product are summed across orders.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying request. Returns
    /// [`ShopifyError::PaginationLimit`] if the orders connection exceeds
    /// [`MAX_PAGES`] pages.
    pub async fn fetch_sales_index(&self, lookback_days: u32) -> Result<SalesIndex, ShopifyError> {
        let today = Utc::now().date_naive();
        let since = today
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN);
        self.fetch_sales_since(since).await
    }

    /// Same as [`Self::fetch_sales_index`] with an explicit start date.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_sales_index`].
    pub async fn fetch_sales_since(&self, since: NaiveDate) -> Result<SalesIndex, ShopifyError> {
        let filter = sales_search_filter(since);
        let mut sales = SalesIndex::new();
        let mut cursor: Option<String> = None;
        let mut order_count = 0usize;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ShopifyError::PaginationLimit {
                    operation: "orders".to_owned(),
                    max_pages: MAX_PAGES,
                });
            }
            if page_count > 1 {
                self.pace().await;
            }

            let data: OrdersData = self
                .graphql(
                    "orders",
                    ORDERS_QUERY,
                    serde_json::json!({ "cursor": cursor, "query": filter }),
                )
                .await?;

            for order in data.orders.nodes {
                order_count += 1;
                for item in order.line_items.nodes {
                    let Some(product) = item.product else {
                        continue;
                    };
                    let quantity = u64::try_from(item.quantity).unwrap_or(0);
                    sales.record(&product.id, quantity);
                }
            }

            if !data.orders.page_info.has_next_page {
                break;
            }
            cursor = data.orders.page_info.end_cursor;
            if cursor.is_none() {
                break;
            }
        }

        tracing::info!(
            since = %since,
            orders = order_count,
            products_sold = sales.len(),
            "sales index loaded"
        );
        Ok(sales)
    }
}
