use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A product as read from a collection, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque catalog id (a Shopify GID such as `"gid://shopify/Product/123"`).
    pub id: String,
    pub title: String,
    /// Unordered product tags, exactly as the catalog returns them.
    pub tags: Vec<String>,
    /// Sum of inventory across all variants. Only meaningful when
    /// `tracks_inventory` is `true`.
    pub total_inventory: i64,
    pub tracks_inventory: bool,
    pub variants: Vec<Variant>,
}

/// A purchasable variant of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// May be negative when the store allows overselling.
    pub inventory_quantity: i64,
    /// Value of the variant's size option (e.g. `"M"`, `"42"`), if it has one.
    pub size: Option<String>,
}

impl Product {
    /// Number of variants that are in stock and carry a size option.
    #[must_use]
    pub fn available_size_count(&self) -> usize {
        self.variants
            .iter()
            .filter(|v| v.inventory_quantity > 0 && v.size.is_some())
            .count()
    }

    /// `true` when inventory is tracked and nothing is left.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.tracks_inventory && self.total_inventory == 0
    }
}

/// Units sold per product id over the sales lookback window.
///
/// Ids that never appear in an order are treated as zero sales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesIndex {
    counts: HashMap<String, u64>,
}

impl SalesIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units to the running total for `product_id`.
    pub fn record(&mut self, product_id: &str, quantity: u64) {
        let entry = self.counts.entry(product_id.to_owned()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Units sold for `product_id`, or `0` if it has no recorded sales.
    #[must_use]
    pub fn get(&self, product_id: &str) -> u64 {
        self.counts.get(product_id).copied().unwrap_or(0)
    }

    /// Number of distinct products with at least one recorded sale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for SalesIndex {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (id, quantity) in iter {
            index.record(&id, quantity);
        }
        index
    }
}
