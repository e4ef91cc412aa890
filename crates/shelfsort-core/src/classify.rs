//! Derivation of merchandising facets from a raw [`Product`].
//!
//! Classification is total: unknown tags and titles fall back to "no color",
//! "no drop group" and [`GarmentType::Other`] rather than failing.

use std::collections::HashSet;

use serde::Serialize;

use crate::facets::{Color, GarmentType};
use crate::products::{Product, SalesIndex};

/// Tunables that decide how tags and titles are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Minimum in-stock sizes for a product to lead a collection.
    pub min_sizes: usize,
    /// Tags starting with this prefix name a drop group, e.g. `"Group_"`.
    pub drop_group_prefix: String,
    /// Case-insensitive title marker for the special item, e.g. `"GIFT CARD"`.
    pub special_item_marker: String,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            min_sizes: 4,
            drop_group_prefix: "Group_".to_owned(),
            special_item_marker: "GIFT CARD".to_owned(),
        }
    }
}

/// Everything the sequencer needs to know about one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFacets {
    pub color: Option<Color>,
    /// The full drop-group tag, prefix included.
    pub drop_group: Option<String>,
    pub garment_type: GarmentType,
    pub available_size_count: usize,
    pub is_sold_out: bool,
    pub is_special_item: bool,
    pub is_seasonally_excluded: bool,
    pub has_sufficient_sizes: bool,
    pub sales_count: u64,
}

/// A product paired with its derived facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedProduct {
    pub product: Product,
    pub facets: ProductFacets,
}

impl ClassifiedProduct {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.product.id
    }
}

/// Derives [`ProductFacets`] for `product`.
#[must_use]
pub fn classify(
    product: &Product,
    sales: &SalesIndex,
    seasonal_exclusions: &HashSet<String>,
    rules: &ClassifierRules,
) -> ProductFacets {
    let is_special_item = is_special_title(&product.title, &rules.special_item_marker);
    let available_size_count = product.available_size_count();

    ProductFacets {
        color: product.tags.iter().find_map(|tag| Color::from_tag(tag)),
        drop_group: drop_group(&product.tags, &rules.drop_group_prefix),
        garment_type: GarmentType::from_title(&product.title),
        available_size_count,
        is_sold_out: product.is_sold_out(),
        is_special_item,
        is_seasonally_excluded: seasonal_exclusions.contains(&product.id),
        has_sufficient_sizes: is_special_item || available_size_count >= rules.min_sizes,
        sales_count: sales.get(&product.id),
    }
}

/// Classifies every product of a collection, preserving catalog order.
#[must_use]
pub fn classify_all(
    products: Vec<Product>,
    sales: &SalesIndex,
    seasonal_exclusions: &HashSet<String>,
    rules: &ClassifierRules,
) -> Vec<ClassifiedProduct> {
    products
        .into_iter()
        .map(|product| {
            let facets = classify(&product, sales, seasonal_exclusions, rules);
            ClassifiedProduct { product, facets }
        })
        .collect()
}

fn drop_group(tags: &[String], prefix: &str) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }
    tags.iter().find(|tag| tag.starts_with(prefix)).cloned()
}

fn is_special_title(title: &str, marker: &str) -> bool {
    !marker.is_empty() && title.to_uppercase().contains(&marker.to_uppercase())
}
