//! Splits a collection into eligibility classes.

use serde::Serialize;

use crate::classify::ClassifiedProduct;

/// A collection's products split by eligibility.
///
/// Every product lands in exactly one list. The four ranked lists are ordered
/// by descending sales with catalog order kept among ties; `special` keeps
/// catalog order.
#[derive(Debug, Default)]
pub struct EligibilityClasses<'a> {
    pub eligible: Vec<&'a ClassifiedProduct>,
    pub insufficient_sizes: Vec<&'a ClassifiedProduct>,
    pub seasonally_excluded: Vec<&'a ClassifiedProduct>,
    pub sold_out: Vec<&'a ClassifiedProduct>,
    /// The first entry is the designated special item.
    pub special: Vec<&'a ClassifiedProduct>,
}

/// Sizes of each class, reported in run summaries and logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassSizes {
    pub eligible: usize,
    pub insufficient_sizes: usize,
    pub seasonally_excluded: usize,
    pub sold_out: usize,
    pub special: usize,
}

impl EligibilityClasses<'_> {
    #[must_use]
    pub fn sizes(&self) -> ClassSizes {
        ClassSizes {
            eligible: self.eligible.len(),
            insufficient_sizes: self.insufficient_sizes.len(),
            seasonally_excluded: self.seasonally_excluded.len(),
            sold_out: self.sold_out.len(),
            special: self.special.len(),
        }
    }
}

/// Partitions `products` (in catalog order) into eligibility classes.
///
/// Precedence: special item, then sold out, then seasonal exclusion, then
/// size sufficiency.
#[must_use]
pub fn partition(products: &[ClassifiedProduct]) -> EligibilityClasses<'_> {
    let mut classes = EligibilityClasses::default();

    for product in products {
        let f = &product.facets;
        let bucket = if f.is_special_item {
            &mut classes.special
        } else if f.is_sold_out {
            &mut classes.sold_out
        } else if f.is_seasonally_excluded {
            &mut classes.seasonally_excluded
        } else if f.has_sufficient_sizes {
            &mut classes.eligible
        } else {
            &mut classes.insufficient_sizes
        };
        bucket.push(product);
    }

    for ranked in [
        &mut classes.eligible,
        &mut classes.insufficient_sizes,
        &mut classes.seasonally_excluded,
        &mut classes.sold_out,
    ] {
        by_sales_desc(ranked);
    }

    classes
}

/// Stable sort, so equal sales keep catalog order.
fn by_sales_desc(products: &mut [&ClassifiedProduct]) {
    products.sort_by(|a, b| b.facets.sales_count.cmp(&a.facets.sales_count));
}
