use std::collections::HashSet;

/// Placements made into visible windows earlier in the current run.
///
/// Only grows. A fresh value starts a new run; there is no way to forget a
/// placement mid-run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalMerchState {
    placed_products: HashSet<String>,
    placed_groups: HashSet<String>,
}

impl GlobalMerchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_product_placed(&self, product_id: &str) -> bool {
        self.placed_products.contains(product_id)
    }

    #[must_use]
    pub fn is_group_placed(&self, group: &str) -> bool {
        self.placed_groups.contains(group)
    }

    /// Records product ids and drop groups as placed. Committing the same
    /// values twice is a no-op.
    pub fn commit<P, G>(&mut self, product_ids: P, groups: G)
    where
        P: IntoIterator,
        P::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        self.placed_products
            .extend(product_ids.into_iter().map(Into::into));
        self.placed_groups.extend(groups.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.placed_products.len()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.placed_groups.len()
    }
}
