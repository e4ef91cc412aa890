//! The run loop: one pass over every configured collection, in order.
//!
//! Collections are processed strictly one at a time. Each collection's window
//! is committed to the shared [`GlobalMerchState`] before the next one is
//! fetched, so earlier collections win contested products and drop groups.
//! A failure in one collection is recorded and the loop moves on; commits
//! made by earlier collections are kept.

use std::collections::HashSet;

use serde::Serialize;
use tracing::Instrument;

use crate::classify::{classify_all, ClassifierRules};
use crate::error::{CollectionError, RunError};
use crate::products::SalesIndex;
use crate::sequence::{sequence, SequenceConfig};
use crate::sources::{
    CatalogFetcher, MerchSources, ReorderSink, SalesFetcher, SeasonalSetFetcher,
    MANUAL_SORT_ORDER,
};
use crate::state::GlobalMerchState;

/// One collection to reorder and how to sequence it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPlan {
    pub collection_id: String,
    pub sequence: SequenceConfig,
}

/// Inputs for one run, derived from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub sales_lookback_days: u32,
    /// Reference collection whose products are kept out of the window.
    pub seasonal_collection_id: Option<String>,
    pub classifier_rules: ClassifierRules,
    /// Processed in this order.
    pub collections: Vec<CollectionPlan>,
}

/// The platform collaborators used by a run. The sink can differ from the
/// fetchers, e.g. for dry runs.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub sales: &'a dyn SalesFetcher,
    pub catalog: &'a dyn CatalogFetcher,
    pub seasonal: &'a dyn SeasonalSetFetcher,
    pub sink: &'a dyn ReorderSink,
}

impl<'a> Collaborators<'a> {
    /// Uses one platform client for every role.
    #[must_use]
    pub fn from_sources(sources: &'a dyn MerchSources) -> Self {
        Self {
            sales: sources,
            catalog: sources,
            seasonal: sources,
            sink: sources,
        }
    }
}

/// A collection that was reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionOutcome {
    pub collection_id: String,
    pub title: String,
    pub product_count: usize,
    pub window_len: usize,
    pub special_inserted: bool,
}

/// A collection that could not be reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionFailure {
    pub collection_id: String,
    pub error: String,
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// `true` when every collection was reordered.
    pub success: bool,
    pub results: Vec<CollectionOutcome>,
    pub failures: Vec<CollectionFailure>,
    /// Distinct products placed into any visible window this run.
    pub unique_products: usize,
    /// Distinct drop groups placed into any visible window this run.
    pub unique_groups: usize,
}

/// Runs every configured collection against a fresh [`GlobalMerchState`].
///
/// # Errors
///
/// Returns [`RunError`] if the sales index or the seasonal exclusion set
/// cannot be fetched. Per-collection failures are reported in the summary
/// instead.
pub async fn run_all(
    collaborators: Collaborators<'_>,
    settings: &RunSettings,
) -> Result<RunSummary, RunError> {
    let mut state = GlobalMerchState::new();
    run_with_state(collaborators, settings, &mut state).await
}

/// Like [`run_all`], but continues from an existing placement state.
///
/// # Errors
///
/// See [`run_all`].
pub async fn run_with_state(
    collaborators: Collaborators<'_>,
    settings: &RunSettings,
    state: &mut GlobalMerchState,
) -> Result<RunSummary, RunError> {
    tracing::info!(
        collections = settings.collections.len(),
        lookback_days = settings.sales_lookback_days,
        min_sizes = settings.classifier_rules.min_sizes,
        "starting collection sort run"
    );

    let sales = collaborators
        .sales
        .fetch_sales(settings.sales_lookback_days)
        .await
        .map_err(RunError::Sales)?;
    tracing::info!(products_sold = sales.len(), "sales index loaded");

    let seasonal = match settings.seasonal_collection_id.as_deref() {
        Some(id) => collaborators
            .seasonal
            .fetch_product_ids(id)
            .await
            .map_err(RunError::Seasonal)?,
        None => HashSet::new(),
    };
    tracing::info!(seasonal_products = seasonal.len(), "seasonal exclusions loaded");

    let mut results = Vec::new();
    let mut failures = Vec::new();

    for plan in &settings.collections {
        let span = tracing::info_span!("collection", id = %plan.collection_id);
        let outcome = process_collection(
            collaborators,
            plan,
            &sales,
            &seasonal,
            &settings.classifier_rules,
            state,
        )
        .instrument(span)
        .await;

        match outcome {
            Ok(outcome) => results.push(outcome),
            Err(e) => {
                tracing::error!(
                    collection_id = %plan.collection_id,
                    error = %e,
                    "collection sort failed; continuing with next collection"
                );
                failures.push(CollectionFailure {
                    collection_id: plan.collection_id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        reordered = results.len(),
        failed = failures.len(),
        unique_products = state.product_count(),
        unique_groups = state.group_count(),
        "collection sort run complete"
    );

    Ok(RunSummary {
        success: failures.is_empty(),
        results,
        failures,
        unique_products: state.product_count(),
        unique_groups: state.group_count(),
    })
}

/// Fetch, classify, sequence, and write back one collection.
async fn process_collection(
    collaborators: Collaborators<'_>,
    plan: &CollectionPlan,
    sales: &SalesIndex,
    seasonal: &HashSet<String>,
    rules: &ClassifierRules,
    state: &mut GlobalMerchState,
) -> Result<CollectionOutcome, CollectionError> {
    let snapshot = collaborators
        .catalog
        .fetch_collection(&plan.collection_id)
        .await?;
    tracing::info!(
        title = %snapshot.title,
        products = snapshot.products.len(),
        "collection fetched"
    );

    if snapshot.sort_order != MANUAL_SORT_ORDER {
        return Err(CollectionError::Mode {
            title: snapshot.title,
            sort_order: snapshot.sort_order,
        });
    }

    let product_count = snapshot.products.len();
    let classified = classify_all(snapshot.products, sales, seasonal, rules);
    let placement = sequence(&classified, &plan.sequence, state);

    collaborators
        .sink
        .apply(&plan.collection_id, &placement.ordered_ids)
        .await?;

    Ok(CollectionOutcome {
        collection_id: plan.collection_id.clone(),
        title: snapshot.title,
        product_count,
        window_len: placement.window_len(),
        special_inserted: placement.special_inserted,
    })
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
