//! The `run` command: one full pass over the configured collections.

use async_trait::async_trait;
use shelfsort_core::{run_all, AppConfig, Collaborators, ReorderSink, SourceError};
use shelfsort_shopify::{AdminClient, ClientPolicy};

pub(crate) const DEFAULT_PREVIEW: usize = 12;

/// Reorder sink that logs the leading positions and writes nothing.
pub(crate) struct DryRunSink {
    preview: usize,
}

impl DryRunSink {
    pub(crate) fn new(preview: usize) -> Self {
        Self { preview }
    }
}

#[async_trait]
impl ReorderSink for DryRunSink {
    async fn apply(&self, collection_id: &str, ordered_ids: &[String]) -> Result<(), SourceError> {
        tracing::info!(
            collection_id,
            products = ordered_ids.len(),
            "dry-run: skipping reorder"
        );
        for (position, id) in ordered_ids.iter().take(self.preview).enumerate() {
            tracing::info!(collection_id, position, product_id = %id, "dry-run order");
        }
        Ok(())
    }
}

/// Runs the pipeline once and prints the JSON summary to stdout.
///
/// # Errors
///
/// Returns an error if the Shopify client cannot be built, the run aborts
/// (sales or seasonal lookup failed), or the summary cannot be serialized.
/// Collection-level failures are reported in the summary, and make the
/// command fail after printing it.
pub(crate) async fn run_once(config: &AppConfig, dry_run: bool, preview: usize) -> anyhow::Result<()> {
    let client = AdminClient::new(
        &config.shopify_store,
        &config.shopify_access_token,
        &config.shopify_api_version,
        ClientPolicy::from_app_config(config),
    )
    .map_err(|e| anyhow::anyhow!("failed to build Shopify client: {e}"))?;

    let dry_run_sink = DryRunSink::new(preview);
    let mut collaborators = Collaborators::from_sources(&client);
    if dry_run {
        collaborators.sink = &dry_run_sink;
    }

    let summary = run_all(collaborators, &config.run_settings()).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !summary.success {
        anyhow::bail!(
            "{} of {} collections failed",
            summary.failures.len(),
            summary.failures.len() + summary.results.len()
        );
    }
    Ok(())
}
