//! Manual-order writes via `collectionReorderProducts`.

use crate::error::ShopifyError;
use crate::queries::REORDER_MUTATION;
use crate::types::{MoveInput, ReorderData};

use super::AdminClient;

/// Largest `moves` list accepted by one mutation call.
pub const REORDER_CHUNK_SIZE: usize = 250;

/// Splits `ordered_ids` into mutation-sized chunks of moves.
///
/// Positions are global: the id at index `i` of `ordered_ids` is moved to
/// position `i` regardless of which chunk carries it.
#[must_use]
pub fn build_moves(ordered_ids: &[String]) -> Vec<Vec<MoveInput>> {
    ordered_ids
        .chunks(REORDER_CHUNK_SIZE)
        .enumerate()
        .map(|(chunk_index, chunk)| {
            let offset = chunk_index * REORDER_CHUNK_SIZE;
            chunk
                .iter()
                .enumerate()
                .map(|(i, id)| MoveInput {
                    id: id.clone(),
                    new_position: (offset + i).to_string(),
                })
                .collect()
        })
        .collect()
}

impl AdminClient {
    /// Writes `ordered_ids` as the collection's manual order, one chunk at a
    /// time, in order.
    ///
    /// Chunks already accepted stay applied if a later chunk fails; the
    /// collection can be left partially reordered.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::UserErrors`] when Shopify rejects a chunk.
    /// - [`ShopifyError::MissingData`] when the mutation payload is `null`.
    /// - Any error from the underlying request.
    pub async fn reorder_collection(
        &self,
        collection_id: &str,
        ordered_ids: &[String],
    ) -> Result<(), ShopifyError> {
        let chunks = build_moves(ordered_ids);
        let chunk_count = chunks.len();

        for (chunk_index, moves) in chunks.into_iter().enumerate() {
            if chunk_index > 0 {
                self.pace().await;
            }

            let move_count = moves.len();
            let data: ReorderData = self
                .graphql(
                    "collectionReorderProducts",
                    REORDER_MUTATION,
                    serde_json::json!({ "id": collection_id, "moves": moves }),
                )
                .await?;
            let payload =
                data.collection_reorder_products
                    .ok_or_else(|| ShopifyError::MissingData {
                        operation: "collectionReorderProducts".to_owned(),
                    })?;

            if let Some(first) = payload.user_errors.into_iter().next() {
                return Err(ShopifyError::UserErrors {
                    collection_id: collection_id.to_owned(),
                    chunk: chunk_index,
                    field: first.field.map(|f| f.join(".")).unwrap_or_default(),
                    message: first.message,
                });
            }

            tracing::debug!(
                collection_id,
                chunk = chunk_index,
                chunk_count,
                moves = move_count,
                job_id = payload.job.as_ref().map(|j| j.id.as_str()),
                "reorder chunk accepted"
            );
        }

        tracing::info!(
            collection_id,
            products = ordered_ids.len(),
            chunks = chunk_count,
            "collection reordered"
        );
        Ok(())
    }
}
