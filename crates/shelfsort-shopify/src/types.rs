//! Admin GraphQL response types.
//!
//! Every response arrives as `{"data": ..., "errors": [...]}`;
//! [`GraphQlResponse`] captures that envelope generically. Field names follow
//! the API's camelCase.

use serde::{Deserialize, Serialize};

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorExtensions {
    /// Machine-readable code, e.g. `"THROTTLED"`.
    #[serde(default)]
    pub code: Option<String>,
}

/// Cursor state for a connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A connection that exposes `nodes` plus `pageInfo`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

/// A nested connection that only carries `nodes` (no pagination).
#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

// ---------------------------------------------------------------------------
// orders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct OrdersData {
    pub orders: Connection<OrderNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNode {
    pub id: String,
    pub line_items: Nodes<LineItemNode>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemNode {
    /// `null` for custom line items and deleted products.
    #[serde(default)]
    pub product: Option<IdNode>,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct IdNode {
    pub id: String,
}

// ---------------------------------------------------------------------------
// collection
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CollectionData<C> {
    pub collection: Option<C>,
}

/// Collection with full product details, used for sequencing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionNode {
    pub title: String,
    pub sort_order: String,
    pub products: Connection<ProductNode>,
}

/// Collection with product ids only, used for the seasonal reference set.
#[derive(Debug, Deserialize)]
pub struct CollectionIdsNode {
    pub products: Connection<IdNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub total_inventory: Option<i64>,
    #[serde(default)]
    pub tracks_inventory: bool,
    pub variants: Nodes<VariantNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// collectionReorderProducts
// ---------------------------------------------------------------------------

/// One entry of the `moves` argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInput {
    pub id: String,
    /// Zero-based target position, serialized as a string (`UnsignedInt64`).
    pub new_position: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderData {
    pub collection_reorder_products: Option<ReorderPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPayload {
    #[serde(default)]
    pub job: Option<IdNode>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub struct UserError {
    /// Path to the offending input, e.g. `["moves", "0", "id"]`.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}
