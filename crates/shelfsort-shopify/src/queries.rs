//! GraphQL documents sent to the Admin API.

/// Paid web orders matching `$query`, with per-line product and quantity.
pub(crate) const ORDERS_QUERY: &str = r"
query ShelfsortOrders($cursor: String, $query: String!) {
  orders(first: 250, after: $cursor, query: $query) {
    pageInfo { hasNextPage endCursor }
    nodes {
      id
      lineItems(first: 100) {
        nodes { product { id } quantity }
      }
    }
  }
}";

/// Collection metadata plus the product fields classification needs.
pub(crate) const COLLECTION_PRODUCTS_QUERY: &str = r"
query ShelfsortCollectionProducts($id: ID!, $cursor: String) {
  collection(id: $id) {
    title
    sortOrder
    products(first: 250, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      nodes {
        id
        title
        tags
        totalInventory
        tracksInventory
        variants(first: 100) {
          nodes {
            inventoryQuantity
            selectedOptions { name value }
          }
        }
      }
    }
  }
}";

/// Product ids of a collection, nothing else.
pub(crate) const COLLECTION_PRODUCT_IDS_QUERY: &str = r"
query ShelfsortCollectionProductIds($id: ID!, $cursor: String) {
  collection(id: $id) {
    products(first: 250, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      nodes { id }
    }
  }
}";

pub(crate) const REORDER_MUTATION: &str = r"
mutation ShelfsortReorder($id: ID!, $moves: [MoveInput!]!) {
  collectionReorderProducts(id: $id, moves: $moves) {
    job { id }
    userErrors { field message }
  }
}";
