use thiserror::Error;

/// Errors returned by the Shopify Admin API client.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response carried a GraphQL `errors` array.
    #[error("GraphQL error in {operation}: {message}")]
    GraphQl { operation: String, message: String },

    /// Shopify's query cost budget is exhausted (`THROTTLED`).
    #[error("query cost throttled during {operation}")]
    Throttled { operation: String },

    #[error("rate limited by Shopify (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} during {operation}")]
    UnexpectedStatus { status: u16, operation: String },

    /// The response had neither `data` nor `errors`.
    #[error("empty GraphQL response for {operation}")]
    MissingData { operation: String },

    #[error("collection not found: {collection_id}")]
    CollectionNotFound { collection_id: String },

    /// The reorder mutation returned `userErrors`.
    #[error("reorder rejected for {collection_id} at chunk {chunk}: {message} (field: {field})")]
    UserErrors {
        collection_id: String,
        chunk: usize,
        field: String,
        message: String,
    },

    #[error("pagination limit reached for {operation}: exceeded {max_pages} pages")]
    PaginationLimit { operation: String, max_pages: usize },

    #[error("invalid store address \"{store}\": {reason}")]
    InvalidStoreUrl { store: String, reason: String },
}
