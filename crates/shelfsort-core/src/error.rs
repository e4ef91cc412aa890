use thiserror::Error;

/// Invalid or missing process configuration. Fatal before any collection is
/// touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Failure reported by an external collaborator (catalog, sales, sink).
#[derive(Debug, Error)]
pub enum SourceError {
    /// A read against the catalog failed.
    #[error("data fetch failed: {0}")]
    DataFetch(String),

    /// The catalog rejected a reorder write. Chunks submitted before the
    /// failing one stay applied.
    #[error("reorder mutation rejected: {0}")]
    Mutation(String),

    /// A reorder write could not be delivered (transport, status, GraphQL
    /// error).
    #[error("reorder write failed: {0}")]
    Write(String),
}

/// Why a single collection could not be reordered. Recorded in the run
/// summary; the run moves on to the next collection.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("collection \"{title}\" must use MANUAL sort order (found {sort_order})")]
    Mode { title: String, sort_order: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Failure that stops a run before any collection is processed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("sales lookup failed: {0}")]
    Sales(#[source] SourceError),

    #[error("seasonal exclusion lookup failed: {0}")]
    Seasonal(#[source] SourceError),
}
