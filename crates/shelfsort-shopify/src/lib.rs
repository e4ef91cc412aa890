//! Shopify Admin GraphQL collaborators for `shelfsort-core`.
//!
//! [`AdminClient`] reads recent sales and collection contents and writes
//! manual collection order. It implements every `shelfsort-core` source
//! trait, so one client serves a whole run.

pub mod client;
pub mod error;
pub mod normalize;
mod queries;
mod retry;
mod sources;
pub mod types;

pub use client::{build_moves, sales_search_filter, AdminClient, ClientPolicy, REORDER_CHUNK_SIZE};
pub use error::ShopifyError;
pub use normalize::{normalize_product, size_option};
