//! HTTP client for the Shopify Admin GraphQL API.

mod collection;
mod reorder;
mod sales;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use shelfsort_core::AppConfig;

use crate::error::ShopifyError;
use crate::retry::retry_with_backoff;
use crate::types::GraphQlResponse;

pub use reorder::{build_moves, REORDER_CHUNK_SIZE};
pub use sales::sales_search_filter;

/// Maximum number of pages to fetch for one connection before returning an
/// error. Guards against cycling cursors.
pub(super) const MAX_PAGES: usize = 400;

const ACCESS_TOKEN_HEADER: &str = "x-shopify-access-token";

/// Timeout and retry settings shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientPolicy {
    pub timeout_secs: u64,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    /// Pause between consecutive page or chunk requests.
    pub inter_request_delay_ms: u64,
}

impl ClientPolicy {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
            inter_request_delay_ms: config.inter_request_delay_ms,
        }
    }
}

impl Default for ClientPolicy {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            backoff_base_ms: 1_000,
            inter_request_delay_ms: 0,
        }
    }
}

/// Client for one store's Admin GraphQL endpoint.
///
/// Use [`AdminClient::new`] for a real store or [`AdminClient::with_base_url`]
/// to point at a mock server in tests.
pub struct AdminClient {
    client: Client,
    access_token: String,
    endpoint: Url,
    policy: ClientPolicy,
}

impl AdminClient {
    /// Creates a client for `store` (e.g. `my-store.myshopify.com`).
    ///
    /// A bare domain is given an `https://` scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidStoreUrl`] if `store` does not form a
    /// valid URL, or [`ShopifyError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn new(
        store: &str,
        access_token: &str,
        api_version: &str,
        policy: ClientPolicy,
    ) -> Result<Self, ShopifyError> {
        Self::with_base_url(&store_origin(store), access_token, api_version, policy)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`AdminClient::new`].
    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        api_version: &str,
        policy: ClientPolicy,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(policy.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("shelfsort/0.1 (collection-ordering)")
            .build()?;

        let endpoint = graphql_endpoint(base_url, api_version)?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            endpoint,
            policy,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one GraphQL document and returns its `data`, retrying transient
    /// failures per the client's [`ClientPolicy`].
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::RateLimited`] on HTTP 429 after retries.
    /// - [`ShopifyError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ShopifyError::Throttled`] when the `errors` array carries a
    ///   `THROTTLED` code after retries.
    /// - [`ShopifyError::GraphQl`] for any other `errors` entry.
    /// - [`ShopifyError::MissingData`] when `data` is absent.
    /// - [`ShopifyError::Deserialize`] when the body does not match `T`.
    pub(crate) async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let body = serde_json::json!({ "query": query, "variables": variables });

        retry_with_backoff(self.policy.max_retries, self.policy.backoff_base_ms, || {
            let body = &body;
            async move {
                let response = self
                    .client
                    .post(self.endpoint.clone())
                    .header(ACCESS_TOKEN_HEADER, &self.access_token)
                    .json(body)
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(2);
                    return Err(ShopifyError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(ShopifyError::UnexpectedStatus {
                        status: status.as_u16(),
                        operation: operation.to_owned(),
                    });
                }

                let text = response.text().await?;
                let envelope: GraphQlResponse<T> =
                    serde_json::from_str(&text).map_err(|e| ShopifyError::Deserialize {
                        context: operation.to_owned(),
                        source: e,
                    })?;
                into_data(operation, envelope)
            }
        })
        .await
    }

    /// Sleeps for the configured inter-request delay, if any.
    pub(super) async fn pace(&self) {
        if self.policy.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.policy.inter_request_delay_ms)).await;
        }
    }
}

/// Unwraps a GraphQL envelope into its `data`, surfacing `errors` first.
fn into_data<T>(operation: &str, envelope: GraphQlResponse<T>) -> Result<T, ShopifyError> {
    if let Some(first) = envelope.errors.first() {
        let throttled = envelope.errors.iter().any(|e| {
            e.extensions
                .as_ref()
                .and_then(|x| x.code.as_deref())
                .is_some_and(|code| code == "THROTTLED")
        });
        if throttled {
            return Err(ShopifyError::Throttled {
                operation: operation.to_owned(),
            });
        }
        return Err(ShopifyError::GraphQl {
            operation: operation.to_owned(),
            message: first.message.clone(),
        });
    }

    envelope.data.ok_or_else(|| ShopifyError::MissingData {
        operation: operation.to_owned(),
    })
}

/// Turns a store setting into an origin, adding `https://` when no scheme is
/// given and dropping any trailing slash.
fn store_origin(store: &str) -> String {
    let trimmed = store.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

/// Builds `{base}/admin/api/{version}/graphql.json`.
fn graphql_endpoint(base_url: &str, api_version: &str) -> Result<Url, ShopifyError> {
    let invalid = |reason: String| ShopifyError::InvalidStoreUrl {
        store: base_url.to_owned(),
        reason,
    };

    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
        .map_err(|e| invalid(e.to_string()))?;
    if base.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_owned()));
    }
    base.join(&format!("admin/api/{}/graphql.json", api_version.trim()))
        .map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
