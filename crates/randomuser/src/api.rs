//! REST client for the random-user listing endpoint.

use userfeed_core::defaults::{DEFAULT_BASE_URL, RESULTS_QUERY_PARAM, USERS_PATH};
use userfeed_core::user::{User, UsersResponse};

/// HTTP client for a single random-user API host.
#[derive(Debug, Clone)]
pub struct RandomUserApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the random-user REST layer.
#[derive(Debug, thiserror::Error)]
pub enum RandomUserApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Network error while contacting the user API: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("User API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the expected `{ "results": [...] }` shape.
    #[error("Malformed user API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Zero users were requested.
    #[error("At least one user must be requested")]
    InvalidCount,
}

impl Default for RandomUserApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RandomUserApi {
    /// Create a new API client.
    ///
    /// * `base_url` - scheme and host, e.g. `https://randomuser.me`.
    ///   A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `count` random users.
    ///
    /// Sends `GET {base}/api/?results={count}` and returns the users in
    /// upstream order. Upstream may return fewer than `count`.
    pub async fn fetch_random_users(&self, count: u32) -> Result<Vec<User>, RandomUserApiError> {
        if count == 0 {
            return Err(RandomUserApiError::InvalidCount);
        }

        let url = format!(
            "{}{}?{}={}",
            self.base_url, USERS_PATH, RESULTS_QUERY_PARAM, count
        );
        tracing::debug!(url = %url, count, "Requesting random users");

        let response = self.client.get(&url).send().await.inspect_err(|e| {
            tracing::warn!(url = %url, error = %e, "User API request failed");
        })?;

        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        let parsed: UsersResponse = serde_json::from_str(&body).inspect_err(|e| {
            tracing::warn!(error = %e, "User API returned an unexpected payload");
        })?;

        tracing::debug!(received = parsed.results.len(), count, "Random users received");
        Ok(parsed.results)
    }

    // ---- private helpers ----

    /// Return the response unchanged on a success status, or a
    /// [`RandomUserApiError::Status`] carrying the status and body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RandomUserApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "User API returned an error status");
            return Err(RandomUserApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
