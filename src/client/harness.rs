//! Harness client module
//!
//! Provides `HarnessClient` for making API requests to Harness. Both the First
//! Gen GraphQL gateway and the Next Gen REST API live under the same base URL;
//! they only differ in the API key each client is built with.

use eyre::{Context, Result, eyre};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// Default Harness SaaS base URL
pub const DEFAULT_HARNESS_URL: &str = "https://app.harness.io";

/// Harness client for making API requests.
///
/// Every request carries the `x-api-key` header the client was built with.
///
/// # Example
/// ```no_run
/// use harness_app_migrator::client::HarnessClient;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("https://app.harness.io")?;
/// let client = HarnessClient::try_new(url, "pat.xxxx")?;
///
/// let response = client
///     .post_json_value(
///         "/gateway/api/graphql",
///         &[("accountId", "abc123")],
///         &serde_json::json!({"query": "{ applications(limit: 1 offset: 0){nodes{id}}}"}),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HarnessClient {
    client: Client,
    url: Url,
}

impl HarnessClient {
    /// Create a new HarnessClient from a base URL and API key.
    ///
    /// # Errors
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be built
    pub fn try_new(url: Url, apikey: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut apikey: reqwest::header::HeaderValue = apikey
            .parse()
            .with_context(|| "API key is not a valid header value")?;
        apikey.set_sensitive(true);
        headers.insert("x-api-key", apikey);
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, url })
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send a request to a given path with query parameters and an optional JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response> {
        let url = self
            .url
            .join(path)
            .with_context(|| format!("Invalid API path: {}", path))?;
        log::trace!("{} {}", method, url);

        let request = self.client.request(method, url).query(query);
        let response = match body {
            Some(body) => request.json(body).send().await,
            None => request.send().await,
        };
        response.map_err(|e| eyre!("Failed to send request: {}", e))
    }

    /// Helper for POST requests with a JSON value, returning the parsed JSON response.
    ///
    /// The HTTP status is not checked: Harness reports failures such as
    /// duplicate projects inside the JSON body.
    pub async fn post_json_value(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value> {
        let response = self.request(Method::POST, path, query, Some(body)).await?;
        let status = response.status();
        log::trace!("Response status: {}", status);

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {} ({})", path, status))
    }
}
