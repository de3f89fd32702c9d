//! Applications GraphQL extractor
//!
//! Pages through `POST /gateway/api/graphql?accountId={account}`

use super::{Application, NameFilter};
use crate::client::HarnessClient;
use crate::etl::Extractor;
use eyre::{Context, Result};
use serde_json::{Value, json};

/// Number of applications requested per GraphQL page
pub const PAGE_SIZE: usize = 100;

const GRAPHQL_PATH: &str = "/gateway/api/graphql";

/// Extractor for First Gen applications
///
/// Requests pages of [`PAGE_SIZE`] until an empty page comes back, then applies
/// the [`NameFilter`].
///
/// A response without `data.applications.nodes` (usually a rejected token) is
/// logged and ends paging; whatever was gathered so far is returned.
///
/// # Example
/// ```no_run
/// use harness_app_migrator::client::HarnessClient;
/// use harness_app_migrator::etl::Extractor;
/// use harness_app_migrator::harness::{ApplicationsExtractor, NameFilter};
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = HarnessClient::try_new(Url::parse("https://app.harness.io")?, "token")?;
/// let extractor = ApplicationsExtractor::new(client, "abc123", NameFilter::parse("web,api", false));
/// let applications = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct ApplicationsExtractor {
    client: HarnessClient,
    account: String,
    filter: NameFilter,
}

impl ApplicationsExtractor {
    pub fn new(client: HarnessClient, account: impl Into<String>, filter: NameFilter) -> Self {
        Self {
            client,
            account: account.into(),
            filter,
        }
    }

    /// Create an extractor that keeps every application
    pub fn all(client: HarnessClient, account: impl Into<String>) -> Self {
        Self::new(client, account, NameFilter::default())
    }

    fn page_query(offset: usize) -> String {
        format!(
            "{{ applications(limit: {} offset: {}){{nodes{{id name description}}}}}}",
            PAGE_SIZE, offset
        )
    }

    /// Fetch one page; `None` when the response does not carry application nodes
    async fn fetch_page(&self, offset: usize) -> Result<Option<Vec<Application>>> {
        let body = json!({ "query": Self::page_query(offset) });
        let response = self
            .client
            .post_json_value(GRAPHQL_PATH, &[("accountId", self.account.as_str())], &body)
            .await
            .with_context(|| format!("Failed to fetch applications at offset {}", offset))?;

        Self::parse_page(&response)
            .with_context(|| format!("Failed to parse applications at offset {}", offset))
    }

    fn parse_page(response: &Value) -> Result<Option<Vec<Application>>> {
        match response.pointer("/data/applications/nodes") {
            Some(nodes) if nodes.is_array() => Ok(Some(serde_json::from_value(nodes.clone())?)),
            _ => Ok(None),
        }
    }

    /// Fetch all pages from the gateway, unfiltered
    async fn fetch_all(&self) -> Result<Vec<Application>> {
        let mut applications = Vec::new();
        let mut offset = 0;

        loop {
            log::debug!("Fetching applications at offset {}", offset);
            match self.fetch_page(offset).await? {
                Some(page) if page.is_empty() => break,
                Some(page) => {
                    applications.extend(page);
                    offset += PAGE_SIZE;
                }
                None => {
                    log::error!("Error Authenticating against Harness - Verify your token");
                    break;
                }
            }
        }

        log::debug!("Last offset used {}", offset);
        Ok(applications)
    }
}

impl Extractor for ApplicationsExtractor {
    type Item = Application;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        let applications = self.filter.apply(self.fetch_all().await?);

        log::info!(
            "Total applications {}{}",
            if self.filter.is_empty() {
                ""
            } else {
                "after filters "
            },
            applications.len()
        );

        Ok(applications)
    }
}
