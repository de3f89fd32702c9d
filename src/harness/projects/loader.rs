//! Projects REST loader

use crate::client::HarnessClient;
use crate::etl::Loader;
use crate::harness::IdentifiedApplication;
use eyre::{Context, Result};
use serde_json::{Value, json};

const PROJECTS_PATH: &str = "/ng/api/projects";

/// Modules enabled on every created project
pub const MODULES: [&str; 14] = [
    "CD",
    "CI",
    "CV",
    "CF",
    "CE",
    "STO",
    "CHAOS",
    "SRM",
    "IACM",
    "CET",
    "CODE",
    "CORE",
    "PMS",
    "TEMPLATESERVICE",
];

/// A random 24-bit color in `#rrggbb` form
pub fn random_color() -> String {
    format!("#{:06x}", rand::random_range(0..1u32 << 24))
}

/// Loader for Next Gen projects
///
/// Harness answers `status: ERROR` when a project cannot be created, most
/// often because it already exists. Those responses are logged as warnings and
/// the remaining projects are still created.
///
/// # Example
/// ```no_run
/// use harness_app_migrator::client::HarnessClient;
/// use harness_app_migrator::etl::{Loader, Transformer};
/// use harness_app_migrator::harness::{Application, ProjectsLoader};
/// use harness_app_migrator::transform::IdentifierAssigner;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = HarnessClient::try_new(Url::parse("https://app.harness.io")?, "ng-token")?;
/// let loader = ProjectsLoader::new(client, "abc123", "default");
///
/// let targets = vec![IdentifierAssigner.transform(Application::new("a1", "Web"))?];
/// let created = loader.load(&targets).await?;
/// # Ok(())
/// # }
/// ```
pub struct ProjectsLoader {
    client: HarnessClient,
    account: String,
    org: String,
}

impl ProjectsLoader {
    pub fn new(client: HarnessClient, account: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            client,
            account: account.into(),
            org: org.into(),
        }
    }

    /// Build the creation payload for one application
    fn payload(&self, target: &IdentifiedApplication, color: &str) -> Value {
        json!({
            "project": {
                "orgIdentifier": self.org,
                "modules": MODULES,
                "identifier": target.identifier,
                "name": target.name(),
                "description": target.description(),
                "color": color,
            }
        })
    }

    /// Create a single project
    ///
    /// Returns true when the project was created, false when Harness refused it.
    async fn create_project(&self, target: &IdentifiedApplication) -> Result<bool> {
        let payload = self.payload(target, &random_color());
        let query = [
            ("accountIdentifier", self.account.as_str()),
            ("orgIdentifier", self.org.as_str()),
        ];

        let response = self
            .client
            .post_json_value(PROJECTS_PATH, &query, &payload)
            .await
            .with_context(|| format!("Failed to create project {}", target.identifier))?;

        if response.get("status").and_then(Value::as_str) == Some("ERROR") {
            log::warn!(
                "{}",
                response
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Project creation failed without a message")
            );
            log::debug!("{}", payload);
            return Ok(false);
        }

        log::info!(
            "Project {} created successfully in Organization {}",
            target.name(),
            self.org
        );
        Ok(true)
    }
}

impl Loader for ProjectsLoader {
    type Item = IdentifiedApplication;

    async fn load(&self, items: &[Self::Item]) -> Result<usize> {
        let mut created = 0;

        for target in items {
            if self.create_project(target).await? {
                created += 1;
            }
        }

        log::info!(
            "Created {} of {} project(s) in Organization {}",
            created,
            items.len(),
            self.org
        );
        Ok(created)
    }
}
