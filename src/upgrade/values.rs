//! Values files
//!
//! One YAML file per application holds every parameter `harness-upgrade` needs,
//! so a single step can be re-run with `harness-upgrade --load values-{id}.yaml`.
//!
//! Example format:
//! ```yaml
//! env: Prod
//! api-key: pat.xxxx
//! account: abc123
//! app: QWxhZGRpbg
//! project: MyApp
//! org: default
//! secret-scope: account
//! connector-scope: account
//! template-scope: account
//! workflow-scope: project
//! ```

use crate::harness::IdentifiedApplication;
use clap::ValueEnum;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Scope at which migrated entities are created in Next Gen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Account,
    Org,
    Project,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::Org => write!(f, "org"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// Scopes applied to every migrated application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scopes {
    pub secret: Scope,
    pub connector: Scope,
    pub template: Scope,
    pub workflow: Scope,
}

impl Default for Scopes {
    fn default() -> Self {
        Self {
            secret: Scope::Account,
            connector: Scope::Account,
            template: Scope::Account,
            workflow: Scope::Project,
        }
    }
}

/// Run-wide `harness-upgrade` parameters, shared by every application
#[derive(Clone)]
pub struct UpgradeSettings {
    pub api_key: String,
    pub account: String,
    pub org: String,
    pub environment: String,
    pub scopes: Scopes,
}

/// The content of one values file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MigrationValues {
    pub env: String,
    pub api_key: String,
    pub account: String,
    /// First Gen application id
    pub app: String,
    /// Next Gen project identifier
    pub project: String,
    pub org: String,
    pub secret_scope: Scope,
    pub connector_scope: Scope,
    pub template_scope: Scope,
    pub workflow_scope: Scope,
}

impl MigrationValues {
    pub fn new(settings: &UpgradeSettings, target: &IdentifiedApplication) -> Self {
        Self {
            env: settings.environment.clone(),
            api_key: settings.api_key.clone(),
            account: settings.account.clone(),
            app: target.id().to_string(),
            project: target.identifier.clone(),
            org: settings.org.clone(),
            secret_scope: settings.scopes.secret,
            connector_scope: settings.scopes.connector,
            template_scope: settings.scopes.template,
            workflow_scope: settings.scopes.workflow,
        }
    }

    /// Read values from a YAML file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read values file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse values file: {}", path.display()))
    }

    /// Write values to a YAML file, replacing any previous content
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize values")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write values file: {}", path.display()))
    }
}

/// Location of the values file for a project identifier
pub fn values_path(dir: impl AsRef<Path>, identifier: &str) -> PathBuf {
    dir.as_ref().join(format!("values-{}.yaml", identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::Application;
    use tempfile::TempDir;

    fn settings() -> UpgradeSettings {
        UpgradeSettings {
            api_key: "pat.key".to_string(),
            account: "acc".to_string(),
            org: "default".to_string(),
            environment: "Prod".to_string(),
            scopes: Scopes::default(),
        }
    }

    fn target() -> IdentifiedApplication {
        IdentifiedApplication {
            application: Application::new("app-1", "My App"),
            identifier: "MyApp".to_string(),
        }
    }

    #[test]
    fn test_yaml_is_block_style_with_kebab_keys() {
        let yaml = serde_yaml::to_string(&MigrationValues::new(&settings(), &target())).unwrap();
        assert_eq!(
            yaml,
            "env: Prod\n\
             api-key: pat.key\n\
             account: acc\n\
             app: app-1\n\
             project: MyApp\n\
             org: default\n\
             secret-scope: account\n\
             connector-scope: account\n\
             template-scope: account\n\
             workflow-scope: project\n"
        );
    }

    #[test]
    fn test_write_overwrites_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = values_path(temp_dir.path(), "MyApp");
        std::fs::write(&path, "stale: true\nand: more content than the new file\n").unwrap();

        let values = MigrationValues::new(&settings(), &target());
        values.write(&path).unwrap();

        assert_eq!(MigrationValues::read(&path).unwrap(), values);
    }

    #[test]
    fn test_values_path() {
        assert_eq!(
            values_path(".", "MyApp"),
            PathBuf::from("./values-MyApp.yaml")
        );
    }

    #[test]
    fn test_read_invalid_scope() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("values-bad.yaml");
        let yaml = serde_yaml::to_string(&MigrationValues::new(&settings(), &target()))
            .unwrap()
            .replace("secret-scope: account", "secret-scope: galaxy");
        std::fs::write(&path, yaml).unwrap();

        let result = MigrationValues::read(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
